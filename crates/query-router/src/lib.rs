//! CNC Maintenance Query Router
//!
//! Classifies free-text operator queries by keyword and answers them with
//! canned aggregates over the loaded [`datasets::Datasets`].
//!
//! ```no_run
//! use datasets::Datasets;
//!
//! let data = Datasets::default();
//! let text = query_router::respond("average vibration", &data);
//! println!("{}", text);
//! ```

mod aggregate;
mod error;
mod intent;
mod router;

pub use aggregate::{latest, mean, most_recent, span};
pub use error::{validate_query, QueryError};
pub use intent::{Intent, INTENT_KEYWORDS};
pub use router::{
    answer, respond, try_respond, Response, ResponseStatus, BLANK_QUERY_WARNING,
    FALLBACK_RESPONSE, NO_SENSOR_FAULTS, RECENT_FAILURE_LIMIT,
};
