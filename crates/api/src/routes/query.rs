//! Query Routes

use axum::{extract::State, Json};
use query_router::{validate_query, Intent, ResponseStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::{AppState, RequestError};

/// Body of a query request
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Answer to a query request
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub intent: Intent,
    pub status: ResponseStatus,
    pub response: String,
}

/// Route an operator query and return the display text
pub async fn post_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, RequestError> {
    let query = validate_query(&request.query).map_err(|_| RequestError::BlankQuery)?;

    let answer = query_router::answer(query, &state.datasets);
    metrics::counter!(
        "queries_total",
        "intent" => answer.intent.as_str(),
        "status" => answer.status.as_str()
    )
    .increment(1);
    info!("Answered query as {} ({})", answer.intent, answer.status.as_str());

    Ok(Json(QueryResponse {
        intent: answer.intent,
        status: answer.status,
        response: answer.text,
    }))
}
