//! HTTP Route Handlers

pub mod datasets;
pub mod query;
