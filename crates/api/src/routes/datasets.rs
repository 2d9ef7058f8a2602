//! Dataset Overview and Preview Routes

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use datasets::{Record, Table, TableKind, TableSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{AppState, RequestError};

/// Query parameters for the preview endpoint
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Number of leading rows to return
    pub limit: Option<usize>,
}

/// Response for the overview endpoint
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub tables: Vec<TableSummary>,
}

/// Response for the preview endpoint
#[derive(Debug, Serialize)]
pub struct PreviewResponse<'a, T> {
    pub table: TableKind,
    pub columns: &'a [String],
    pub data: &'a [T],
    pub meta: PreviewMeta,
}

#[derive(Debug, Serialize)]
pub struct PreviewMeta {
    pub count: usize,
    pub total_rows: usize,
    pub limit: usize,
}

/// Shape of every loaded table
pub async fn get_overview(State(state): State<Arc<AppState>>) -> Json<OverviewResponse> {
    Json(OverviewResponse {
        tables: state.datasets.summary(),
    })
}

/// First rows of one table
pub async fn get_preview(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    Query(params): Query<PreviewQuery>,
) -> Result<Response, RequestError> {
    let kind = TableKind::from_name(&table).ok_or(RequestError::UnknownTable(table))?;
    let limit = params
        .limit
        .unwrap_or(state.preview.default_rows)
        .min(state.preview.max_rows);

    let data = &state.datasets;
    Ok(match kind {
        TableKind::Sensor => preview(&data.sensor, limit),
        TableKind::Maintenance => preview(&data.maintenance, limit),
        TableKind::Failure => preview(&data.failure, limit),
    })
}

fn preview<T: Record>(table: &Table<T>, limit: usize) -> Response {
    let rows = table.head(limit);
    Json(PreviewResponse {
        table: table.kind(),
        columns: table.columns(),
        data: rows,
        meta: PreviewMeta {
            count: rows.len(),
            total_rows: table.len(),
            limit,
        },
    })
    .into_response()
}
