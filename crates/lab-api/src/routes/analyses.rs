// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use lab_analytics::AnalysisRecord;

use crate::{
    models::{ListParams, ListResponse},
    AppError, AppState,
};

pub const ANALYSES_PATH: &str = "/api/analisis";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(ANALYSES_PATH, get(list_analyses))
}

/// GET /api/analisis
/// Paginated, filtered analysis listing
async fn list_analyses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<AnalysisRecord>>, AppError> {
    let params = params.validate();
    let filter = params.filter();

    tracing::debug!(
        "Listing analyses page={} limit={} filter={:?}",
        params.page,
        params.limit,
        filter
    );

    let page = state.store.list(&filter, params.offset(), params.limit).await?;

    Ok(Json(ListResponse::new(page.records, page.total, params.page, params.limit)))
}
