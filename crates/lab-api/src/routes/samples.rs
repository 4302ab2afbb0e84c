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
use lab_analytics::Sample;

use crate::{
    models::{ListResponse, SampleListParams},
    AppError, AppState,
};

pub const SAMPLES_PATH: &str = "/api/muestras/todas";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(SAMPLES_PATH, get(list_samples))
}

/// GET /api/muestras/todas
/// Paginated sample listing, filtered by name and report number
async fn list_samples(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SampleListParams>,
) -> Result<Json<ListResponse<Sample>>, AppError> {
    let params = params.validate();
    let filter = params.filter();

    tracing::debug!(
        "Listing samples page={} limit={} filter={:?}",
        params.page,
        params.limit,
        filter
    );

    let page = state.store.list_samples(&filter, params.offset(), params.limit).await?;

    Ok(Json(ListResponse::new(page.records, page.total, params.page, params.limit)))
}
