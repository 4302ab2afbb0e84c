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
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lab_analytics::{ClientShare, GroupKey, PercentageFormat, RequesterShare};

use super::no_store;
use crate::{
    aggregation::{compute_shares, AggregationStrategy},
    models::{ErrorMessage, SharesEnvelope},
    AppState,
};

pub const REQUESTER_SHARES_PATH: &str = "/analisis/porcentaje";
pub const REQUESTER_SHARES_SIMPLE_PATH: &str = "/analisis/porcentaje-simple";
pub const CLIENT_SHARES_PATH: &str = "/api/analisis/clientes/porcentaje";

const NO_ANALYSES: &str = "No analyses found";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(REQUESTER_SHARES_PATH, get(get_requester_shares))
        .route(REQUESTER_SHARES_SIMPLE_PATH, get(get_requester_shares_simple))
        .route(CLIENT_SHARES_PATH, get(get_client_shares))
}

/// GET /analisis/porcentaje
/// Enveloped share of analyses per requester, percentages as text
async fn get_requester_shares(State(state): State<Arc<AppState>>) -> Response {
    match compute_shares(state.store.as_ref(), GroupKey::Requester, AggregationStrategy::Pipeline)
        .await
    {
        Ok(shares) if shares.is_empty() => {
            no_store(Json(SharesEnvelope::<RequesterShare>::empty(NO_ANALYSES)).into_response())
        }
        Ok(shares) => {
            let rows: Vec<RequesterShare> = shares
                .into_iter()
                .map(|share| share.into_requester_share(PercentageFormat::Text))
                .collect();
            no_store(Json(SharesEnvelope::new(rows)).into_response())
        }
        Err(err) => {
            tracing::error!("{REQUESTER_SHARES_PATH} failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SharesEnvelope::<RequesterShare>::failure(err.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /analisis/porcentaje-simple
/// Bare list of requester shares, grouped in process
async fn get_requester_shares_simple(State(state): State<Arc<AppState>>) -> Response {
    match compute_shares(state.store.as_ref(), GroupKey::Requester, AggregationStrategy::Manual)
        .await
    {
        Ok(shares) => {
            let rows: Vec<RequesterShare> = shares
                .into_iter()
                .map(|share| share.into_requester_share(PercentageFormat::Text))
                .collect();
            no_store(Json(rows).into_response())
        }
        Err(err) => {
            tracing::error!("{REQUESTER_SHARES_SIMPLE_PATH} failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorMessage { message: err.to_string() }))
                .into_response()
        }
    }
}

/// GET /api/analisis/clientes/porcentaje
/// Enveloped share of analyses per client, percentages as numbers
async fn get_client_shares(State(state): State<Arc<AppState>>) -> Response {
    match compute_shares(state.store.as_ref(), GroupKey::Client, AggregationStrategy::Pipeline).await
    {
        Ok(shares) if shares.is_empty() => {
            no_store(Json(SharesEnvelope::<ClientShare>::empty(NO_ANALYSES)).into_response())
        }
        Ok(shares) => {
            let rows: Vec<ClientShare> =
                shares.into_iter().map(|share| share.into_client_share()).collect();
            no_store(Json(SharesEnvelope::new(rows)).into_response())
        }
        Err(err) => {
            tracing::error!("{CLIENT_SHARES_PATH} failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SharesEnvelope::<ClientShare>::failure(err.to_string())),
            )
                .into_response()
        }
    }
}
