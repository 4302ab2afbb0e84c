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

use serde::Serialize;

use crate::feed::ShareRow;

/// Progress of a share fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Rows came from a live candidate
    Success,
    /// Every candidate failed and the rows are the substitute set
    Degraded,
}

/// Fetch state owned by whoever triggered the fetch.
///
/// Once a fetch completes, `rows` is the live result or the substitute set,
/// and `error` is set exactly when the status is [FetchStatus::Degraded].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchState {
    /// Current status
    pub status: FetchStatus,
    /// Rows to display
    pub rows: Vec<ShareRow>,
    /// Human-readable failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchState {
    /// Live rows.
    pub fn success(rows: Vec<ShareRow>) -> Self {
        Self { status: FetchStatus::Success, rows, error: None }
    }

    /// Substitute rows with the reason the live fetch failed.
    pub fn degraded(rows: Vec<ShareRow>, error: impl Into<String>) -> Self {
        Self { status: FetchStatus::Degraded, rows, error: Some(error.into()) }
    }

    /// Mark a fetch as started. Rows from the previous fetch stay visible.
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Whether the rows came from the server
    pub fn is_live(&self) -> bool {
        self.status == FetchStatus::Success
    }
}
