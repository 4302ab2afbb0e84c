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

use serde::{Deserialize, Serialize};

use crate::store::{AnalysisFilter, SampleFilter};

/// Query parameters for the analysis listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Exact status to match
    #[serde(default, alias = "estado")]
    pub status: Option<String>,

    /// Exact requester to match
    #[serde(default, alias = "solicitante")]
    pub requester: Option<String>,

    /// Exact analysis type to match
    #[serde(default, alias = "tipo_analisis")]
    pub analysis_type: Option<String>,

    /// 1-based page number (default: 1)
    #[serde(default = "default_page")]
    pub page: u64,

    /// Page size (default: 10, max: 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

const MAX_LIMIT: u64 = 100;

fn offset(page: u64, limit: u64) -> u64 {
    (page - 1).saturating_mul(limit)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

impl ListParams {
    /// Validate and normalize pagination parameters
    pub fn validate(self) -> Self {
        Self { page: self.page.max(1), limit: self.limit.clamp(1, MAX_LIMIT), ..self }
    }

    pub fn offset(&self) -> u64 {
        offset(self.page, self.limit)
    }

    /// Empty filter values are ignored, as if the parameter were not given.
    pub fn filter(&self) -> AnalysisFilter {
        AnalysisFilter {
            status: non_empty(&self.status),
            requester: non_empty(&self.requester),
            analysis_type: non_empty(&self.analysis_type),
        }
    }
}

/// Query parameters for the sample listing
#[derive(Debug, Deserialize)]
pub struct SampleListParams {
    /// Substring of the sample name, ignoring case
    #[serde(default, alias = "muestra_nombre")]
    pub sample_name: Option<String>,

    /// Exact report number
    #[serde(default, alias = "nro_informe")]
    pub report_number: Option<u64>,

    /// 1-based page number (default: 1)
    #[serde(default = "default_page")]
    pub page: u64,

    /// Page size (default: 10, max: 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl SampleListParams {
    pub fn validate(self) -> Self {
        Self { page: self.page.max(1), limit: self.limit.clamp(1, MAX_LIMIT), ..self }
    }

    pub fn offset(&self) -> u64 {
        offset(self.page, self.limit)
    }

    pub fn filter(&self) -> SampleFilter {
        SampleFilter { sample_name: non_empty(&self.sample_name), report_number: self.report_number }
    }
}

/// Paginated listing
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,

    /// Number of records in this page
    pub count: usize,

    /// Number of records matching the filter
    pub total: u64,

    pub page: u64,

    #[serde(rename = "totalPages")]
    pub total_pages: u64,

    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self { success: true, count: data.len(), total, page, total_pages: total.div_ceil(limit), data }
    }
}

/// Envelope used by the enveloped share endpoints.
#[derive(Debug, Serialize)]
pub struct SharesEnvelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: Vec<T>,
}

impl<T> SharesEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { success: true, count: Some(data.len()), message: None, data }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self { success: true, count: None, message: Some(message.into()), data: Vec::new() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, count: None, message: Some(message.into()), data: Vec::new() }
    }
}

/// Error body of the bare (non-enveloped) endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}
