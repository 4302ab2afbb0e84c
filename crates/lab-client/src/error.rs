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

use std::time::Duration;

use thiserror::Error;

/// Share fetch error types
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure reaching a candidate
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The candidate did not answer within the per-attempt deadline
    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The candidate answered with a non-success status
    #[error("Error {status}: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, or the server's message when it sent one
        reason: String,
    },

    /// The body is not a bare row list nor an envelope with a `data` list
    #[error("Unexpected response format: {0}")]
    Shape(String),

    /// The envelope reported `success: false`
    #[error("Server reported failure: {0}")]
    Rejected(String),

    /// A non-empty response contained no row passing validation
    #[error("Received {received} rows, none in the expected format")]
    NoValidRows {
        /// Number of rows in the response
        received: usize,
    },

    /// Every candidate failed
    #[error("all {} candidates failed: {}", .errors.len(), .errors.join("; "))]
    AllSourcesFailed {
        /// Error messages from each candidate, in the order they were tried
        errors: Vec<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Classify a reqwest error, separating deadline expiry from other transport errors.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(err)
        }
    }
}
