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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One group's share of the valid total.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    /// Grouping value
    pub key: String,
    /// Number of records in the group, always at least 1
    pub count: u64,
    /// `count / total * 100`, rounded to two decimals
    pub percentage: f64,
}

impl Share {
    /// Render as a requester row using the given percentage representation.
    pub fn into_requester_share(self, format: PercentageFormat) -> RequesterShare {
        RequesterShare {
            requester: self.key,
            count: self.count,
            percentage: Percentage::new(self.percentage, format),
        }
    }

    /// Render as a client row. Client rows always carry numeric percentages.
    pub fn into_client_share(self) -> ClientShare {
        ClientShare { client: self.key, count: self.count, percentage: self.percentage }
    }
}

/// How a percentage is written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentageFormat {
    /// `"33.33%"`
    #[default]
    Text,
    /// `33.33`
    Number,
}

/// A percentage as produced by either reporting mode.
///
/// The enveloped endpoint reports text with a trailing `%`, the client feed
/// reports bare numbers. Consumers accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Percentage {
    /// Raw number, e.g. `33.33`
    Number(f64),
    /// Formatted text, e.g. `"33.33%"`
    Text(String),
}

impl Percentage {
    /// Build a percentage value in the requested representation.
    pub fn new(value: f64, format: PercentageFormat) -> Self {
        match format {
            PercentageFormat::Text => Self::Text(format!("{value:.2}%")),
            PercentageFormat::Number => Self::Number(value),
        }
    }

    /// Numeric value, parsing the text form when needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value:.2}%"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Share of analyses for one requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequesterShare {
    /// Requester name
    #[serde(alias = "solicitante")]
    pub requester: String,
    /// Number of analyses
    #[serde(alias = "total")]
    pub count: u64,
    /// Share of the total
    #[serde(alias = "porcentaje")]
    pub percentage: Percentage,
}

/// Share of analyses for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientShare {
    /// Client name
    #[serde(alias = "cliente")]
    pub client: String,
    /// Number of analyses
    #[serde(alias = "total")]
    pub count: u64,
    /// Share of the total, as a number
    #[serde(alias = "porcentaje")]
    pub percentage: f64,
}
