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

use lab_analytics::{substitute_shares, GroupKey, Percentage, PercentageFormat};
use serde::{Deserialize, Serialize};

/// A displayable share row: label, count and percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    /// Requester or client name
    pub label: String,
    /// Number of analyses, above zero
    pub count: f64,
    /// Share of the total, in whichever representation the server sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Percentage>,
}

/// Which share feed to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    /// Analyses per requester
    #[default]
    Requester,
    /// Analyses per client
    Client,
}

impl Feed {
    /// Grouping key the feed reports on
    pub fn key(&self) -> GroupKey {
        match self {
            Self::Requester => GroupKey::Requester,
            Self::Client => GroupKey::Client,
        }
    }

    /// Accepted names of the label field, current name first.
    pub fn label_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Requester => &["requester", "solicitante"],
            Self::Client => &["client", "cliente"],
        }
    }

    /// Candidate paths, tried in this order.
    pub fn default_paths(&self) -> &'static [&'static str] {
        match self {
            Self::Requester => &["/analisis/porcentaje", "/analisis/porcentaje-simple"],
            Self::Client => &[
                "/api/analisis/clientes/porcentaje",
                "/clientes/porcentaje",
                "/api/clientes/porcentaje",
            ],
        }
    }

    /// How this feed writes percentages.
    pub fn percentage_format(&self) -> PercentageFormat {
        match self {
            Self::Requester => PercentageFormat::Text,
            Self::Client => PercentageFormat::Number,
        }
    }

    /// Substitute rows for this feed, built from the shared substitute table.
    pub fn substitute_rows(&self) -> Vec<ShareRow> {
        let format = self.percentage_format();
        substitute_shares()
            .into_iter()
            .map(|share| ShareRow {
                label: share.key,
                count: share.count as f64,
                percentage: Some(Percentage::new(share.percentage, format)),
            })
            .collect()
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key().field())
    }
}
