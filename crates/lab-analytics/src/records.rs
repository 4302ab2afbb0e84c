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

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single laboratory analysis.
///
/// Only [AnalysisRecord::requester] and [AnalysisRecord::client] take part in
/// share computation; the remaining fields are carried through untouched.
/// Stored documents may use either the English field names or the legacy
/// Spanish ones (`solicitante`, `estado`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Document identifier
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Processing status (e.g. "Pendiente", "Hecho")
    #[serde(default, alias = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Party on whose behalf the analysis was performed
    #[serde(default, alias = "solicitante", deserialize_with = "lenient_string")]
    pub requester: Option<String>,

    /// Kind of analysis
    #[serde(default, alias = "tipo_analisis", skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,

    /// Billing client, when distinct from the requester
    #[serde(
        default,
        alias = "cliente",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub client: Option<String>,

    /// Creation date
    #[serde(default, alias = "fecha_creacion", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update date
    #[serde(default, alias = "fecha_actualizacion", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Free-text notes
    #[serde(default, alias = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Free-text results
    #[serde(default, alias = "resultados", skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
}

/// Non-string JSON values (numbers, objects, ...) in a key field count as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Field that records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    /// Group by [AnalysisRecord::requester]
    Requester,
    /// Group by [AnalysisRecord::client]
    Client,
}

impl GroupKey {
    /// Returns the grouping value of `record` if it passes the validity predicate.
    ///
    /// A value is valid when present and not exactly the empty string. There
    /// is no trimming: `"  "` is valid while `""` is not.
    pub fn value<'a>(&self, record: &'a AnalysisRecord) -> Option<&'a str> {
        let raw = match self {
            Self::Requester => record.requester.as_deref(),
            Self::Client => record.client.as_deref(),
        };
        raw.filter(|value| !value.is_empty())
    }

    /// Name of the field on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Client => "client",
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}
