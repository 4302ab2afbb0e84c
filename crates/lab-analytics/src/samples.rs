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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::lenient_string;

/// One measured parameter of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Measured value
    #[serde(alias = "valor")]
    pub value: f64,

    /// Unit of the value (e.g. "mg/l")
    #[serde(default, alias = "unidad")]
    pub unit: String,
}

/// A laboratory sample and its measured parameters.
///
/// As with [crate::AnalysisRecord], stored documents may use the legacy
/// Spanish field names (`nro_informe`, `muestra_nombre`, `parametros`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Document identifier
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Report number the sample belongs to
    #[serde(default, alias = "nro_informe", skip_serializing_if = "Option::is_none")]
    pub report_number: Option<u64>,

    /// Sample description
    #[serde(default, alias = "muestra_nombre")]
    pub sample_name: String,

    /// Parameters keyed by name
    #[serde(default, alias = "parametros")]
    pub parameters: BTreeMap<String, Parameter>,

    /// Creation date
    #[serde(default, alias = "fecha_creacion", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update date
    #[serde(default, alias = "fecha_actualizacion", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
