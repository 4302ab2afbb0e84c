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

//! Parsing and validation of share responses.

use lab_analytics::Percentage;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    feed::{Feed, ShareRow},
    FetchError,
};

const COUNT_FIELDS: &[&str] = &["count", "total"];
const PERCENTAGE_FIELDS: &[&str] = &["percentage", "porcentaje"];

/// Accepted response shapes.
///
/// Only `data` decides the shape: `success` and `message` are kept loosely
/// typed so an unusual flag or message never hides valid rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SharesPayload {
    /// An object carrying the rows under `data`
    Envelope {
        /// Outcome flag, absent on some servers
        #[serde(default)]
        success: Option<Value>,
        /// Explanation accompanying an empty or failed result
        #[serde(default)]
        message: Option<Value>,
        /// Raw rows
        data: Vec<Value>,
    },
    /// A bare list of rows
    Rows(Vec<Value>),
}

impl SharesPayload {
    /// Unwrap the raw rows.
    ///
    /// Envelope rows are used whatever `success` says. An envelope reporting
    /// `success: false` with no rows at all is a failure.
    pub fn into_rows(self) -> Result<Vec<Value>, FetchError> {
        match self {
            Self::Envelope { success: Some(Value::Bool(false)), message, data }
                if data.is_empty() =>
            {
                let message = match message {
                    Some(Value::String(message)) => message,
                    Some(other) => other.to_string(),
                    None => "no message".to_string(),
                };
                Err(FetchError::Rejected(message))
            }
            Self::Envelope { data, .. } => Ok(data),
            Self::Rows(rows) => Ok(rows),
        }
    }
}

fn field<'a>(row: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| row.get(*name))
}

/// Any finite number above zero.
fn positive_count(value: &Value) -> Option<f64> {
    value.as_f64().filter(|count| count.is_finite() && *count > 0.0)
}

/// Validate one raw row for `feed`.
///
/// The label must be a non-empty string and the count a number above zero.
/// The percentage is carried through when present and not checked.
pub fn validate_row(row: &Value, feed: Feed) -> Option<ShareRow> {
    let row = row.as_object()?;
    let label = field(row, feed.label_fields())?.as_str().filter(|label| !label.is_empty())?;
    let count = positive_count(field(row, COUNT_FIELDS)?)?;
    let percentage = field(row, PERCENTAGE_FIELDS)
        .and_then(|value| Percentage::deserialize(value).ok());

    Some(ShareRow { label: label.to_string(), count, percentage })
}

/// Parse a response body into validated rows.
///
/// Invalid rows are dropped. A non-empty response with no valid row is an
/// error; an empty response is an empty success.
pub fn parse_rows(body: &str, feed: Feed) -> Result<Vec<ShareRow>, FetchError> {
    let payload: SharesPayload =
        serde_json::from_str(body).map_err(|err| FetchError::Shape(err.to_string()))?;
    let raw = payload.into_rows()?;

    let rows: Vec<ShareRow> = raw.iter().filter_map(|row| validate_row(row, feed)).collect();
    if rows.is_empty() && !raw.is_empty() {
        return Err(FetchError::NoValidRows { received: raw.len() });
    }
    if rows.len() < raw.len() {
        tracing::debug!(
            "Dropped {} of {} {feed} rows failing validation",
            raw.len() - rows.len(),
            raw.len()
        );
    }

    Ok(rows)
}
