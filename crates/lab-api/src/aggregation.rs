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

use lab_analytics::{aggregate, shares_from_counts, GroupKey, Share};

use crate::store::{AnalysisStore, StoreError};

/// How grouped counts are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStrategy {
    /// The store groups and counts; manual grouping is used if that fails
    Pipeline,
    /// Fetch every record and group in process
    Manual,
}

/// Compute ranked shares of the records in `store`, grouped by `key`.
pub async fn compute_shares(
    store: &dyn AnalysisStore,
    key: GroupKey,
    strategy: AggregationStrategy,
) -> Result<Vec<Share>, StoreError> {
    if strategy == AggregationStrategy::Pipeline {
        match store.group_counts(key).await {
            Ok(counts) => return Ok(shares_from_counts(counts)),
            Err(err) => {
                tracing::warn!("Grouped count by {key} failed, grouping manually: {err}");
            }
        }
    }

    let records = store.all().await?;
    tracing::debug!("Grouping {} analyses by {key}", records.len());
    Ok(aggregate(&records, key))
}
