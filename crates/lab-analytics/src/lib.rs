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

//! Share computation for laboratory analyses.
//!
//! Records are grouped by a key field (the requester, or the client) and each
//! group is reported with its count and its percentage of the valid total.
//! The computation is pure: the same records always produce the same ordered
//! rows.

#![deny(missing_docs)]

/// Grouping and percentage computation
pub mod aggregator;
/// Analysis records as stored and listed
pub mod records;
/// Laboratory samples and their measured parameters
pub mod samples;
/// Computed share rows and their wire representations
pub mod shares;
/// Fixed rows used when no live data source is reachable
pub mod substitute;

pub use aggregator::{aggregate, group_counts, shares_from_counts, GroupCount};
pub use records::{AnalysisRecord, GroupKey};
pub use samples::{Parameter, Sample};
pub use shares::{round2, ClientShare, Percentage, PercentageFormat, RequesterShare, Share};
pub use substitute::{substitute_shares, SUBSTITUTE_COUNTS};
