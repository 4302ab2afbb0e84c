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

//! Record storage behind the service.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use lab_analytics::{group_counts, AnalysisRecord, GroupCount, GroupKey, Sample};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Exact-match filters for record listings. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisFilter {
    pub status: Option<String>,
    pub requester: Option<String>,
    pub analysis_type: Option<String>,
}

impl AnalysisFilter {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
            match wanted {
                Some(wanted) => actual.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        }

        field_matches(&self.status, &record.status)
            && field_matches(&self.requester, &record.requester)
            && field_matches(&self.analysis_type, &record.analysis_type)
    }
}

/// Filters for the sample listing. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleFilter {
    /// Case-insensitive substring of the sample name
    pub sample_name: Option<String>,
    /// Exact report number
    pub report_number: Option<u64>,
}

impl SampleFilter {
    pub fn matches(&self, sample: &Sample) -> bool {
        let name_matches = match &self.sample_name {
            Some(wanted) => sample.sample_name.to_lowercase().contains(&wanted.to_lowercase()),
            None => true,
        };
        let report_matches = match self.report_number {
            Some(wanted) => sample.report_number == Some(wanted),
            None => true,
        };

        name_matches && report_matches
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    /// Number of records matching the filter, across all pages
    pub total: u64,
}

pub type RecordPage = Page<AnalysisRecord>;
pub type SamplePage = Page<Sample>;

fn paginate<T: Clone>(matching: Vec<&T>, offset: u64, limit: u64) -> Page<T> {
    let records =
        matching.iter().skip(offset as usize).take(limit as usize).map(|r| (*r).clone()).collect();
    Page { records, total: matching.len() as u64 }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let data = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&data)?)
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// List records matching `filter`, skipping `offset` and returning at most `limit`.
    async fn list(
        &self,
        filter: &AnalysisFilter,
        offset: u64,
        limit: u64,
    ) -> Result<RecordPage, StoreError>;

    /// Every stored record.
    async fn all(&self) -> Result<Vec<AnalysisRecord>, StoreError>;

    /// Grouped counts of valid `key` values, computed by the store itself.
    async fn group_counts(&self, key: GroupKey) -> Result<Vec<GroupCount>, StoreError>;

    /// List samples matching `filter`, skipping `offset` and returning at most `limit`.
    async fn list_samples(
        &self,
        filter: &SampleFilter,
        offset: u64,
        limit: u64,
    ) -> Result<SamplePage, StoreError>;
}

pub type StoreObj = Arc<dyn AnalysisStore>;

/// In-memory record store, optionally seeded from JSON arrays on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AnalysisRecord>>,
    samples: RwLock<Vec<Sample>>,
}

impl MemoryStore {
    pub fn new(records: Vec<AnalysisRecord>) -> Self {
        Self { records: RwLock::new(records), samples: RwLock::default() }
    }

    pub fn with_samples(self, samples: Vec<Sample>) -> Self {
        Self { samples: RwLock::new(samples), ..self }
    }

    /// Load records from a JSON file containing an array of analyses.
    pub async fn from_file(path: &Path) -> Result<Self, StoreError> {
        let records: Vec<AnalysisRecord> = read_json_array(path).await?;
        tracing::info!("Loaded {} analyses from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Replace the samples with the JSON array of samples in `path`.
    pub async fn load_samples(self, path: &Path) -> Result<Self, StoreError> {
        let samples: Vec<Sample> = read_json_array(path).await?;
        tracing::info!("Loaded {} samples from {}", samples.len(), path.display());
        Ok(self.with_samples(samples))
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn list(
        &self,
        filter: &AnalysisFilter,
        offset: u64,
        limit: u64,
    ) -> Result<RecordPage, StoreError> {
        let records = self.records.read().await;
        let matching: Vec<&AnalysisRecord> =
            records.iter().filter(|record| filter.matches(record)).collect();
        Ok(paginate(matching, offset, limit))
    }

    async fn all(&self) -> Result<Vec<AnalysisRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn group_counts(&self, key: GroupKey) -> Result<Vec<GroupCount>, StoreError> {
        let records = self.records.read().await;
        Ok(group_counts(records.iter().map(|record| key.value(record))))
    }

    async fn list_samples(
        &self,
        filter: &SampleFilter,
        offset: u64,
        limit: u64,
    ) -> Result<SamplePage, StoreError> {
        let samples = self.samples.read().await;
        let matching: Vec<&Sample> =
            samples.iter().filter(|sample| filter.matches(sample)).collect();
        Ok(paginate(matching, offset, limit))
    }
}
