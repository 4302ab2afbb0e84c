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

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

use crate::{
    feed::Feed,
    fetcher::ShareFetcher,
    source::{HttpShareSource, ShareSource},
    FetchError,
};

/// Default service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default per-attempt deadline, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Share fetcher configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Address the candidate paths are resolved against
    pub base_url: String,
    /// Feed to fetch
    pub feed: Feed,
    /// Deadline for each candidate attempt
    pub timeout_secs: u64,
    /// Explicit candidate list, paths or absolute URLs, replacing the feed's defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            feed: Feed::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            candidates: None,
        }
    }
}

impl FetcherConfig {
    /// Load the config from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .await
            .context(format!("Failed to read config file from {path:?}"))?;
        toml::from_str(&data).context(format!("Failed to parse toml file from {path:?}"))
    }

    /// Per-attempt deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the candidates to URLs, in the order they are tried.
    ///
    /// Absolute URLs are used as given; anything else is a path appended to
    /// `base_url`.
    pub fn candidate_urls(&self) -> Result<Vec<Url>, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let candidates: Vec<&str> = match &self.candidates {
            Some(candidates) => candidates.iter().map(String::as_str).collect(),
            None => self.feed.default_paths().to_vec(),
        };

        candidates
            .into_iter()
            .map(|candidate| {
                let raw = if candidate.contains("://") {
                    candidate.to_string()
                } else {
                    format!("{base}/{}", candidate.trim_start_matches('/'))
                };
                Url::parse(&raw)
                    .map_err(|err| FetchError::Config(format!("invalid candidate {raw:?}: {err}")))
            })
            .collect()
    }

    /// Build a fetcher with one HTTP source per candidate.
    pub fn build(&self) -> Result<ShareFetcher, FetchError> {
        if self.timeout_secs == 0 {
            return Err(FetchError::Config("timeout_secs must be greater than 0".into()));
        }

        let sources = self
            .candidate_urls()?
            .into_iter()
            .map(|url| {
                HttpShareSource::new(url, self.feed, self.timeout())
                    .map(|source| Arc::new(source) as Arc<dyn ShareSource>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ShareFetcher::new(self.feed, sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_candidates() {
        let urls = FetcherConfig::default().candidate_urls().unwrap();
        assert_eq!(
            urls.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec![
                "http://localhost:3000/analisis/porcentaje",
                "http://localhost:3000/analisis/porcentaje-simple"
            ]
        );

        let config = FetcherConfig {
            base_url: "http://lab.local:8080/".into(),
            feed: Feed::Client,
            ..Default::default()
        };
        let urls = config.candidate_urls().unwrap();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0].as_str(), "http://lab.local:8080/api/analisis/clientes/porcentaje");
    }

    #[test]
    fn test_explicit_candidates() {
        let config = FetcherConfig {
            candidates: Some(vec!["stats".into(), "https://backup.example.com/shares".into()]),
            ..Default::default()
        };
        let urls = config.candidate_urls().unwrap();
        assert_eq!(urls[0].as_str(), "http://localhost:3000/stats");
        assert_eq!(urls[1].as_str(), "https://backup.example.com/shares");
    }

    #[test]
    fn test_invalid_config() {
        let config = FetcherConfig { base_url: "not a url".into(), ..Default::default() };
        assert!(matches!(config.candidate_urls(), Err(FetchError::Config(_))));

        let config = FetcherConfig { timeout_secs: 0, ..Default::default() };
        assert!(matches!(config.build(), Err(FetchError::Config(_))));
    }

    #[test]
    fn test_build_keeps_order() {
        let fetcher = FetcherConfig::default().build().unwrap();
        assert_eq!(fetcher.feed(), Feed::Requester);
        assert_eq!(
            fetcher.candidates(),
            vec![
                "http://localhost:3000/analisis/porcentaje",
                "http://localhost:3000/analisis/porcentaje-simple"
            ]
        );
    }

    #[tokio::test]
    async fn test_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://10.0.0.2:3000\"\nfeed = \"client\"").unwrap();

        let config = FetcherConfig::load(file.path()).await.unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:3000");
        assert_eq!(config.feed, Feed::Client);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.candidates.is_none());
    }

    #[tokio::test]
    async fn test_load_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "feed = \"supplier\"").unwrap();

        let err = FetcherConfig::load(file.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse toml"));
    }
}
