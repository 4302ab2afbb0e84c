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

//! Client for the lab share endpoints.
//!
//! A [ShareFetcher] tries its candidate endpoints in order and hands back a
//! [FetchState] that always has rows to show: live rows from the first
//! candidate that answers with valid data, or the substitute rows together
//! with an error message.

#![deny(missing_docs)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// File and command line configuration of the fetcher
pub mod config;
mod error;
/// Share feeds and the rows they produce
pub mod feed;
/// Ordered candidate fetching with substitute fallback
pub mod fetcher;
pub mod payload;
/// Candidate sources the fetcher draws rows from
pub mod source;
/// Caller-owned fetch state
pub mod state;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use feed::{Feed, ShareRow};
pub use fetcher::ShareFetcher;
pub use source::{HttpShareSource, ShareSource};
pub use state::{FetchState, FetchStatus};

/// Command line arguments for `lab-shares`
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// TOML config file
    #[clap(long, env = "LAB_SHARES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the lab service
    #[clap(long, env = "LAB_API_URL")]
    pub base_url: Option<String>,

    /// Feed to fetch
    #[clap(long, value_enum)]
    pub feed: Option<Feed>,

    /// Deadline for each candidate attempt, in seconds
    #[clap(long)]
    pub timeout_secs: Option<u64>,

    /// Print the fetch state as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

impl Args {
    /// Load the config file, if any, and apply the command line overrides.
    pub async fn resolve_config(&self) -> Result<FetcherConfig> {
        let mut config = match &self.config {
            Some(path) => FetcherConfig::load(path).await?,
            None => FetcherConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(feed) = self.feed {
            config.feed = feed;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }

        Ok(config)
    }
}

/// Render rows as a plain text table.
pub fn render_table(feed: Feed, rows: &[ShareRow]) -> String {
    let header = match feed {
        Feed::Requester => "REQUESTER",
        Feed::Client => "CLIENT",
    };
    let width =
        rows.iter().map(|r| r.label.chars().count()).chain([header.len()]).max().unwrap_or(0);

    let mut out = format!("{header:<width$}  {:>6}  {:>8}\n", "COUNT", "SHARE");
    for row in rows {
        let percentage = row.percentage.as_ref().map(ToString::to_string).unwrap_or_default();
        out.push_str(&format!("{:<width$}  {:>6}  {:>8}\n", row.label, row.count, percentage));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_analytics::Percentage;
    use std::io::Write;

    #[tokio::test]
    async fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://file:3000\"\ntimeout_secs = 9\nfeed = \"client\"")
            .unwrap();
        let path = file.path().to_str().unwrap();

        let args =
            Args::parse_from(["lab-shares", "--config", path, "--base-url", "http://cli:4000"]);
        let config = args.resolve_config().await.unwrap();

        assert_eq!(config.base_url, "http://cli:4000");
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.feed, Feed::Client);

        let args = Args::parse_from(["lab-shares", "--feed", "requester", "--timeout-secs", "2"]);
        let config = args.resolve_config().await.unwrap();
        assert_eq!(config.feed, Feed::Requester);
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn test_render_table() {
        let rows = vec![
            ShareRow {
                label: "AGUAS CORDOBESAS S.A.".into(),
                count: 45.0,
                percentage: Some(Percentage::Text("35.16%".into())),
            },
            ShareRow { label: "OTROS".into(), count: 6.0, percentage: None },
        ];
        let table = render_table(Feed::Requester, &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("REQUESTER"));
        assert!(lines[1].starts_with("AGUAS CORDOBESAS S.A."));
        assert!(lines[1].ends_with("35.16%"));
        assert!(lines[2].contains(" 6"));
    }
}
