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

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{
    feed::{Feed, ShareRow},
    payload::parse_rows,
    FetchError,
};

/// A place share rows can be fetched from.
#[async_trait::async_trait]
pub trait ShareSource: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> String;

    /// Fetch and validate the rows.
    async fn fetch(&self) -> Result<Vec<ShareRow>, FetchError>;
}

/// A candidate endpoint reached over HTTP.
pub struct HttpShareSource {
    client: Client,
    url: Url,
    feed: Feed,
    timeout: Duration,
}

impl HttpShareSource {
    /// Create a source for `url` with a per-request deadline of `timeout`.
    pub fn new(url: Url, feed: Feed, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url, feed, timeout })
    }

    /// The candidate URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl ShareSource for HttpShareSource {
    fn name(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<ShareRow>, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| FetchError::from_transport(err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body =
            response.text().await.map_err(|err| FetchError::from_transport(err, self.timeout))?;
        parse_rows(&body, self.feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn source(server: &MockServer, path: &str, feed: Feed) -> HttpShareSource {
        let url = Url::parse(&server.url(path)).unwrap();
        HttpShareSource::new(url, feed, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_rows() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/analisis/porcentaje");
            then.status(200).json_body(json!({
                "success": true,
                "count": 1,
                "data": [{ "requester": "LAB", "count": 1, "percentage": "100.00%" }]
            }));
        });

        let rows = source(&server, "/analisis/porcentaje", Feed::Requester).fetch().await.unwrap();

        mock.assert();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "LAB");
    }

    #[tokio::test]
    async fn test_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/analisis/porcentaje");
            then.status(503).json_body(json!({ "success": false, "message": "down", "data": [] }));
        });

        let err =
            source(&server, "/analisis/porcentaje", Feed::Requester).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert_eq!(err.to_string(), "Error 503: Service Unavailable");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).json_body(json!([])).delay(Duration::from_millis(800));
        });

        let url = Url::parse(&server.url("/slow")).unwrap();
        let source =
            HttpShareSource::new(url, Feed::Requester, Duration::from_millis(100)).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "{err}");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let url = Url::parse("http://127.0.0.1:1/analisis/porcentaje").unwrap();
        let source = HttpShareSource::new(url, Feed::Requester, Duration::from_secs(1)).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_) | FetchError::Timeout(_)), "{err}");
    }
}
