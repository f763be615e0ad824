use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::Classifier;
use crate::models::ScanResult;
use crate::normalizer::NormalizedUrl;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    url: &'a str,
}

/// Classifier served over HTTP.
///
/// Sends `POST {endpoint}` with `{"url": "..."}` and expects a
/// [`ScanResult`] JSON body. Failures are returned as-is; nothing is retried.
pub struct RemoteBackend {
    client: Client,
    endpoint: String,
}

impl RemoteBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Classifier for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, url: &NormalizedUrl) -> Result<ScanResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", concat!("url-checkr/", env!("CARGO_PKG_VERSION")))
            .header("Accept", "application/json")
            .json(&ClassifyRequest { url: url.as_str() })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("classification backend returned HTTP {}", status);
        }

        Ok(response.json::<ScanResult>().await?)
    }
}
