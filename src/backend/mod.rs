//! Classification backends behind an async boundary.
//!
//! Callers only see [`Classifier::classify`]: one URL in, one result or error
//! out. Timeouts belong to the call site (see [`crate::action`]), not here.
//!
//! - [`LocalBackend`] — the in-process [`RiskEngine`].
//! - [`remote::RemoteBackend`] — an HTTP inference service.

pub mod remote;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::ListConfig;
use crate::engine::RiskEngine;
use crate::models::ScanResult;
use crate::normalizer::NormalizedUrl;

#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    async fn classify(&self, url: &NormalizedUrl) -> Result<ScanResult>;
}

pub struct LocalBackend {
    engine: RiskEngine,
}

impl LocalBackend {
    pub fn new(lists: ListConfig) -> Self {
        Self {
            engine: RiskEngine::new(lists),
        }
    }
}

#[async_trait]
impl Classifier for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn classify(&self, url: &NormalizedUrl) -> Result<ScanResult> {
        Ok(self.engine.score(url))
    }
}
