//! Resource sources the simulated remote reads from

use std::collections::HashMap;
use std::path::PathBuf;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::utils::errors::{CampusError, Result};

/// Underlying transport for static JSON resources
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Read and parse `resource`.
    ///
    /// Unreadable or malformed resources fail with
    /// [`CampusError::ResourceNotFound`].
    async fn read(&self, resource: &str) -> Result<Value>;
}

fn not_found(resource: &str, reason: impl ToString) -> CampusError {
    CampusError::ResourceNotFound {
        resource: resource.to_string(),
        reason: reason.to_string(),
    }
}

/// JSON files below a fixtures directory
#[derive(Debug, Clone)]
pub struct FixtureSource {
    root: PathBuf,
}

impl FixtureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceSource for FixtureSource {
    async fn read(&self, resource: &str) -> Result<Value> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "Reading fixture");

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| not_found(resource, e))?;
        serde_json::from_str(&contents).map_err(|e| not_found(resource, e))
    }
}

/// Resources fetched over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins drop the last path segment unless it ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn read(&self, resource: &str) -> Result<Value> {
        let url = self.base_url.join(resource)?;
        debug!(url = %url, "Fetching resource");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(not_found(resource, format!("HTTP {}", response.status())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| not_found(resource, e))
    }
}

/// Fixed in-memory documents
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: impl Into<String>, document: Value) -> Self {
        self.documents.insert(resource.into(), document);
        self
    }
}

#[async_trait]
impl ResourceSource for StaticSource {
    async fn read(&self, resource: &str) -> Result<Value> {
        self.documents
            .get(resource)
            .cloned()
            .ok_or_else(|| not_found(resource, "no such document"))
    }
}
