//! Service configuration.

use crate::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Tunables of the operation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Maximum number of friendship hops explored by traversal queries.
    pub max_traversal_depth: usize,
    /// Page size used when a collection request gives no `count`.
    pub default_page_size: usize,
    /// Upper bound for a requested `count`.
    pub max_page_size: usize,
    /// `EnvFilter` directive passed to [`crate::init_logging`].
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_traversal_depth: 3,
            default_page_size: 20,
            max_page_size: 100,
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json(contents: &str) -> ServiceResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_toml(contents: &str) -> ServiceResult<Self> {
        toml::from_str(contents).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Loads a configuration file. `.toml` files are parsed as TOML, anything
    /// else as JSON. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_json(&contents)?,
        };
        info!(path = %path.display(), "loaded service configuration");
        Ok(config.validated())
    }

    /// Clamps inconsistent values: the default page never exceeds the maximum,
    /// and both are at least one.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.max_page_size = self.max_page_size.max(1);
        self.default_page_size = self.default_page_size.clamp(1, self.max_page_size);
        self
    }
}
