//! Config structs and defaults.

use super::endpoint::EndpointShape;
use crate::error::Result;
use std::time::Duration;
use url::Url;

pub(crate) const ENV_ENDPOINT: &str = "AZURE_AI_ENDPOINT";
pub(crate) const ENV_KEY: &str = "AZURE_AI_KEY";
pub(crate) const ENV_MODEL: &str = "AZURE_AI_MODEL";
pub(crate) const ENV_API_VERSION: &str = "AZURE_AI_API_VERSION";
pub(crate) const ENV_TEMPERATURE: &str = "AZURE_AI_TEMPERATURE";
pub(crate) const ENV_TOP_P: &str = "AZURE_AI_TOP_P";
pub(crate) const ENV_MAX_TOKENS: &str = "AZURE_AI_MAX_TOKENS";
pub(crate) const ENV_TIMEOUT_SECS: &str = "PROMPTGEN_TIMEOUT_SECS";

pub(crate) const DEFAULT_API_VERSION: &str = "2024-05-01-preview";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Keys shorter than this are suspicious but not rejected.
pub(crate) const SHORT_KEY_THRESHOLD: usize = 20;

/// Sampling parameters sent with every chat request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.95,
            max_tokens: 800,
        }
    }
}

/// Everything needed to reach the hosted model.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Endpoint URL as configured.
    pub endpoint: Url,
    /// Host part of `endpoint`, used for classification and the run summary.
    pub host: String,
    pub shape: EndpointShape,
    pub api_key: String,
    /// Model name (inference shape) or deployment name (deployment shape).
    pub model: String,
    pub api_version: String,
    pub sampling: Sampling,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Fully-qualified chat-completions URL.
    pub fn completions_url(&self) -> Result<Url> {
        self.shape
            .completions_url(&self.endpoint, &self.model, &self.api_version)
    }
}

// Hand-written so the API key never reaches a log line.
impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint", &self.endpoint)
            .field("host", &self.host)
            .field("shape", &self.shape)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("sampling", &self.sampling)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub enum Config {
    /// Call the hosted model.
    Remote(RemoteConfig),
    /// Offline mode: canned candidates, no credentials required.
    Canned,
}

impl Config {
    /// Mode classification recorded in the run summary.
    pub fn mode_label(&self) -> &'static str {
        match self {
            Config::Remote(remote) => remote.shape.label(),
            Config::Canned => "mock",
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Config::Remote(remote) => Some(&remote.model),
            Config::Canned => None,
        }
    }

    pub fn endpoint_host(&self) -> Option<&str> {
        match self {
            Config::Remote(remote) => Some(&remote.host),
            Config::Canned => None,
        }
    }
}
