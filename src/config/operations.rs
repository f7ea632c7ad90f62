//! Config loading and validation.

use super::endpoint::EndpointShape;
use super::model::*;
use crate::error::{PromptgenError, Result};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

impl Config {
    /// Build the run configuration from the process environment.
    ///
    /// In canned mode no variables are required and none are read.
    pub fn from_env(canned: bool) -> Result<Self> {
        Self::from_lookup(canned, |name| std::env::var(name).ok())
    }

    /// Build the run configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as missing. All missing required variables are
    /// reported together, before any network activity.
    pub fn from_lookup<F>(canned: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if canned {
            return Ok(Config::Canned);
        }

        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = get(ENV_ENDPOINT);
        let api_key = get(ENV_KEY);
        let model = get(ENV_MODEL);

        let (Some(endpoint), Some(api_key), Some(model)) = (endpoint, api_key, model) else {
            let missing: Vec<&str> = [ENV_ENDPOINT, ENV_KEY, ENV_MODEL]
                .into_iter()
                .filter(|name| get(*name).is_none())
                .collect();
            return Err(PromptgenError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let (endpoint, host) = parse_endpoint(&endpoint)?;
        let shape = EndpointShape::classify(&host).ok_or_else(|| {
            PromptgenError::Config(format!(
                "unrecognized endpoint host '{}' in {}; expected an Azure AI inference or Azure OpenAI host",
                host, ENV_ENDPOINT
            ))
        })?;

        let defaults = Sampling::default();
        let sampling = Sampling {
            temperature: parse_optional(&get, ENV_TEMPERATURE)?.unwrap_or(defaults.temperature),
            top_p: parse_optional(&get, ENV_TOP_P)?.unwrap_or(defaults.top_p),
            max_tokens: parse_optional(&get, ENV_MAX_TOKENS)?.unwrap_or(defaults.max_tokens),
        };
        let timeout_secs: u64 =
            parse_optional(&get, ENV_TIMEOUT_SECS)?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = RemoteConfig {
            endpoint,
            host,
            shape,
            api_key,
            model,
            api_version: get(ENV_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            sampling,
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        config.completions_url()?;

        if config.api_key.len() < SHORT_KEY_THRESHOLD {
            tracing::warn!(
                key_len = config.api_key.len(),
                "{} looks unusually short; requests may be rejected",
                ENV_KEY
            );
        }

        Ok(Config::Remote(config))
    }
}

impl RemoteConfig {
    /// Validate sampling and timeout values.
    ///
    /// Validation rules:
    /// - `temperature` must be within 0.0..=2.0
    /// - `top_p` must be within 0.0..=1.0
    /// - `max_tokens` and the timeout must be positive
    pub fn validate(&self) -> Result<()> {
        let sampling = &self.sampling;
        if !(0.0..=2.0).contains(&sampling.temperature) {
            return Err(PromptgenError::Config(format!(
                "config validation failed: {} must be between 0 and 2 (found {})",
                ENV_TEMPERATURE, sampling.temperature
            )));
        }
        if !(0.0..=1.0).contains(&sampling.top_p) {
            return Err(PromptgenError::Config(format!(
                "config validation failed: {} must be between 0 and 1 (found {})",
                ENV_TOP_P, sampling.top_p
            )));
        }
        if sampling.max_tokens == 0 {
            return Err(PromptgenError::Config(format!(
                "config validation failed: {} must be greater than 0",
                ENV_MAX_TOKENS
            )));
        }
        if self.timeout.is_zero() {
            return Err(PromptgenError::Config(format!(
                "config validation failed: {} must be greater than 0",
                ENV_TIMEOUT_SECS
            )));
        }
        Ok(())
    }
}

/// Parse the configured endpoint, returning it with its host name.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<(Url, String)> {
    let url = Url::parse(endpoint).map_err(|e| {
        PromptgenError::Config(format!(
            "invalid {} '{}': {}",
            ENV_ENDPOINT, endpoint, e
        ))
    })?;
    if url.scheme() != "https" {
        return Err(PromptgenError::Config(format!(
            "{} must use https (found '{}')",
            ENV_ENDPOINT,
            url.scheme()
        )));
    }
    let host = url
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| PromptgenError::Config(format!("{} has no host", ENV_ENDPOINT)))?;
    Ok((url, host))
}

fn parse_optional<T, G>(get: &G, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
            PromptgenError::Config(format!("invalid {} '{}': {}", name, raw, e))
        }),
    }
}
