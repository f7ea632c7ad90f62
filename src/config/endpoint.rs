//! Endpoint shape classification.

use crate::error::{PromptgenError, Result};
use url::Url;

/// The two chat-completion endpoint shapes promptgen can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointShape {
    /// Model-catalog inference endpoint; the model is named in the body.
    AiInference,
    /// Deployment-scoped REST endpoint; the deployment is part of the path.
    AzureOpenAi,
}

const AI_INFERENCE_HOSTS: &[&str] = &[
    ".services.ai.azure.com",
    ".models.ai.azure.com",
    ".inference.ai.azure.com",
];

const AZURE_OPENAI_HOSTS: &[&str] = &[".openai.azure.com", ".cognitiveservices.azure.com"];

impl EndpointShape {
    /// Classify an endpoint by its host name.
    ///
    /// Returns `None` for hosts that match neither shape.
    pub fn classify(host: &str) -> Option<Self> {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        if AZURE_OPENAI_HOSTS.iter().any(|suffix| host.ends_with(suffix)) {
            Some(Self::AzureOpenAi)
        } else if AI_INFERENCE_HOSTS.iter().any(|suffix| host.ends_with(suffix)) {
            Some(Self::AiInference)
        } else {
            None
        }
    }

    /// Label recorded in the run summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::AiInference => "ai-inference",
            Self::AzureOpenAi => "azure-openai",
        }
    }

    /// Whether the request body must carry the model identifier.
    pub fn sends_model_in_body(self) -> bool {
        matches!(self, Self::AiInference)
    }

    /// Build the chat-completions URL for this shape.
    ///
    /// Path segments and the query value are percent-encoded. Fails only for
    /// endpoints that cannot carry a path (e.g. `mailto:`).
    pub fn completions_url(self, endpoint: &Url, model: &str, api_version: &str) -> Result<Url> {
        let mut url = endpoint.clone();
        url.set_fragment(None);
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                PromptgenError::Config(format!(
                    "endpoint '{}' cannot be used as a base URL",
                    endpoint
                ))
            })?;
            segments.pop_if_empty();
            if self == Self::AzureOpenAi {
                segments.extend(["openai", "deployments", model]);
            }
            segments.extend(["chat", "completions"]);
        }
        url.query_pairs_mut().append_pair("api-version", api_version);
        Ok(url)
    }
}

impl std::fmt::Display for EndpointShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
