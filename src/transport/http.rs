//! Blocking HTTPS transport.

use super::ChatTransport;
use crate::config::{EndpointShape, RemoteConfig};
use crate::error::{PromptgenError, Result};
use crate::request::ChatMessage;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use ureq::Agent;

/// Bytes of an error response body surfaced to the user.
const ERROR_BODY_EXCERPT: usize = 500;

/// Chat-completions client for both endpoint shapes.
pub struct HttpTransport {
    config: RemoteConfig,
    agent: Agent,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl HttpTransport {
    pub fn new(config: RemoteConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { config, agent }
    }

    fn timed_out(&self) -> PromptgenError {
        PromptgenError::Transport(format!(
            "request to {} timed out after {}s",
            self.config.host,
            self.config.timeout.as_secs_f64()
        ))
    }

    fn request_body<'a>(&'a self, messages: &'a [ChatMessage]) -> CompletionRequest<'a> {
        let sampling = self.config.sampling;
        CompletionRequest {
            messages,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_tokens: sampling.max_tokens,
            model: self
                .config
                .shape
                .sends_model_in_body()
                .then_some(self.config.model.as_str()),
        }
    }
}

impl ChatTransport for HttpTransport {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = self.config.completions_url()?;
        let body = self.request_body(messages);
        tracing::debug!(
            %url,
            shape = %self.config.shape,
            messages = messages.len(),
            "sending chat completion request"
        );

        let mut request = self
            .agent
            .post(url.as_str())
            .header("api-key", self.config.api_key.as_str());
        if self.config.shape == EndpointShape::AiInference {
            request = request.header(
                "Authorization",
                format!("Bearer {}", self.config.api_key).as_str(),
            );
        }

        let start = Instant::now();
        let mut response = request.send_json(&body).map_err(|e| match e {
            ureq::Error::Timeout(_) => self.timed_out(),
            ureq::Error::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
                self.timed_out()
            }
            other => PromptgenError::Transport(format!(
                "request to {} failed: {}",
                self.config.host, other
            )),
        })?;

        let status = response.status();
        let text = response.body_mut().read_to_string().map_err(|e| {
            PromptgenError::Transport(format!("failed to read response body: {}", e))
        })?;

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_bytes = text.len(),
            "chat completion returned"
        );

        if !status.is_success() {
            return Err(PromptgenError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                excerpt(&text, ERROR_BODY_EXCERPT)
            )));
        }

        combine_choices(&text)
    }
}

/// Concatenate the text of every returned choice.
fn combine_choices(body: &str) -> Result<String> {
    let response: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        PromptgenError::Transport(format!(
            "unexpected response body ({}): {}",
            e,
            excerpt(body, ERROR_BODY_EXCERPT)
        ))
    })?;
    let combined: String = response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.and_then(|m| m.content))
        .collect();
    Ok(combined.trim().to_string())
}

fn excerpt(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
