//! Candidate recovery and rendering.

use crate::error::{PromptgenError, Result};
use serde_json::Value;

/// Title used when an element carries a prompt but no title.
pub const FALLBACK_TITLE: &str = "Untitled Prompt";

/// Body used when an element carries a title but no prompt.
pub const FALLBACK_PROMPT: &str = "Write about a meaningful memory.";

/// A validated title/body pair recovered from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCandidate {
    pub title: String,
    pub body: String,
}

impl PromptCandidate {
    /// Build a candidate, returning `None` when either field is blank.
    ///
    /// Both fields are trimmed; newlines inside the title become spaces. Body
    /// line endings are normalised to `\n` and whitespace-only lines become
    /// empty, so the stored body is exactly what [`Self::to_markdown`] renders.
    pub fn new(title: &str, body: &str) -> Option<Self> {
        let title = title.trim().replace("\r\n", " ").replace(['\r', '\n'], " ");
        let body = normalize_body(body);
        if title.is_empty() || body.is_empty() {
            return None;
        }
        Some(Self { title, body })
    }

    /// Render as an admonition block.
    pub fn to_markdown(&self) -> String {
        let body = self
            .body
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("    {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n!!! quote \"{}\"\n{}\n", self.title, body)
    }
}

fn normalize_body(body: &str) -> String {
    body.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate the rendered blocks of `candidates` in order.
pub fn render_fragments(candidates: &[PromptCandidate]) -> String {
    candidates.iter().map(PromptCandidate::to_markdown).collect()
}

/// Locate the JSON array inside free-form model output.
///
/// Text that already starts with `[` is returned as-is (trimmed). Otherwise
/// everything from the first `[` to the last `]` is taken, which drops
/// surrounding prose and code fences.
pub fn extract_array(raw: &str) -> Option<&str> {
    let cleaned = raw.trim();
    if cleaned.starts_with('[') {
        return Some(cleaned);
    }
    let start = cleaned.find('[')?;
    let end = cleaned.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&cleaned[start..=end])
}

/// Parse model output into candidates, in the order the model returned them.
///
/// Fails with [`PromptgenError::ModelOutput`] when no array can be recovered
/// and with [`PromptgenError::NoCandidates`] when nothing survives filtering.
pub fn parse_candidates(raw: &str) -> Result<Vec<PromptCandidate>> {
    let model_output = |detail: String| PromptgenError::ModelOutput {
        detail,
        raw: raw.to_string(),
    };

    let slice = extract_array(raw).ok_or_else(|| model_output("no JSON array found".to_string()))?;
    let value: Value = serde_json::from_str(slice).map_err(|e| model_output(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(model_output("expected a JSON array".to_string()));
    };

    let total = items.len();
    let mut candidates = Vec::with_capacity(total);
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            tracing::warn!(index, "skipping model output element that is not an object");
            continue;
        };
        if !object.contains_key("title") && !object.contains_key("prompt") {
            tracing::warn!(index, "skipping element with neither 'title' nor 'prompt'");
            continue;
        }
        let title = field_text(object.get("title"), FALLBACK_TITLE);
        let body = field_text(object.get("prompt"), FALLBACK_PROMPT);
        match PromptCandidate::new(&title, &body) {
            Some(candidate) => candidates.push(candidate),
            None => tracing::warn!(index, "skipping element with an empty title or prompt"),
        }
    }

    tracing::info!(total, kept = candidates.len(), "parsed model output");

    if candidates.is_empty() {
        return Err(PromptgenError::NoCandidates);
    }
    Ok(candidates)
}

/// Coerce a JSON field to text; absent or `null` fields take the fallback.
fn field_text(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
