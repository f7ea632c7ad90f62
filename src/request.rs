//! Chat request assembly.
//!
//! Builds the two-message conversation sent to the model: a fixed system
//! instruction describing the output contract, and a user instruction with
//! the requested count and a bounded sample of previously generated content.
//! Pure; performs no I/O.

use serde::Serialize;

/// Maximum number of characters of prior content passed as dedup context.
pub const MAX_CONTEXT_CHARS: usize = 4000;

const SYSTEM_INSTRUCTION: &str = "You are an assistant that produces concise, reflective, inclusive writing prompts about personal life stories. \
Return ONLY valid JSON: an array of objects with keys 'title' and 'prompt'. Each 'prompt' should be 1-2 sentences, \
encouraging memory recall, introspection, or narrative exploration. Avoid repeating prior prompts. No markdown, no commentary.";

const THEMES: &str =
    "Focus on memories, turning points, relationships, resilience, identity, gratitude, legacy.";

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Build the ordered `[system, user]` messages for one generation request.
///
/// `prior_region` is the current content of the generated region; only its
/// last [`MAX_CONTEXT_CHARS`] characters are kept since the newest entries
/// matter most for avoiding repeats. `count` is expected to be at least 1.
pub fn build_messages(prior_region: &str, count: u32) -> Vec<ChatMessage> {
    let context = dedup_context(prior_region);
    let user = format!(
        "Generate {count} new, unique writing prompts. \
They must not duplicate prior prompts. \
{THEMES} \
Return JSON only. Here is a sample of previous generated content to avoid duplicates:\n{context}"
    );
    vec![ChatMessage::system(SYSTEM_INSTRUCTION), ChatMessage::user(user)]
}

/// Trim `prior_region` and keep at most the trailing [`MAX_CONTEXT_CHARS`] chars.
pub fn dedup_context(prior_region: &str) -> &str {
    let trimmed = prior_region.trim();
    let total = trimmed.chars().count();
    if total <= MAX_CONTEXT_CHARS {
        return trimmed;
    }
    let skip = total - MAX_CONTEXT_CHARS;
    match trimmed.char_indices().nth(skip) {
        Some((offset, _)) => &trimmed[offset..],
        None => "",
    }
}
