//! Offline transport backed by a fixed rotation of prompts.

use super::ChatTransport;
use crate::error::{PromptgenError, Result};
use crate::request::ChatMessage;
use chrono::{Datelike, NaiveDate};
use serde_json::json;

/// Canned (title, prompt) pairs served in rotation.
pub const CANNED_PROMPTS: &[(&str, &str)] = &[
    (
        "The Kitchen Table",
        "Describe a conversation that happened around a kitchen table and why it stayed with you.",
    ),
    (
        "First Departure",
        "Write about the first time you left home for longer than a week and what you carried with you.",
    ),
    (
        "A Borrowed Lesson",
        "Recall advice you ignored at the time but later found to be true.",
    ),
    (
        "Hands at Work",
        "Describe someone you love through the way they used their hands.",
    ),
    (
        "The Long Way Round",
        "Write about a detour, literal or otherwise, that changed the direction of your life.",
    ),
    (
        "Small Mercies",
        "Recall a moment when a stranger's kindness arrived exactly when you needed it.",
    ),
    (
        "What Remains",
        "Describe an object you have kept for years and the story it holds.",
    ),
    (
        "Quiet Courage",
        "Write about a time you chose to be brave when no one else was watching.",
    ),
];

/// Answers every request with `count` canned prompts, starting at `offset`.
#[derive(Debug, Clone, Copy)]
pub struct CannedTransport {
    count: usize,
    offset: usize,
}

impl CannedTransport {
    pub fn new(count: u32, offset: usize) -> Self {
        Self {
            count: count as usize,
            offset: offset % CANNED_PROMPTS.len(),
        }
    }

    /// Rotation keyed on the day of the year, so consecutive days differ.
    pub fn for_date(count: u32, date: NaiveDate) -> Self {
        Self::new(count, date.ordinal0() as usize)
    }

    fn selection(&self) -> impl Iterator<Item = &'static (&'static str, &'static str)> {
        CANNED_PROMPTS
            .iter()
            .cycle()
            .skip(self.offset)
            .take(self.count)
    }
}

impl ChatTransport for CannedTransport {
    fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        let items: Vec<_> = self
            .selection()
            .map(|(title, prompt)| json!({ "title": title, "prompt": prompt }))
            .collect();
        tracing::info!(count = items.len(), offset = self.offset, "serving canned prompts");
        serde_json::to_string(&items)
            .map_err(|e| PromptgenError::Transport(format!("failed to encode canned prompts: {}", e)))
    }
}
