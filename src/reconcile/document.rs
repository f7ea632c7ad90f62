//! Marker-delimited region handling.

use crate::error::{PromptgenError, Result};
use chrono::NaiveDate;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Default start marker line.
pub const MARKER_START: &str = "<!-- AI-GENERATED-PROMPTS:START -->";

/// Default end marker line.
pub const MARKER_END: &str = "<!-- AI-GENERATED-PROMPTS:END -->";

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| region_pattern(MARKER_START, MARKER_END));

/// The two sentinel lines delimiting the generated region.
#[derive(Debug, Clone)]
pub struct MarkerPair {
    start: String,
    end: String,
    pattern: Regex,
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self {
            start: MARKER_START.to_string(),
            end: MARKER_END.to_string(),
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl MarkerPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        let start = start.into();
        let end = end.into();
        let pattern = region_pattern(&start, &end);
        Self {
            start,
            end,
            pattern,
        }
    }

    /// Content between the first start/end pair, if any.
    pub fn region<'a>(&self, document: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(document)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

fn region_pattern(start: &str, end: &str) -> Regex {
    let pattern = format!("(?s){}(.*?){}", regex::escape(start), regex::escape(end));
    Regex::new(&pattern).expect("escaped marker pattern is valid")
}

/// Current generated region of `document`, or `""` when the markers are absent.
pub fn existing_region<'a>(document: &'a str, markers: &MarkerPair) -> &'a str {
    markers.region(document).unwrap_or("")
}

/// Replace the first marker-delimited region of `document`.
///
/// The new region holds a dated heading followed by `fragments`. Everything
/// outside the first marker pair is returned unchanged; later pairs are left
/// alone. `source` names the document in the error when markers are missing.
pub fn splice(
    document: &str,
    fragments: &str,
    date: NaiveDate,
    markers: &MarkerPair,
    source: &str,
) -> Result<String> {
    if !markers.pattern.is_match(document) {
        return Err(PromptgenError::MissingMarkers(source.to_string()));
    }
    let replacement = format!(
        "{}\n\n### AI Generated Prompts - {}\n{}\n{}",
        markers.start,
        date.format("%Y-%m-%d"),
        fragments,
        markers.end
    );
    Ok(markers
        .pattern
        .replacen(document, 1, NoExpand(&replacement))
        .into_owned())
}
