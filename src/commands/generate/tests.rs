//! Tests for the generation pipeline.

use super::*;
use crate::exit_codes;
use crate::request::{ChatMessage, Role};
use crate::transport::CannedTransport;
use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

const DOCUMENT: &str = "Intro\n<!-- AI-GENERATED-PROMPTS:START -->\nold\n<!-- AI-GENERATED-PROMPTS:END -->\nOutro";

/// Transport that records every request and answers with a fixed reply.
struct ScriptedTransport {
    reply: Result<String>,
    calls: RefCell<Vec<Vec<ChatMessage>>>,
}

impl ScriptedTransport {
    fn replying(raw: &str) -> Self {
        Self {
            reply: Ok(raw.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(PromptgenError::Transport(message.to_string())),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ChatTransport for ScriptedTransport {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.borrow_mut().push(messages.to_vec());
        match &self.reply {
            Ok(raw) => Ok(raw.clone()),
            Err(PromptgenError::Transport(msg)) => Err(PromptgenError::Transport(msg.clone())),
            Err(other) => panic!("unsupported scripted error: {other}"),
        }
    }
}

fn options(dir: &Path, dry_run: bool, show_raw: bool) -> GenerateOptions {
    GenerateOptions {
        count: 2,
        dry_run,
        show_raw,
        file: dir.join("prompts.md"),
        summary: dir.join("prompts.run.json"),
    }
}

fn new_year() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn run_with(
    opts: &GenerateOptions,
    transport: &dyn ChatTransport,
) -> (Result<GenerationRun>, String) {
    let mut out = Vec::new();
    let result = run(opts, &Config::Canned, transport, new_year(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_run_splices_prompts_into_document() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, out) = run_with(&opts, &transport);
    let run = result.unwrap();

    assert_eq!(run.candidates.len(), 1);
    assert_eq!(run.mode, "mock");
    assert_eq!(
        std::fs::read_to_string(&opts.file).unwrap(),
        "Intro\n<!-- AI-GENERATED-PROMPTS:START -->\n\n### AI Generated Prompts - 2024-01-01\n\n!!! quote \"A\"\n    B\n\n<!-- AI-GENERATED-PROMPTS:END -->\nOutro"
    );
    assert!(out.contains("Successfully wrote 1 prompts to"));
    assert!(opts.summary.exists());
}

#[test]
fn test_prior_region_is_sent_as_context() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, _) = run_with(&opts, &transport);
    assert_eq!(result.unwrap().prior_context, "old");

    let calls = transport.calls.borrow();
    assert_eq!(calls.len(), 1);
    let user = calls[0].iter().find(|m| m.role == Role::User).unwrap();
    assert!(user.content.starts_with("Generate 2 new, unique writing prompts."));
    assert!(user.content.ends_with("avoid duplicates:\nold"));
}

#[test]
fn test_dry_run_prints_markdown_and_leaves_document() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), true, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, out) = run_with(&opts, &transport);
    result.unwrap();

    assert_eq!(std::fs::read_to_string(&opts.file).unwrap(), DOCUMENT);
    assert!(out.starts_with("--- DRY RUN: Generated Prompts Markdown ---\n"));
    assert!(out.contains("!!! quote \"A\"\n    B\n"));
    assert!(opts.summary.exists());
}

#[test]
fn test_dry_run_tolerates_missing_markers() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), true, false);
    std::fs::write(&opts.file, "no markers here").unwrap();
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, _) = run_with(&opts, &transport);
    assert_eq!(result.unwrap().prior_context, "");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn test_missing_markers_fail_before_calling_model() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, "no markers here").unwrap();
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, out) = run_with(&opts, &transport);
    let err = result.unwrap_err();

    assert!(matches!(err, PromptgenError::MissingMarkers(_)));
    assert_eq!(err.exit_code(), exit_codes::MISSING_MARKERS);
    assert_eq!(transport.call_count(), 0);
    assert_eq!(
        std::fs::read_to_string(&opts.file).unwrap(),
        "no markers here"
    );
    assert!(out.is_empty());
    assert!(!opts.summary.exists());
}

#[test]
fn test_missing_document_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    let transport = ScriptedTransport::replying("[]");

    let (result, _) = run_with(&opts, &transport);
    assert_eq!(result.unwrap_err().exit_code(), exit_codes::CONFIG_ERROR);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_zero_candidates_write_summary_but_not_document() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::replying(r#"[{"bad": 1}, 7]"#);

    let (result, _) = run_with(&opts, &transport);

    assert!(matches!(result.unwrap_err(), PromptgenError::NoCandidates));
    assert_eq!(std::fs::read_to_string(&opts.file).unwrap(), DOCUMENT);

    let summary: RunSummary =
        serde_json::from_str(&std::fs::read_to_string(&opts.summary).unwrap()).unwrap();
    assert_eq!(summary.count, 0);
    assert_eq!(summary.mode, "mock");
}

#[test]
fn test_unparseable_output_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::replying("I'm sorry, I can't help with that.");

    let (result, _) = run_with(&opts, &transport);
    let err = result.unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::MODEL_OUTPUT_FAILURE);
    assert!(err.to_string().contains("I'm sorry"));
    assert_eq!(std::fs::read_to_string(&opts.file).unwrap(), DOCUMENT);
    assert!(!opts.summary.exists());
}

#[test]
fn test_transport_failure_leaves_everything_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = ScriptedTransport::failing("HTTP 401: unauthorized");

    let (result, _) = run_with(&opts, &transport);

    assert_eq!(result.unwrap_err().exit_code(), exit_codes::TRANSPORT_FAILURE);
    assert_eq!(std::fs::read_to_string(&opts.file).unwrap(), DOCUMENT);
    assert!(!opts.summary.exists());
}

#[test]
fn test_show_raw_echoes_model_output() {
    let temp_dir = TempDir::new().unwrap();
    let opts = options(temp_dir.path(), true, true);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let raw = "```json\n[{\"title\":\"A\",\"prompt\":\"B\"}]\n```";
    let transport = ScriptedTransport::replying(raw);

    let (result, out) = run_with(&opts, &transport);
    result.unwrap();

    assert!(out.starts_with(&format!("--- RAW MODEL OUTPUT ---\n{raw}\n")));
    assert!(out.contains("--- DRY RUN: Generated Prompts Markdown ---"));
}

#[test]
fn test_summary_write_failure_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let mut opts = options(temp_dir.path(), false, false);
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    // A regular file where the summary's parent directory should be.
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    opts.summary = blocker.join("prompts.run.json");
    let transport = ScriptedTransport::replying(r#"[{"title":"A","prompt":"B"}]"#);

    let (result, _) = run_with(&opts, &transport);

    assert_eq!(result.unwrap().candidates.len(), 1);
    assert!(
        std::fs::read_to_string(&opts.file)
            .unwrap()
            .contains("!!! quote \"A\"")
    );
}

#[test]
fn test_canned_run_end_to_end_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    let mut opts = options(temp_dir.path(), false, false);
    opts.count = 3;
    std::fs::write(&opts.file, DOCUMENT).unwrap();
    let transport = CannedTransport::for_date(opts.count, new_year());

    let (first, _) = run_with(&opts, &transport);
    assert_eq!(first.unwrap().candidates.len(), 3);
    let after_first = std::fs::read_to_string(&opts.file).unwrap();

    let (second, _) = run_with(&opts, &transport);
    second.unwrap();
    let after_second = std::fs::read_to_string(&opts.file).unwrap();

    assert_eq!(after_first, after_second);
    assert!(after_second.starts_with("Intro\n"));
    assert!(after_second.ends_with("\nOutro"));
    assert_eq!(after_second.matches("!!! quote").count(), 3);
    assert!(!after_second.contains("\nold\n"));
}
