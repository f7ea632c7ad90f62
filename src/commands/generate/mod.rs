//! The generation pipeline.
//!
//! One run performs, in order:
//! 1. Read the target document and capture the current generated region
//! 2. Build the chat messages and call the transport
//! 3. Parse the raw response into candidates
//! 4. Write the run summary (also when no candidates survived)
//! 5. Print the markdown (dry run) or splice it in and atomically replace
//!    the document
//!
//! The document is written at most once, after every check has passed.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{PromptgenError, Result};
use crate::fs::{atomic_write, read_document};
use crate::reconcile::{
    MarkerPair, PromptCandidate, existing_region, parse_candidates, render_fragments, splice,
};
use crate::request::{build_messages, dedup_context};
use crate::run_summary::RunSummary;
use crate::transport::ChatTransport;
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Inputs of one run that come from the command line.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub count: u32,
    pub dry_run: bool,
    pub show_raw: bool,
    pub file: PathBuf,
    pub summary: PathBuf,
}

impl From<&Cli> for GenerateOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            count: cli.count,
            dry_run: cli.dry_run,
            show_raw: cli.show_raw,
            file: cli.file.clone(),
            summary: cli.summary.clone(),
        }
    }
}

/// State of a single invocation.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub count: u32,
    /// Bounded tail of the previous generated region.
    pub prior_context: String,
    pub candidates: Vec<PromptCandidate>,
    pub mode: &'static str,
}

/// Execute the pipeline, printing user-facing output to `out`.
pub fn run<W: Write>(
    options: &GenerateOptions,
    config: &Config,
    transport: &dyn ChatTransport,
    today: NaiveDate,
    out: &mut W,
) -> Result<GenerationRun> {
    let markers = MarkerPair::default();
    let source = options.file.display().to_string();
    let document = read_document(&options.file)?;

    // Fail before spending a model call on a document we could not update.
    if !options.dry_run && markers.region(&document).is_none() {
        return Err(PromptgenError::MissingMarkers(source));
    }

    let mut run = GenerationRun {
        count: options.count,
        prior_context: dedup_context(existing_region(&document, &markers)).to_string(),
        candidates: Vec::new(),
        mode: config.mode_label(),
    };

    let messages = build_messages(&run.prior_context, run.count);
    let raw = transport.complete(&messages)?;
    tracing::debug!(raw_bytes = raw.len(), "received model output");

    if options.show_raw {
        emit(out, &format!("--- RAW MODEL OUTPUT ---\n{raw}\n"))?;
    }

    let parsed = parse_candidates(&raw);
    match &parsed {
        Ok(candidates) => record_summary(config, candidates.len(), &options.summary),
        Err(PromptgenError::NoCandidates) => record_summary(config, 0, &options.summary),
        Err(_) => {}
    }
    run.candidates = parsed?;

    let fragments = render_fragments(&run.candidates);

    if options.dry_run {
        tracing::info!(
            mode = run.mode,
            prompts = run.candidates.len(),
            "dry run, document left unchanged"
        );
        emit(
            out,
            &format!("--- DRY RUN: Generated Prompts Markdown ---\n{fragments}\n"),
        )?;
        return Ok(run);
    }

    let updated = splice(&document, &fragments, today, &markers, &source)?;
    atomic_write(&options.file, &updated)?;
    tracing::info!(
        mode = run.mode,
        file = %source,
        prompts = run.candidates.len(),
        "updated document"
    );
    emit(
        out,
        &format!(
            "Successfully wrote {} prompts to {}\n",
            run.candidates.len(),
            source
        ),
    )?;

    Ok(run)
}

/// Write the run summary; a failure here is reported but does not abort the run.
fn record_summary(config: &Config, count: usize, path: &std::path::Path) {
    if let Err(err) = RunSummary::new(config, count).write(path) {
        tracing::warn!(path = %path.display(), error = %err, "could not write run summary");
    }
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| PromptgenError::Io(format!("failed to write output: {}", e)))
}
