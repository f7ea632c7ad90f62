//! Run summary side file.
//!
//! A small JSON record written after candidate resolution so scheduled runs
//! can be audited afterwards:
//!
//! ```json
//! {
//!   "timestamp": "2024-01-01T06:00:00Z",
//!   "mode": "azure-openai",
//!   "count": 5,
//!   "model": "gpt-4o-mini",
//!   "endpoint_host": "my-resource.openai.azure.com",
//!   "machine": "runner-42"
//! }
//! ```

use crate::config::Config;
use crate::error::{PromptgenError, Result};
use crate::fs::atomic_write;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Audit record for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the candidates were resolved.
    pub timestamp: DateTime<Utc>,
    /// `ai-inference`, `azure-openai` or `mock`.
    pub mode: String,
    /// Number of candidates that survived filtering.
    pub count: usize,
    pub model: Option<String>,
    pub endpoint_host: Option<String>,
    /// Host name of the machine that ran the job.
    pub machine: String,
}

impl RunSummary {
    /// Summarize a run with the current time and machine name.
    pub fn new(config: &Config, count: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            mode: config.mode_label().to_string(),
            count,
            model: config.model().map(str::to_string),
            endpoint_host: config.endpoint_host().map(str::to_string),
            machine: machine_name(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PromptgenError::Io(format!("failed to serialize run summary: {}", e)))
    }

    /// Atomically write the summary to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        atomic_write(path, &json)?;
        tracing::info!(path = %path.display(), mode = %self.mode, count = self.count, "wrote run summary");
        Ok(())
    }
}

fn machine_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
