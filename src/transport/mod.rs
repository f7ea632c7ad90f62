//! Chat-completion transports.
//!
//! The pipeline only needs "messages in, raw text out". [`HttpTransport`]
//! performs the real HTTPS call; [`CannedTransport`] answers offline from a
//! fixed rotation of prompts so the rest of the pipeline can be exercised
//! without credentials.

mod canned;
mod http;

pub use canned::{CANNED_PROMPTS, CannedTransport};
pub use http::HttpTransport;

use crate::config::Config;
use crate::error::Result;
use crate::request::ChatMessage;
use chrono::NaiveDate;

/// Executes one chat-completion call and returns the combined completion text.
pub trait ChatTransport {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Pick the transport matching the resolved configuration.
pub fn for_config(config: &Config, count: u32, today: NaiveDate) -> Box<dyn ChatTransport> {
    match config {
        Config::Remote(remote) => Box::new(HttpTransport::new(remote.clone())),
        Config::Canned => Box::new(CannedTransport::for_date(count, today)),
    }
}
