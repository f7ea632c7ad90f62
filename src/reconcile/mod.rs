//! Model-output reconciliation.
//!
//! Turns arbitrary text returned by the model into a markdown splice:
//!
//! 1. recover a JSON array from the text ([`extract_array`])
//! 2. parse it and keep the well-formed elements ([`parse_candidates`])
//! 3. render each candidate as an admonition block ([`render_fragments`])
//! 4. replace the marker-delimited region of the document ([`splice`])
//!
//! Individual malformed elements are dropped with a warning; only an
//! unparseable payload or an empty result fails the run.

mod candidate;
mod document;


pub use candidate::{
    FALLBACK_PROMPT, FALLBACK_TITLE, PromptCandidate, extract_array, parse_candidates,
    render_fragments,
};
pub use document::{MarkerPair, existing_region, splice};
