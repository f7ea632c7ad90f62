//! Filesystem helpers for promptgen.
//!
//! The document and the run summary are both replaced atomically, so an
//! interrupted run never leaves a half-written file behind.

pub mod atomic;

pub use atomic::{atomic_write, read_document};
