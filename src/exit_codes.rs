//! Exit code constants for the promptgen CLI.
//!
//! - 0: Success (including dry runs and canned mode)
//! - 1: Configuration or local I/O error
//! - 2: Transport failure (non-success status, timeout)
//! - 3: Model output could not be recovered as a JSON array
//! - 4: No valid candidates survived filtering
//! - 5: Target document lacks the marker pair

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Missing or invalid configuration, unrecognized endpoint, or file I/O failure.
pub const CONFIG_ERROR: i32 = 1;

/// The remote call failed or timed out.
pub const TRANSPORT_FAILURE: i32 = 2;

/// The remote text did not contain a parseable JSON array.
pub const MODEL_OUTPUT_FAILURE: i32 = 3;

/// Every array element was dropped by filtering.
pub const NO_CANDIDATES: i32 = 4;

/// The marker pair is missing from the target document.
pub const MISSING_MARKERS: i32 = 5;
