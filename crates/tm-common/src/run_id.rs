//! ULID identifiers for matching runs.
//!
//! Every `compute_candidates` invocation gets its own `match_run_id` so log
//! lines and the returned response can be correlated. The process-level ID
//! identifies the binary instance that produced a batch of runs.
//!
//! # Example
//! ```
//! use tm_common::run_id;
//!
//! let process = run_id::get();
//! let run = run_id::generate();
//! assert_ne!(process, run);
//! ```

use once_cell::sync::Lazy;
use ulid::Ulid;

static PROCESS_RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Returns the process-level run ID (generated on first access).
#[inline]
pub fn get() -> &'static str {
    &PROCESS_RUN_ID
}

/// Generates a fresh ULID for a single matching run.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
