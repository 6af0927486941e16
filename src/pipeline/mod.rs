//! Pipeline entry points for search operations.
//!
//! - `Pacing`: delay policy between successive requests of a batch
//! - `run_search_batch`: sequential per-item loop (pace, build, invoke)

pub mod pacing;
pub mod search;

pub use pacing::Pacing;
pub use search::{BatchOutcome, ErrorMode, ItemResult, run_search_batch};
