//! FILENAME: rank-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    /// The view state and the tooltip cache disagree about which peer-set
    /// generation is live. This is a programming error in the caller or the
    /// engine, never a data condition; the operation is aborted with state
    /// unchanged rather than risking stale rank text.
    #[error("Peer-set generation mismatch: view state at {state}, cache at {cache}")]
    GenerationMismatch { state: u64, cache: u64 },
}
