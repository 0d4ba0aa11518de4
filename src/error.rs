//! # Errors
//!
//! Failure kinds reported by the timer pool. Every operation either fully
//! succeeds or returns one of these without touching pool state.

use thiserror::Error;

/// Error returned by the pool operations and the global timer API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// `append` found no free slot.
    #[error("all {capacity} timer slots are in use")]
    Exhausted { capacity: usize },

    /// The index is outside the pool or names a slot that is not allocated.
    #[error("timer index {index} is out of range or not allocated")]
    InvalidIndex { index: usize },
}
