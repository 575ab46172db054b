//! Run/clear control state and crate-level errors.

use thiserror::Error;

/// Run and clear lines of a filter instance.
///
/// `enabled` gates the stream: while deasserted the filter neither consumes
/// nor produces samples and its state freezes in place. `clear` is
/// level-held: asserting it zeroes the accumulator chains, and every tick
/// processed while it stays asserted emits silence.
///
/// The default value is the reset state: disabled, clear deasserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub clear: bool,
}

/// Errors reported by filter construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A filter needs at least one tap.
    #[error("tap count must be at least 1")]
    ZeroTaps,
}
