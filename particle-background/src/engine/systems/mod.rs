//! Per-frame systems of the background.

/// Elapsed-time clock and the cloud rotation law.
pub mod animation;

/// Applies queued pointer and resize input.
pub mod host_input;

/// Normalised pointer state.
pub mod pointer;
