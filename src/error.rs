//! Error taxonomy for the engine.
//!
//! The core never aborts the application over an in-tree error: a failing
//! `build` is caught and replaced with an error-placeholder widget (see
//! [`ContractError`]), a failing back-end write is retried next tick (see
//! [`RenderError`]), and a malformed input escape sequence is logged and
//! dropped (see [`InputDecodeError`]). Only [`ConfigError`] is surfaced to
//! the caller of `Scheduler::new`, since a bad config is a programming error
//! the app should fix before the loop ever starts.

use thiserror::Error;

/// An invalid value in a [`crate::backend::Config`], a widget's dimension,
/// or a theme reference.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("dimension value is invalid: {0}")]
    InvalidDimension(String),

    #[error("unknown theme key referenced by a span: {0}")]
    UnknownThemeKey(String),

    #[error("click interval must be positive, got {0}ms")]
    InvalidClickInterval(u64),
}

/// A failure writing to the terminal back-end.
///
/// The scheduler does not propagate this to the app; it drops the frame and
/// tries again next tick. After [`RenderError::consecutive_failures`] exceeds
/// a threshold the scheduler surfaces the error to its caller instead of
/// looping forever against a dead back-end.
#[derive(Debug, Error)]
#[error("back-end write failed (attempt {attempt}): {source}")]
pub struct RenderError {
    pub attempt: u32,
    #[source]
    pub source: std::io::Error,
}

/// A widget's `build` exceeded the recursion depth bound or produced a
/// self-referential subtree.
///
/// The offending subtree is replaced with an error-placeholder widget (a
/// small red-outlined cell range reading "error") and a diagnostic is
/// recorded; the rest of the tree rebuilds normally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractError {
    #[error("build recursion exceeded depth {depth} at {path}")]
    RecursionLimitExceeded { depth: u32, path: String },

    #[error("cyclic build detected: widget at {path} rebuilt itself within one rebuild pass")]
    Cycle { path: String },
}

/// An unrecognised escape sequence from the input decoder.
///
/// Logged via `tracing` and dropped; never reaches the router.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("could not decode input: {0}")]
pub struct InputDecodeError(pub String);
