//! Error types for the erasure-coding engine
//!
//! Mirrors the six user-facing error kinds documented for the coding core:
//! configuration, parameters, alignment, capacity, unrecoverable fault
//! counts, and unknown/closed session handles. Internal invariants (e.g.
//! division by zero in `GF(2^4)`) are guarded by `debug_assert!` instead,
//! since they should never trip and are not meant to be recoverable.

use thiserror::Error;

/// Result alias threaded through every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the coding core and its session/registry layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad `N`, `K`, or `BlockSize` in a `BlockConfig`.
    #[error("bad configuration: {0}")]
    Configuration(String),

    /// Bad `which`, bad `invalid_mask` (bits outside the group), or bad index.
    #[error("invalid parameter: {0}")]
    Parameters(String),

    /// A buffer pointer was not aligned to the required boundary.
    #[error("misaligned buffer: {0}")]
    Alignment(String),

    /// Allocation failed, or the session registry is full.
    #[error("capacity exceeded: {0}")]
    Capacity(String),

    /// The fault count exceeds `K`; no coding matrix can recover it.
    #[error("too many bad blocks: {0} invalid, at most {1} recoverable")]
    Unrecoverable(usize, usize),

    /// The session handle is unknown or has been closed.
    #[error("bad session handle: {0}")]
    Handle(usize),
}

impl Error {
    /// The documented negative error code for a thin C-style facade to
    /// surface across the ABI boundary. Not used internally; this crate's
    /// own API threads `Result<T, Error>` throughout.
    pub fn code(&self) -> i32 {
        match self {
            Error::Parameters(_) => -1,
            Error::Configuration(_) => -2,
            // This crate only ever raises `Capacity` for a full session
            // registry; an allocator-failure path (-3, "out of memory")
            // would need fallible allocation this crate doesn't attempt.
            Error::Capacity(_) => -7,
            Error::Unrecoverable(..) => -4,
            Error::Handle(_) => -5,
            Error::Alignment(_) => -6,
        }
    }
}
