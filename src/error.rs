//! # Error Types Module
//!
//! This module defines the error types used throughout the ring buffer.
//!
//! ## Plain English Explanation
//!
//! Most "problems" a ring buffer runs into are not problems at all:
//!
//! - Reading an empty buffer hands back the nil element
//! - Writing a full buffer quietly pushes out the oldest element
//!
//! The errors below are the things that really are wrong: a buffer that
//! could never be built, or a cursor that points outside the storage.

use thiserror::Error;

use crate::config::{BufferKind, ConfigError};

// ============================================
// MAIN ERROR
// ============================================

/// The main error type for the ring buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingBufferError {
    /// The construction options were rejected
    ///
    /// ## Examples
    /// - Capacity of zero
    /// - Capacity so large that the extra open slot overflows
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A buffer variant was selected that has no engine behind it
    #[error("Buffer kind {0:?} is not implemented")]
    UnsupportedKind(BufferKind),

    /// A cursor was stepped from outside `[0, max]`
    ///
    /// ## What This Means
    /// The cursors are corrupted. Carrying on would index past the
    /// backing storage, so callers of `next` get a panic instead.
    #[error("Index {index} is out of bounds (max is {max})")]
    IndexOutOfBounds { index: usize, max: usize },

    /// `set_value` was called on the nil element
    #[error("Cannot set a value on the nil element")]
    SentinelWrite,
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses RingBufferError
pub type RingResult<T> = Result<T, RingBufferError>;

// ============================================
// TESTS
// ============================================
