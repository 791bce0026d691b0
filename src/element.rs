//! # Buffer Elements
//!
//! The values that sit in the buffer's slots.
//!
//! ## Plain English
//!
//! Every slot holds either a real value or "nothing" (the nil element).
//! The buffer only ever moves elements around; it never looks inside them.
//! That lets the same engine carry integers, bytes, or anything else.

use std::fmt;

use crate::error::{RingBufferError, RingResult};

/// One slot's worth of data.
///
/// `Nil` marks a slot that was never written or has been vacated, and is
/// also what [`read`](crate::RingBuffer::read) returns from an empty buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element<T> {
    /// No value
    Nil,

    /// A single typed value
    Scalar(T),
}

impl<T> Element<T> {
    /// Wraps a value.
    pub fn new(value: T) -> Self {
        Self::Scalar(value)
    }

    /// The nil element.
    pub fn nil() -> Self {
        Self::Nil
    }

    /// Returns true for the nil element.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the held value, or `None` for nil.
    pub fn get_value(&self) -> Option<&T> {
        match self {
            Self::Nil => None,
            Self::Scalar(value) => Some(value),
        }
    }

    /// Replaces the held value in place.
    ///
    /// Nil has no slot to update, so it stays nil and
    /// [`RingBufferError::SentinelWrite`] is returned.
    pub fn set_value(&mut self, value: T) -> RingResult<()> {
        match self {
            Self::Nil => Err(RingBufferError::SentinelWrite),
            Self::Scalar(current) => {
                *current = value;
                Ok(())
            }
        }
    }

    /// Consumes the element, returning the held value if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Nil => None,
            Self::Scalar(value) => Some(value),
        }
    }
}

impl<T> Default for Element<T> {
    fn default() -> Self {
        Self::Nil
    }
}

impl<T> From<T> for Element<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T: fmt::Debug> fmt::Display for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Scalar(value) => write!(f, "{:?}", value),
        }
    }
}

// ============================================
// TESTS
// ============================================
