#![forbid(unsafe_code)]

//! Error taxonomy for the list engine.
//!
//! Every variant is a local programming error: there is no user-facing error
//! state. Degenerate heights (NaN, negative) are not errors at all; they are
//! clamped where they enter the engine.

use std::fmt;

/// Errors returned by list engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualListError {
    /// An item or slot index outside `[0, len)`.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The valid length at the time of the call.
        len: usize,
    },
    /// More simultaneous bindings requested than the pool holds.
    CapacityExceeded {
        /// Fixed pool capacity.
        capacity: usize,
    },
    /// Operation invoked in a lifecycle state that does not permit it.
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The state the component was in.
        state: &'static str,
    },
    /// Configuration rejected by [`VirtualListConfig::validate`](crate::VirtualListConfig::validate).
    InvalidConfig(&'static str),
}

impl fmt::Display for VirtualListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range (len={len})")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "slot pool capacity {capacity} exceeded")
            }
            Self::InvalidState { operation, state } => {
                write!(f, "{operation} is not allowed while {state}")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid list configuration: {reason}"),
        }
    }
}

impl std::error::Error for VirtualListError {}

/// Result alias for list engine operations.
pub type Result<T> = std::result::Result<T, VirtualListError>;

/// Check `index < len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(VirtualListError::OutOfRange { index, len })
    }
}
