//! Error types for ring buffer construction.
//!
//! Only resource acquisition is fallible. Misuse of an already-built buffer
//! (dequeue from empty, out-of-range index, enqueue into a zero-capacity
//! buffer) is a programming error and panics instead of returning one of
//! these.
//!
//! The enum is `#[non_exhaustive]`; consumers should include a fallback
//! match arm.

use std::collections::TryReserveError;
use std::fmt;

/// Errors from allocating ring buffer storage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RingBufferError {
    /// The allocator refused the storage block.
    Alloc {
        capacity: usize,
        source: TryReserveError,
    },
    /// `capacity * size_of::<T>()` does not fit in `isize`.
    CapacityOverflow { capacity: usize },
}

impl RingBufferError {
    /// Requested capacity that could not be satisfied.
    #[inline]
    pub fn capacity(&self) -> usize {
        match self {
            Self::Alloc { capacity, .. } | Self::CapacityOverflow { capacity } => *capacity,
        }
    }
}

impl fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc { capacity, source } => {
                write!(f, "failed to allocate {capacity} ring buffer slots: {source}")
            }
            Self::CapacityOverflow { capacity } => {
                write!(f, "ring buffer capacity overflow: {capacity} slots")
            }
        }
    }
}

impl std::error::Error for RingBufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc { source, .. } => Some(source),
            Self::CapacityOverflow { .. } => None,
        }
    }
}
