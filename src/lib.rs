//! Fixed-capacity circular buffer with overwrite-on-full insertion.
//!
//! ## Scope
//! [`RingBuffer<T>`] stores up to `capacity` elements chosen at construction.
//! Once full, every insertion discards the oldest element instead of growing
//! or rejecting. Removal is FIFO only (oldest first).
//!
//! ## Key invariants
//! - `0 <= len() <= capacity()` at every observable point.
//! - Occupancy is tracked by an explicit counter, so a full buffer and an
//!   empty one are never confused even when head and tail coincide.
//! - Logical index `i` maps to physical slot `(head + i) % capacity`; cursors
//!   and indexed access agree element-for-element across the wrap.
//!
//! ## Error model
//! - Misuse (dequeue or display on empty, out-of-range index, enqueue into a
//!   zero-capacity buffer) panics.
//! - Allocation failure surfaces as [`RingBufferError`] from the `try_`
//!   constructors; assignment via [`RingBuffer::assign_from`] leaves the
//!   target untouched on failure.
//!
//! ## Notable entry points
//! - [`RingBuffer`]: construction, `enqueue`, `dequeue_oldest`, indexed
//!   access, `equals`, `swap`.
//! - [`Iter`] / [`IterMut`]: logical-order cursors with `position()`.
//! - [`evaluate_each`]: lazy `(position, bool)` report for a predicate.

pub mod stdx;
#[cfg(test)]
pub mod test_utils;

mod error;

pub use error::RingBufferError;
pub use stdx::{
    evaluate_each, EvaluateEach, FillState, IntoIter, Iter, IterMut, RingBuffer,
};
