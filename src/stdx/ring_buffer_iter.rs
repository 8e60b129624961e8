//! Logical-order cursors over a [`RingBuffer`].
//!
//! A cursor carries the storage base, the capacity, the buffer's head slot
//! and its own logical position (0 = oldest). The physical slot is computed
//! on demand as `(head + position) % capacity`, so crossing the physical end
//! of storage needs no pointer bookkeeping.
//!
//! # Invariants
//! - `position <= len`; `position == len` is the end sentinel and is never
//!   dereferenced.
//! - Two cursors are equal iff they share storage base, capacity and logical
//!   position.
//!
//! Cursors borrow the buffer, so the borrow checker rejects any structural
//! mutation (enqueue, dequeue, swap, drop) while one is alive.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use super::ring_buffer::RingBuffer;

#[inline(always)]
fn wrap(slot: usize, capacity: usize) -> usize {
    if slot >= capacity {
        slot - capacity
    } else {
        slot
    }
}

/// Shared cursor over a [`RingBuffer`], produced by [`RingBuffer::iter`].
///
/// Like [`IterMut`] it keeps a raw base pointer instead of a slice, so no
/// reference to the whole storage block is formed. Converting an `IterMut`
/// into an `Iter` therefore leaves slots it already yielded untouched.
pub struct Iter<'a, T> {
    base: NonNull<MaybeUninit<T>>,
    capacity: usize,
    head: usize,
    pos: usize,
    len: usize,
    _marker: PhantomData<&'a T>,
}

// SAFETY: Iter behaves like `&'a [T]`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: Iter behaves like `&'a [T]`.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(super) fn new(slots: &'a [MaybeUninit<T>], head: usize, pos: usize, len: usize) -> Self {
        Self::from_raw(NonNull::from(slots).cast(), slots.len(), head, pos, len)
    }

    #[inline]
    fn from_raw(
        base: NonNull<MaybeUninit<T>>,
        capacity: usize,
        head: usize,
        pos: usize,
        len: usize,
    ) -> Self {
        debug_assert!(pos <= len && len <= capacity);
        Self {
            base,
            capacity,
            head,
            pos,
            len,
            _marker: PhantomData,
        }
    }

    /// Logical position of the element the next call to `next` yields.
    ///
    /// Equals the buffer length once the cursor is exhausted.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every element has been yielded.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.len
    }

    /// Element under the cursor without advancing.
    #[inline]
    pub fn peek(&self) -> Option<&'a T> {
        if self.is_end() {
            return None;
        }
        let slot = wrap(self.head + self.pos, self.capacity);
        // SAFETY: pos < len, so the slot is in bounds and initialized, and it
        // cannot change while `'a` borrows the buffer. Only this one slot is
        // reborrowed.
        Some(unsafe { (*self.base.as_ptr().add(slot)).assume_init_ref() })
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let value = self.peek()?;
        self.pos += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            capacity: self.capacity,
            head: self.head,
            pos: self.pos,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.capacity == other.capacity && self.pos == other.pos
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("capacity", &self.capacity)
            .field("position", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}

/// Read-only widening; the reverse conversion is not provided.
impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    fn from(it: IterMut<'a, T>) -> Self {
        // Consuming `it` downgrades its unique borrow to a shared one. Only the
        // cursor fields move; references it already yielded stay valid.
        Self::from_raw(it.base, it.capacity, it.head, it.pos, it.len)
    }
}

/// Mutable cursor over a [`RingBuffer`], produced by [`RingBuffer::iter_mut`].
///
/// Holds a raw base pointer rather than a slice so each yielded `&mut T` can
/// outlive the `next` call; every logical position maps to a distinct slot,
/// so no two yielded references alias.
pub struct IterMut<'a, T> {
    base: NonNull<MaybeUninit<T>>,
    capacity: usize,
    head: usize,
    pos: usize,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: IterMut behaves like `&'a mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: IterMut behaves like `&'a mut [T]`.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(super) fn new(
        base: NonNull<MaybeUninit<T>>,
        capacity: usize,
        head: usize,
        pos: usize,
        len: usize,
    ) -> Self {
        debug_assert!(pos <= len && len <= capacity);
        Self {
            base,
            capacity,
            head,
            pos,
            len,
            _marker: PhantomData,
        }
    }

    /// Logical position of the element the next call to `next` yields.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every element has been yielded.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.len
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.is_end() {
            return None;
        }
        let slot = wrap(self.head + self.pos, self.capacity);
        self.pos += 1;
        // SAFETY: pos < len before the increment, so the slot is initialized
        // and in bounds. Each position is yielded once, so the returned
        // references are disjoint.
        Some(unsafe { (*self.base.as_ptr().add(slot)).assume_init_mut() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("capacity", &self.capacity)
            .field("position", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}

/// Owning iterator that dequeues oldest to newest.
pub struct IntoIter<T> {
    ring: RingBuffer<T>,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(super) fn new(ring: RingBuffer<T>) -> Self {
        Self { ring }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.ring).finish()
    }
}
