//! Fixed-capacity ring buffer with heap-allocated `MaybeUninit<T>` storage
//! and overwrite-on-full insertion.
//!
//! # Invariants
//! - `capacity` is fixed at construction; storage is never reallocated.
//! - `head < capacity` whenever `capacity > 0`, and `len <= capacity`.
//! - Slots in the logical range `[head, head + len)` (wrapping at
//!   `capacity`) are initialized; all other slots are uninitialized.
//! - `len` is the single source of truth for occupancy. Full and empty are
//!   never inferred from `head`/tail comparisons.
//! - An empty buffer always has `head == 0`, so the first insertion after
//!   construction or a full drain lands in slot 0.
//!
//! # Threading
//! This type is not synchronized; it assumes single-threaded usage. Shared
//! references may cross threads when `T: Sync`, but every mutation needs
//! `&mut self`.

use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ops::{Index, IndexMut, Range};
use std::ptr::{self, NonNull};

use tracing::{debug, trace};

use super::ring_buffer_iter::{IntoIter, Iter, IterMut};
use crate::error::RingBufferError;

/// Occupancy state that drives [`RingBuffer::enqueue`].
///
/// Derived from `len` on demand; there is no separate state field to drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillState {
    /// No occupied slots. The next insertion resets the head to slot 0.
    Empty,
    /// At least one occupied and one free slot.
    PartiallyFilled,
    /// Every slot is occupied. The next insertion overwrites the oldest.
    Full,
}

/// Fixed-capacity ring buffer that overwrites its oldest element when full.
///
/// Design intent:
/// - Capacity is chosen at runtime but never changes afterwards, so memory
///   use is bounded and known up front.
/// - Enqueue, dequeue and indexed access are O(1) and never allocate.
/// - Logical index `i` lives at physical slot `(head + i) % capacity`.
///
/// A default-constructed buffer has capacity 0. It is valid to query, clone,
/// compare and iterate, but enqueueing into it panics until it is replaced.
///
/// # Examples
///
/// ```
/// use circbuf::RingBuffer;
///
/// let mut ring = RingBuffer::from_slice(&[1, 2, 3, 4]);
/// ring.enqueue(5);
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
/// assert_eq!(ring.len(), 4);
/// ```
pub struct RingBuffer<T> {
    slots: Box<[MaybeUninit<T>]>,
    head: usize,
    len: usize,
}

/// Allocates `capacity` uninitialized slots without running any constructors.
fn alloc_slots<T>(capacity: usize) -> Result<Box<[MaybeUninit<T>]>, RingBufferError> {
    let fits = mem::size_of::<T>()
        .checked_mul(capacity)
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        debug!(capacity, "ring buffer capacity overflow");
        return Err(RingBufferError::CapacityOverflow { capacity });
    }

    let mut slots: Vec<MaybeUninit<T>> = Vec::new();
    if let Err(source) = slots.try_reserve_exact(capacity) {
        debug!(capacity, error = %source, "ring buffer allocation failed");
        return Err(RingBufferError::Alloc { capacity, source });
    }
    slots.resize_with(capacity, MaybeUninit::uninit);
    Ok(slots.into_boxed_slice())
}

/// Reinterprets an initialized run of slots as a slice of `T`.
///
/// # Safety
/// Every element of `slots` must be initialized.
#[inline]
unsafe fn assume_init_slice<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    // SAFETY: MaybeUninit<T> has the same layout as T; caller guarantees init.
    unsafe { &*(slots as *const [MaybeUninit<T>] as *const [T]) }
}

/// Mutable counterpart of [`assume_init_slice`].
///
/// # Safety
/// Every element of `slots` must be initialized.
#[inline]
unsafe fn assume_init_slice_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    // SAFETY: MaybeUninit<T> has the same layout as T; caller guarantees init.
    unsafe { &mut *(slots as *mut [MaybeUninit<T>] as *mut [T]) }
}

impl<T> RingBuffer<T> {
    /// Creates a zero-capacity buffer that owns no storage.
    pub fn new() -> Self {
        Self {
            slots: Vec::new().into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Creates an empty buffer with room for `capacity` elements.
    ///
    /// # Panics
    /// Panics if the storage cannot be allocated. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle that case.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates an empty buffer with room for `capacity` elements, reporting
    /// allocation failure instead of panicking.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, RingBufferError> {
        let ring = Self {
            slots: alloc_slots(capacity)?,
            head: 0,
            len: 0,
        };
        debug_assert!(ring.is_empty());
        Ok(ring)
    }

    /// Creates a buffer of `capacity` elements produced by enqueueing every
    /// item of `items` in order.
    ///
    /// When `items` yields more than `capacity` elements, the earlier ones are
    /// overwritten by the usual overwrite-on-full rule and only the last
    /// `capacity` survive.
    ///
    /// # Panics
    /// Panics if storage cannot be allocated, or if `capacity == 0` and
    /// `items` is non-empty.
    pub fn from_iter_with_capacity<I>(capacity: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::try_from_iter_with_capacity(capacity, items).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fallible form of [`from_iter_with_capacity`](Self::from_iter_with_capacity).
    pub fn try_from_iter_with_capacity<I>(capacity: usize, items: I) -> Result<Self, RingBufferError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut ring = Self::try_with_capacity(capacity)?;
        ring.extend(items);
        Ok(ring)
    }

    /// Maximum number of elements the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no elements are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true when `len == capacity`.
    ///
    /// A zero-capacity buffer is both empty and full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Current occupancy state.
    ///
    /// A zero-capacity buffer reports `Empty`.
    #[inline]
    pub fn fill_state(&self) -> FillState {
        if self.len == 0 {
            FillState::Empty
        } else if self.len == self.capacity() {
            FillState::Full
        } else {
            FillState::PartiallyFilled
        }
    }

    /// Physical slot holding the oldest element, or `None` when empty.
    #[cfg(any(test, kani))]
    pub(crate) fn head_slot(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.head)
    }

    /// Physical slot holding the newest element, or `None` when empty.
    #[cfg(any(test, kani))]
    pub(crate) fn tail_slot(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.physical(self.len - 1))
    }

    /// Maps a logical index to its physical slot.
    ///
    /// Callers keep `logical <= capacity`, so `head + logical < 2 * capacity`
    /// and one conditional subtraction replaces the modulo.
    #[inline(always)]
    fn physical(&self, logical: usize) -> usize {
        let cap = self.capacity();
        debug_assert!(logical <= cap);
        let slot = self.head + logical;
        if slot >= cap {
            slot - cap
        } else {
            slot
        }
    }

    /// Inserts `value` as the newest element.
    ///
    /// When the buffer is full the oldest element is overwritten and
    /// returned; the overwritten slot becomes the newest and occupancy stays
    /// at capacity. Otherwise the value is written just past the newest
    /// element (wrapping to slot 0 at the physical end) and `None` is
    /// returned.
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn enqueue(&mut self, value: T) -> Option<T> {
        assert!(
            self.capacity() > 0,
            "enqueue into a zero-capacity RingBuffer"
        );

        match self.fill_state() {
            FillState::Empty => {
                debug_assert_eq!(self.head, 0);
                self.slots[0].write(value);
                self.len = 1;
                None
            }
            FillState::PartiallyFilled => {
                let tail = self.physical(self.len);
                self.slots[tail].write(value);
                self.len += 1;
                debug_assert!(self.len <= self.capacity());
                None
            }
            FillState::Full => {
                let slot = self.head;
                // SAFETY: the buffer is full, so every slot is initialized.
                let oldest =
                    mem::replace(unsafe { self.slots[slot].assume_init_mut() }, value);
                self.head = self.physical(1);
                trace!(slot, capacity = self.capacity(), "ring buffer overwrote oldest element");
                Some(oldest)
            }
        }
    }

    /// Writes `value` past the newest element without touching `head`.
    ///
    /// Used by constructors that lay elements out at known positions.
    #[inline]
    fn push_within_capacity(&mut self, value: T) {
        debug_assert!(self.len < self.capacity(), "push_within_capacity on full buffer");
        let tail = self.physical(self.len);
        self.slots[tail].write(value);
        self.len += 1;
    }

    /// Removes and returns the oldest element, or `None` when empty.
    ///
    /// Removing the last element resets the buffer to the empty state so the
    /// next insertion starts again at slot 0.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let idx = self.head;
        // SAFETY: len > 0, so the slot at head is initialized. It is treated
        // as uninitialized from here on because head/len move past it.
        let value = unsafe { self.slots[idx].assume_init_read() };

        self.len -= 1;
        if self.len == 0 {
            self.head = 0;
            trace!("ring buffer drained");
        } else {
            self.head = self.physical(1);
        }

        Some(value)
    }

    /// Removes and returns the oldest element.
    ///
    /// # Panics
    /// Panics if the buffer is empty. Use [`pop_front`](Self::pop_front) when
    /// emptiness is an expected condition.
    pub fn dequeue_oldest(&mut self) -> T {
        assert!(!self.is_empty(), "dequeue_oldest on an empty RingBuffer");
        match self.pop_front() {
            Some(value) => value,
            None => unreachable!("non-empty buffer yielded no element"),
        }
    }

    /// Oldest element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Element at logical position `index` (0 is the oldest).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let slot = self.physical(index);
        // SAFETY: index < len, so the slot is inside the initialized range.
        Some(unsafe { self.slots[slot].assume_init_ref() })
    }

    /// Mutable element at logical position `index` (0 is the oldest).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.physical(index);
        // SAFETY: index < len, so the slot is inside the initialized range.
        Some(unsafe { self.slots[slot].assume_init_mut() })
    }

    /// Element at logical position `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for RingBuffer of length {len}"),
        }
    }

    /// Mutable element at logical position `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for RingBuffer of length {len}"),
        }
    }

    /// Exchanges the entire state of two buffers in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Physical ranges of the occupied slots in logical order.
    ///
    /// The second range is empty unless the contents wrap past the physical
    /// end of storage.
    fn segment_ranges(&self) -> (Range<usize>, Range<usize>) {
        let cap = self.capacity();
        if self.len <= cap - self.head {
            (self.head..self.head + self.len, 0..0)
        } else {
            let first = cap - self.head;
            (self.head..cap, 0..(self.len - first))
        }
    }

    /// Returns the occupied elements as up to two slices in logical order.
    ///
    /// The first slice starts at the oldest element; the second (possibly
    /// empty) slice holds the wrapped remainder.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.segment_ranges();
        // SAFETY: both ranges lie inside the initialized logical range.
        unsafe {
            (
                assume_init_slice(&self.slots[front]),
                assume_init_slice(&self.slots[back]),
            )
        }
    }

    /// Mutable counterpart of [`as_slices`](Self::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.segment_ranges();
        // Ranges are disjoint: back ends before head whenever it is non-empty.
        let (low, high) = self.slots.split_at_mut(front.start);
        // SAFETY: both ranges lie inside the initialized logical range.
        unsafe {
            (
                assume_init_slice_mut(&mut high[..front.len()]),
                assume_init_slice_mut(&mut low[back]),
            )
        }
    }

    /// Removes all elements, dropping them oldest first.
    ///
    /// Storage is kept; the buffer stays usable without reallocating.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }

        let (front, back) = self.segment_ranges();
        // Forget the elements before dropping them so a panicking destructor
        // can only leak, never double-drop.
        self.head = 0;
        self.len = 0;

        // SAFETY: both ranges were initialized and are no longer tracked.
        unsafe {
            ptr::drop_in_place(assume_init_slice_mut(&mut self.slots[front]));
            ptr::drop_in_place(assume_init_slice_mut(&mut self.slots[back]));
        }

        debug_assert!(self.is_empty());
    }

    /// Cursor over the elements, oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.head, 0, self.len)
    }

    /// Mutable cursor over the elements, oldest to newest.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let capacity = self.capacity();
        let base = NonNull::from(&mut self.slots[..]).cast::<MaybeUninit<T>>();
        IterMut::new(base, capacity, self.head, 0, self.len)
    }

    /// Exhausted cursor positioned one past the newest element.
    ///
    /// An [`iter`](Self::iter) cursor advanced `len()` times compares equal to
    /// this one.
    pub fn iter_end(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.head, self.len, self.len)
    }

    /// True iff both buffers have the same capacity and the same elements in
    /// the same logical order.
    ///
    /// Buffers with identical contents but different spare capacity are not
    /// equal.
    pub fn equals(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        self.capacity() == other.capacity()
            && self.len == other.len
            && self.iter().eq(other.iter())
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Creates a full buffer with every slot set to a clone of `value`.
    ///
    /// # Panics
    /// Panics if storage cannot be allocated.
    pub fn filled(capacity: usize, value: T) -> Self {
        Self::try_filled(capacity, value).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fallible form of [`filled`](Self::filled).
    pub fn try_filled(capacity: usize, value: T) -> Result<Self, RingBufferError> {
        let mut ring = Self::try_with_capacity(capacity)?;
        for _ in 0..capacity {
            ring.push_within_capacity(value.clone());
        }
        debug_assert!(ring.is_full());
        Ok(ring)
    }

    /// Creates a full buffer holding clones of `items`, with capacity
    /// `items.len()` and logical order equal to slice order.
    ///
    /// # Panics
    /// Panics if storage cannot be allocated.
    pub fn from_slice(items: &[T]) -> Self {
        Self::try_from_slice(items).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fallible form of [`from_slice`](Self::from_slice).
    pub fn try_from_slice(items: &[T]) -> Result<Self, RingBufferError> {
        let mut ring = Self::try_with_capacity(items.len())?;
        for item in items {
            ring.push_within_capacity(item.clone());
        }
        debug_assert!(ring.is_full());
        Ok(ring)
    }

    /// Deep copy that reports allocation failure.
    ///
    /// The copy keeps the source's physical layout (same head slot). If a
    /// clone panics, the elements copied so far are dropped and the source is
    /// untouched.
    pub fn try_clone(&self) -> Result<Self, RingBufferError> {
        let mut out = Self::try_with_capacity(self.capacity())?;
        out.head = self.head;
        for value in self.iter() {
            out.push_within_capacity(value.clone());
        }
        debug_assert_eq!(out.len, self.len);
        Ok(out)
    }

    /// Replaces `self` with a deep copy of `source`.
    ///
    /// The copy is built in a temporary and swapped in, so on error (or a
    /// panicking clone) `self` is left exactly as it was.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), RingBufferError> {
        let mut tmp = source.try_clone()?;
        self.swap(&mut tmp);
        Ok(())
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
        debug_assert!(self.len == 0);
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| panic!("{err}"))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            panic!("{err}");
        }
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    /// Enqueues every item in order, overwriting the oldest on overflow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            let _ = self.enqueue(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One element per line, oldest first.
///
/// # Panics
/// Panics when the buffer is empty; printing nothing would hide a caller bug.
impl<T: fmt::Display> fmt::Display for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        assert!(!self.is_empty(), "cannot display an empty RingBuffer");
        for value in self.iter() {
            writeln!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}


// Reference model, property tests and Kani proofs live in ring_buffer_tests.rs
#[cfg(any(all(test, feature = "stdx-proptest"), kani))]
#[path = "ring_buffer_tests.rs"]
mod ring_buffer_tests;
