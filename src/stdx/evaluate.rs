//! Predicate evaluation over a ring buffer's logical positions.

use std::fmt;
use std::iter::FusedIterator;

use super::ring_buffer::RingBuffer;
use super::ring_buffer_iter::Iter;

/// Lazy `(position, predicate(element))` pairs, oldest first.
///
/// Produced by [`evaluate_each`]. Positions are logical (0 = oldest), not
/// physical slot numbers.
pub struct EvaluateEach<'a, T, P> {
    iter: Iter<'a, T>,
    predicate: P,
}

/// Applies `predicate` to every element of `ring` in logical order, tagging
/// each result with the element's logical position.
///
/// Nothing is evaluated until the returned iterator is driven, and the
/// buffer is only read.
///
/// # Examples
///
/// ```
/// use circbuf::{evaluate_each, RingBuffer};
///
/// let ring = RingBuffer::from_slice(&[1, 2]);
/// let report: Vec<_> = evaluate_each(&ring, |v| v % 2 == 0).collect();
/// assert_eq!(report, vec![(0, false), (1, true)]);
/// ```
pub fn evaluate_each<T, P>(ring: &RingBuffer<T>, predicate: P) -> EvaluateEach<'_, T, P>
where
    P: FnMut(&T) -> bool,
{
    EvaluateEach {
        iter: ring.iter(),
        predicate,
    }
}

impl<T, P> Iterator for EvaluateEach<'_, T, P>
where
    P: FnMut(&T) -> bool,
{
    type Item = (usize, bool);

    #[inline]
    fn next(&mut self) -> Option<(usize, bool)> {
        let position = self.iter.position();
        let value = self.iter.next()?;
        Some((position, (self.predicate)(value)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, P> ExactSizeIterator for EvaluateEach<'_, T, P> where P: FnMut(&T) -> bool {}

impl<T, P> FusedIterator for EvaluateEach<'_, T, P> where P: FnMut(&T) -> bool {}

impl<T, P> fmt::Debug for EvaluateEach<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluateEach")
            .field("iter", &self.iter)
            .finish_non_exhaustive()
    }
}
