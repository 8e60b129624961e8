//! Cursor traversal and `evaluate_each` over wrapped buffers.

use circbuf::{evaluate_each, Iter, RingBuffer};

/// Capacity 4 with logical [3, 4, 5, 6] stored as physical [5, 6, 3, 4].
fn wrapped() -> RingBuffer<i32> {
    let mut ring = RingBuffer::from_slice(&[1, 2, 3, 4]);
    ring.enqueue(5);
    ring.enqueue(6);
    ring
}

#[test]
fn traversal_matches_indexed_access() {
    let ring = wrapped();
    let mut it = ring.iter();
    let mut steps = 0;
    while it != ring.iter_end() {
        let position = it.position();
        assert_eq!(it.next(), Some(&ring[position]));
        steps += 1;
    }
    assert_eq!(steps, ring.len());
    assert_eq!(it.next(), None);
}

#[test]
fn slices_agree_with_cursor() {
    let ring = wrapped();
    let (front, back) = ring.as_slices();
    let joined: Vec<i32> = front.iter().chain(back).copied().collect();
    assert_eq!(joined, ring.iter().copied().collect::<Vec<_>>());
    assert_eq!(joined, vec![3, 4, 5, 6]);
}

#[test]
fn mutable_cursor_then_shared() {
    let mut ring = wrapped();
    let mut it = ring.iter_mut();
    if let Some(first) = it.next() {
        *first *= 10;
    }
    let rest: Iter<'_, i32> = it.into();
    assert_eq!(rest.position(), 1);
    assert_eq!(rest.copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    assert_eq!(ring[0], 30);
}

#[test]
fn owned_iteration_consumes_in_order() {
    let ring = wrapped();
    assert_eq!(ring.into_iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
}

#[test]
fn evaluate_each_reports_positions() {
    let mut ring = RingBuffer::with_capacity(2);
    ring.enqueue(1);
    ring.enqueue(2);
    let report: Vec<(usize, bool)> = evaluate_each(&ring, |v| v % 2 == 0).collect();
    assert_eq!(report, vec![(0, false), (1, true)]);
}

#[test]
fn evaluate_each_over_wrapped_strings() {
    let mut ring = RingBuffer::from_slice(&["ING".to_string(), "PAS".to_string()]);
    ring.enqueue("RO".to_string());
    let report: Vec<_> = evaluate_each(&ring, |name| name.len() == 2).collect();
    assert_eq!(report, vec![(0, false), (1, true)]);
}

#[test]
fn widened_cursor_coexists_with_earlier_writes() {
    let mut ring = wrapped();
    let mut it = ring.iter_mut();
    let oldest = it.next().expect("wrapped buffer is full");
    let newer = it.next().expect("wrapped buffer is full");
    let rest: Iter<'_, i32> = it.into();
    *oldest = -3;
    *newer = -4;
    assert_eq!(rest.copied().collect::<Vec<_>>(), vec![5, 6]);
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![-3, -4, 5, 6]);
}
