//! Construction, FIFO, overwrite, equality and copy scenarios.

use circbuf::{FillState, RingBuffer, RingBufferError};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Course {
    credits: u32,
    name: String,
}

impl Course {
    fn new(credits: u32, name: &str) -> Self {
        Self {
            credits,
            name: name.to_string(),
        }
    }
}

fn contents<T: Clone>(ring: &RingBuffer<T>) -> Vec<T> {
    ring.iter().cloned().collect()
}

#[test]
fn fifo_order_via_index() {
    let mut ring = RingBuffer::with_capacity(5);
    for v in [10, 20, 30] {
        ring.enqueue(v);
    }
    assert_eq!(ring.len(), 3);
    assert_eq!((ring[0], ring[1], ring[2]), (10, 20, 30));
    assert_eq!(ring.fill_state(), FillState::PartiallyFilled);
}

#[test]
fn overwrite_on_full() {
    let mut ring = RingBuffer::from_slice(&[1, 2, 3, 4]);
    ring.enqueue(5);
    assert_eq!(contents(&ring), vec![2, 3, 4, 5]);
    assert_eq!(ring.len(), 4);
    assert!(ring.is_full());
}

#[test]
fn dequeue_then_enqueue_round_trip() {
    let mut ring = RingBuffer::from_slice(&['a', 'b', 'c']);
    assert_eq!(ring.dequeue_oldest(), 'a');
    assert_eq!(contents(&ring), vec!['b', 'c']);
    assert_eq!(ring.len(), 2);

    ring.enqueue('d');
    assert_eq!(contents(&ring), vec!['b', 'c', 'd']);
}

#[test]
fn single_element_drain_restarts() {
    let mut ring = RingBuffer::with_capacity(3);
    ring.enqueue("only");
    ring.dequeue_oldest();
    assert!(ring.is_empty());

    ring.enqueue("x");
    assert_eq!(ring.len(), 1);
    assert_eq!(ring[0], "x");
    assert_eq!(ring.front(), ring.back());
}

#[test]
fn equality_follows_overwrite_rule() {
    let expected = RingBuffer::from_slice(&[1, 2, 3, 4]);
    let mut enqueued = RingBuffer::with_capacity(4);
    for v in [5, 5, 1, 2, 3, 4] {
        enqueued.enqueue(v);
    }
    assert_eq!(contents(&enqueued), vec![1, 2, 3, 4]);
    assert!(expected.equals(&enqueued));

    let different = RingBuffer::from_slice(&[1, 2, 4, 4]);
    assert!(!expected.equals(&different));
}

#[test]
fn equality_requires_same_occupancy() {
    let full = RingBuffer::from_slice(&[1, 2, 3]);
    let mut partial = full.clone();
    partial.dequeue_oldest();
    assert!(!full.equals(&partial));
    assert!(!partial.equals(&full));
}

#[test]
fn range_constructor_matches_slice() {
    let words = vec!["a caso".to_string(), "wat".to_string(), "cat".to_string()];
    let from_range = RingBuffer::from_iter_with_capacity(2, words[1..].iter().cloned());
    let from_slice = RingBuffer::from_slice(&["wat".to_string(), "cat".to_string()]);
    assert_eq!(from_range, from_slice);
}

#[test]
fn filled_constructor() {
    let ring = RingBuffer::filled(3, Course::new(6, "ALG"));
    assert!(ring.is_full());
    assert!(ring.iter().all(|c| c.name == "ALG"));
}

#[test]
fn copy_is_independent_both_ways() {
    let mut source = RingBuffer::from_slice(&[0, 1, 2]);
    let mut copy = source.clone();
    assert_eq!(copy, source);

    source.enqueue(3);
    source.dequeue_oldest();
    assert_eq!(contents(&copy), vec![0, 1, 2]);

    copy[0] = 100;
    assert_eq!(contents(&source), vec![2, 3]);
    assert_eq!(contents(&copy), vec![100, 1, 2]);
}

#[test]
fn assignment_replaces_capacity_and_contents() {
    let source = RingBuffer::from_slice(&[7, 8]);
    let mut target = RingBuffer::with_capacity(6);
    target.enqueue(1);
    target.assign_from(&source).unwrap();
    assert_eq!(target.capacity(), 2);
    assert_eq!(target, source);

    let mut cloned_into: RingBuffer<i32> = RingBuffer::new();
    cloned_into.clone_from(&source);
    assert_eq!(cloned_into, source);
}

#[test]
fn custom_type_enqueue_pop() {
    let mut first = RingBuffer::with_capacity(2);
    let mut second = RingBuffer::with_capacity(2);
    assert!(first.is_empty() && second.is_empty());

    first.enqueue(Course::new(8, "PAS"));
    first.enqueue(Course::new(8, "BIO"));
    first.enqueue(Course::new(8, "RO"));
    first.dequeue_oldest();
    second.enqueue(Course::new(8, "RO"));

    assert!(first.equals(&second));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].credits, 8);
}

#[test]
fn swap_is_public() {
    let mut a = RingBuffer::from_slice(&["a"]);
    let mut b = RingBuffer::with_capacity(3);
    b.enqueue("b");
    b.enqueue("c");
    a.swap(&mut b);
    assert_eq!(contents(&a), vec!["b", "c"]);
    assert_eq!(contents(&b), vec!["a"]);
}

#[test]
fn extend_applies_overwrite() {
    let mut ring = RingBuffer::with_capacity(3);
    ring.extend(1..=7);
    assert_eq!(contents(&ring), vec![5, 6, 7]);
}

#[test]
fn display_prints_logical_order() {
    let mut ring = RingBuffer::from_slice(&[1, 2, 3, 4]);
    ring[0] = 4;
    ring.enqueue(9);
    assert_eq!(ring.to_string(), "2\n3\n4\n9\n");
}

#[test]
fn try_constructors_report_overflow() {
    match RingBuffer::<[u8; 1024]>::try_with_capacity(usize::MAX / 512) {
        Err(RingBufferError::CapacityOverflow { capacity }) => {
            assert_eq!(capacity, usize::MAX / 512);
        }
        other => panic!("expected capacity overflow, got {other:?}"),
    }
    assert!(RingBuffer::try_filled(4, 0u8).is_ok());
    assert!(RingBuffer::try_from_slice(&[1u8, 2]).is_ok());
    assert!(RingBuffer::try_from_iter_with_capacity(2, 0..5).is_ok());
}

#[test]
#[should_panic(expected = "out of range")]
fn index_past_occupancy_panics() {
    let mut ring = RingBuffer::with_capacity(4);
    ring.enqueue(1);
    ring.enqueue(2);
    let _ = ring[2];
}

#[test]
#[should_panic(expected = "zero-capacity")]
fn default_buffer_rejects_enqueue() {
    let mut ring = RingBuffer::default();
    ring.enqueue(1u8);
}
