#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;

use circbuf::{evaluate_each, RingBuffer};

// Interprets a byte stream as an operation sequence against `RingBuffer`,
// checking every result against a `VecDeque` ground-truth model.
//
// Byte layout:
// - Byte 0 → `capacity` (clamped to 1..=64)
// - Remaining bytes as `(opcode, operand)` pairs:
//   - 0 → `enqueue(operand)`
//   - 1 → `pop_front()`
//   - 2 → `get_mut(operand % (len + 1))` write-through
//   - 3 → `clear()`
//   - 4 → clone and compare
//   - _ → `evaluate_each` against the model
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = ((data[0] as usize) % 64).max(1);
    let mut ring = RingBuffer::with_capacity(capacity);
    let mut model: VecDeque<u8> = VecDeque::with_capacity(capacity);

    let ops = &data[1..];
    let mut i = 0;
    while i + 1 < ops.len() {
        let opcode = ops[i];
        let operand = ops[i + 1];
        i += 2;

        match opcode % 6 {
            // enqueue
            0 => {
                let evicted = ring.enqueue(operand);
                let model_evicted = if model.len() == capacity {
                    model.pop_front()
                } else {
                    None
                };
                model.push_back(operand);
                assert_eq!(evicted, model_evicted, "enqueue({operand}) eviction mismatch");
            }
            // pop_front
            1 => {
                assert_eq!(ring.pop_front(), model.pop_front(), "pop_front mismatch");
            }
            // write-through
            2 => {
                let idx = operand as usize % (model.len() + 1);
                match (ring.get_mut(idx), model.get_mut(idx)) {
                    (Some(a), Some(b)) => {
                        *a = a.wrapping_add(1);
                        *b = b.wrapping_add(1);
                    }
                    (None, None) => {}
                    _ => panic!("get_mut({idx}) presence mismatch"),
                }
            }
            // clear
            3 => {
                ring.clear();
                model.clear();
            }
            // clone
            4 => {
                let copy = ring.clone();
                assert!(copy.equals(&ring), "clone not equal to source");
            }
            // evaluate_each
            _ => {
                let report: Vec<(usize, bool)> =
                    evaluate_each(&ring, |v| *v >= operand).collect();
                let expected: Vec<(usize, bool)> = model
                    .iter()
                    .enumerate()
                    .map(|(pos, v)| (pos, *v >= operand))
                    .collect();
                assert_eq!(report, expected, "evaluate_each mismatch");
            }
        }

        assert_eq!(ring.len(), model.len(), "len mismatch");
        assert!(ring.iter().eq(model.iter()), "sequence mismatch");
    }
});
