//! Fixed-capacity containers and the helpers that read them.

pub mod evaluate;
pub mod ring_buffer;
mod ring_buffer_iter;

pub use evaluate::{evaluate_each, EvaluateEach};
pub use ring_buffer::{FillState, RingBuffer};
pub use ring_buffer_iter::{IntoIter, Iter, IterMut};
