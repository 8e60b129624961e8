//! Property-based differential tests against `VecDeque`.
//!
//! Run with: `cargo test --test property`
