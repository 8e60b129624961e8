use std::cell::Cell;
use std::rc::Rc;

#[cfg_attr(not(feature = "stdx-proptest"), allow(dead_code))]
pub fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
}

fn is_ci() -> bool {
    std::env::var_os("CI").is_some()
}

#[cfg_attr(not(feature = "stdx-proptest"), allow(dead_code))]
pub fn proptest_cases(default: u32) -> u32 {
    if let Some(value) = env_u32("PROPTEST_CASES") {
        return value.max(1);
    }
    if is_ci() {
        return default.max(1);
    }
    default.clamp(1, 16)
}

/// Counts how many of its tokens have been dropped.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    dropped: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> DropToken {
        DropToken {
            dropped: Rc::clone(&self.dropped),
        }
    }

    pub fn count(&self) -> usize {
        self.dropped.get()
    }
}

#[derive(Debug)]
pub struct DropToken {
    dropped: Rc<Cell<usize>>,
}

impl Drop for DropToken {
    fn drop(&mut self) {
        self.dropped.set(self.dropped.get() + 1);
    }
}

/// Value whose `Clone` panics when poisoned; models a failing element copy.
#[derive(Debug, PartialEq, Eq)]
pub struct PanicOnClone {
    pub value: u32,
    poisoned: bool,
}

impl PanicOnClone {
    pub fn ok(value: u32) -> Self {
        Self {
            value,
            poisoned: false,
        }
    }

    pub fn poisoned(value: u32) -> Self {
        Self {
            value,
            poisoned: true,
        }
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        assert!(!self.poisoned, "clone of poisoned value {}", self.value);
        Self {
            value: self.value,
            poisoned: false,
        }
    }
}
