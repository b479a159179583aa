//! Instrumented payload types for asserting the containers' exact
//! construction/assignment strategy choices.
//!
//! Counters are thread-local so parallel tests stay isolated; call
//! `reset_counts` at the start of each counting section. Rust moves are
//! bitwise and leave no trace; the observable axes are clone
//! (construction), `clone_from` (assignment reuse) and drop.

#![allow(dead_code)]

use std::cell::Cell;

thread_local! {
    static CLONE_COUNT: Cell<usize> = const { Cell::new(0) };
    static CLONE_FROM_COUNT: Cell<usize> = const { Cell::new(0) };
    static DROP_COUNT: Cell<usize> = const { Cell::new(0) };
}

/// Zeroes all counters for the current thread.
pub fn reset_counts() {
    CLONE_COUNT.with(|c| c.set(0));
    CLONE_FROM_COUNT.with(|c| c.set(0));
    DROP_COUNT.with(|c| c.set(0));
}

pub fn clone_count() -> usize {
    CLONE_COUNT.with(Cell::get)
}

pub fn clone_from_count() -> usize {
    CLONE_FROM_COUNT.with(Cell::get)
}

pub fn drop_count() -> usize {
    DROP_COUNT.with(Cell::get)
}

/// A payload that counts clones, clone-assignments and drops.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Counted<V>(pub V);

impl<V> Counted<V> {
    pub fn new(value: V) -> Self {
        Counted(value)
    }
}

impl<V: Clone> Clone for Counted<V> {
    fn clone(&self) -> Self {
        CLONE_COUNT.with(|c| c.set(c.get() + 1));
        Counted(self.0.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        CLONE_FROM_COUNT.with(|c| c.set(c.get() + 1));
        self.0.clone_from(&source.0);
    }
}

impl<V> Drop for Counted<V> {
    fn drop(&mut self) {
        DROP_COUNT.with(|c| c.set(c.get() + 1));
    }
}

/// A payload whose clone panics when armed; drives the valueless-state
/// tests.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PanicOnClone<V> {
    pub value: V,
    armed: bool,
}

impl<V> PanicOnClone<V> {
    pub fn new(value: V) -> Self {
        PanicOnClone {
            value,
            armed: false,
        }
    }

    pub fn armed(value: V) -> Self {
        PanicOnClone { value, armed: true }
    }
}

impl<V: Clone> Clone for PanicOnClone<V> {
    fn clone(&self) -> Self {
        assert!(!self.armed, "armed clone");
        PanicOnClone {
            value: self.value.clone(),
            armed: false,
        }
    }
}

/// A move-only payload; the containers must not demand `Clone` outside
/// the cloning operations themselves.
#[derive(Debug, PartialEq, Eq)]
pub struct NoClone<V>(pub V);
