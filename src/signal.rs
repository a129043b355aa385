//! Timestamped values that can be compared for recency.
//!
//! A [`Signal`] is "the latest known value of X". Every non-empty signal is
//! stamped from one process-wide logical clock, so of any two signals the one
//! created later is newer no matter which producer created it or in which
//! order they arrive. [`Signal::merge`] picks the newer of two signals and
//! [`Signal::Empty`] is its identity: older than everything.
//!
//! [`Receiver`] is the only mutable holder. It moves forward only, which makes
//! it safe to feed from racing sources (URL bar, history, embedded documents).

use std::sync::atomic::{AtomicU64, Ordering};

static CLOCK: AtomicU64 = AtomicU64::new(0);

fn tick() -> u64 {
    CLOCK.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T> {
    Empty,
    Data { value: T, timestamp: u64 },
}

impl<T> Signal<T> {
    pub fn empty() -> Self {
        Signal::Empty
    }

    pub fn of(value: T) -> Self {
        Signal::Data {
            value,
            timestamp: tick(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Signal::Empty)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Signal::Empty => None,
            Signal::Data { value, .. } => Some(value),
        }
    }

    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Signal::Empty => None,
            Signal::Data { timestamp, .. } => Some(*timestamp),
        }
    }

    /// True when `other` is empty or was created before `self`.
    pub fn is_newer_than(&self, other: &Signal<T>) -> bool {
        match (self, other) {
            (Signal::Empty, _) => false,
            (Signal::Data { .. }, Signal::Empty) => true,
            (Signal::Data { timestamp: a, .. }, Signal::Data { timestamp: b, .. }) => a > b,
        }
    }

    /// The newer of the two signals.
    pub fn merge(self, other: Signal<T>) -> Signal<T> {
        if self.is_newer_than(&other) {
            self
        } else {
            other
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal::Empty
    }
}

/// A slot holding the most recently accepted signal.
#[derive(Debug, Clone)]
pub struct Receiver<T> {
    current: Signal<T>,
}

impl<T> Default for Receiver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Receiver<T> {
    pub fn new() -> Self {
        Self {
            current: Signal::Empty,
        }
    }

    pub fn current(&self) -> &Signal<T> {
        &self.current
    }
}

impl<T: Clone> Receiver<T> {

    /// Store `candidate` and run `on_accepted` only if it is newer than the
    /// stored signal. Returns whether it was accepted.
    pub fn if_newer<F>(&mut self, candidate: &Signal<T>, on_accepted: F) -> bool
    where
        F: FnOnce(&Signal<T>),
    {
        if !candidate.is_newer_than(&self.current) {
            return false;
        }
        self.current = candidate.clone();
        on_accepted(&self.current);
        true
    }
}
