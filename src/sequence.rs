//! Seeded, strictly ordered value generators.
//!
//! A [`Sequence`] hands out its current value and then steps to the
//! successor. The desktop keeps two of them: one for window altitudes and
//! one for the cascading placement of new windows.

use crate::window::Point;

pub struct Sequence<T> {
    state: T,
    successor: Box<dyn FnMut(&T) -> T>,
}

impl<T: Clone> Sequence<T> {
    pub fn new(seed: T, successor: impl FnMut(&T) -> T + 'static) -> Self {
        Self {
            state: seed,
            successor: Box::new(successor),
        }
    }

    /// Return the current value and advance to its successor.
    ///
    /// The Nth call yields the seed with the successor applied N-1 times.
    pub fn next(&mut self) -> T {
        let next = (self.successor)(&self.state);
        std::mem::replace(&mut self.state, next)
    }

    /// The value the next call to [`Sequence::next`] will return.
    pub fn peek(&self) -> &T {
        &self.state
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Altitudes start at zero and grow by one per allocation.
pub fn altitude_sequence() -> Sequence<u64> {
    Sequence::new(0, |a| a + 1)
}

/// Bounds for the diagonal cascade of default window positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub origin: Point,
    pub step: i32,
    pub safe_width: i32,
    pub safe_height: i32,
}

impl Cascade {
    /// Step diagonally from `from`, wrapping to the origin once the result
    /// would leave the safe region.
    pub fn after(&self, from: Point) -> Point {
        let next = Point::new(from.x + self.step, from.y + self.step);
        if next.x > self.safe_width || next.y > self.safe_height {
            self.origin
        } else {
            next
        }
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self {
            origin: Point::new(60, 60),
            step: 21,
            safe_width: 300,
            safe_height: 300,
        }
    }
}

pub fn cascade_sequence(cascade: Cascade) -> Sequence<Point> {
    Sequence::new(cascade.origin, move |p| cascade.after(*p))
}
