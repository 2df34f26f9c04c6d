//! Planar coordinate type.
//!
//! The network lives in a flat 2-D plane (screen-like units), so all distance
//! math is plain Euclidean.  `f64` keeps accumulated travel times free of the
//! drift that `f32` shows after a few thousand motion steps.

use std::ops::Sub;

/// A point (or displacement) in the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of this point read as a vector from the origin.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).magnitude()
    }

    /// Move from `self` toward `target` by at most `step` units.
    ///
    /// Direction is preserved; the result never passes `target`.
    pub fn step_toward(self, target: Point, step: f64) -> Point {
        let delta = target - self;
        let len = delta.magnitude();
        if len <= step || len == 0.0 {
            return target;
        }
        let scale = step / len;
        Point::new(self.x + delta.x * scale, self.y + delta.y * scale)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
