//! World and view extents
//!
//! The world is the normalized -1..1 square shrunk by a margin. The view is a
//! window centered on the eye, `±(view_pct - margin)` on each axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Closed interval applied to both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f32,
    pub max: f32,
}

impl Extent {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Both coordinates inside, with `tol` slack for float rounding
    #[inline]
    pub fn contains_point(&self, p: Vec2, tol: f32) -> bool {
        let (lo, hi) = (self.min - tol, self.max + tol);
        p.x >= lo && p.x <= hi && p.y >= lo && p.y <= hi
    }

    /// Amount `v` lies outside the interval (negative below, positive above, 0 inside)
    #[inline]
    pub fn overshoot(&self, v: f32) -> f32 {
        if v < self.min {
            v - self.min
        } else if v > self.max {
            v - self.max
        } else {
            0.0
        }
    }
}

/// Derived extents for one configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Where objects and the eye may be
    pub world: Extent,
    /// Where constrained objects must stay, relative to the eye
    pub view: Extent,
}

impl Bounds {
    pub fn new(margin: f32, view_pct: f32) -> Self {
        let half_view = view_pct - margin;
        Self {
            world: Extent::new(-1.0 + margin, 1.0 - margin),
            view: Extent::new(-half_view, half_view),
        }
    }
}
