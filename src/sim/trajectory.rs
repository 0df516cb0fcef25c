//! Trajectory sampling
//!
//! A trajectory gives every object a random start position and a constant
//! velocity for a random number of ticks. Velocities are clipped so that no
//! object can leave the world before the next trajectory is drawn.

use glam::Vec2;
use rand::Rng;

use super::bounds::Extent;
use crate::config::{SaccadeConfig, TickRange};

/// One freshly drawn trajectory for all objects
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    /// Ticks the trajectory lasts
    pub length: u32,
}

impl TrajectorySample {
    /// Mean start position, where the eye re-centers for the new scene
    pub fn centroid(&self) -> Vec2 {
        if self.positions.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self.positions.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        sum / self.positions.len() as f32
    }
}

/// Draw an integer uniformly from an inclusive tick range
pub fn sample_ticks<R: Rng>(rng: &mut R, range: TickRange) -> u32 {
    rng.random_range(range.min..=range.max)
}

/// Clip one velocity axis so `start + vel * ticks` stays inside `world`.
///
/// Zero ticks leaves the velocity untouched.
pub fn limit_velocity(vel: f32, start: f32, ticks: u32, world: Extent) -> f32 {
    if ticks == 0 {
        return vel;
    }
    let ticks = ticks as f32;
    let end = start + vel * ticks;
    if end > world.max {
        (world.max - start) / ticks
    } else if end < world.min {
        (world.min - start) / ticks
    } else {
        vel
    }
}

/// Draw a new trajectory for `config.num_objects` objects.
pub fn sample_trajectory<R: Rng>(
    rng: &mut R,
    config: &SaccadeConfig,
    world: Extent,
) -> TrajectorySample {
    let length = sample_ticks(rng, config.trajectory_length);
    if length == 0 {
        log::warn!("Degenerate trajectory of length 0, velocity clipping skipped");
    }

    let n = config.num_objects;
    let mut positions = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);
    let vmax = config.velocity_max;

    for _ in 0..n {
        // always rolled; part of the draw order
        let zero_vel = rng.random::<f64>() < config.zero_velocity_p;
        let pos = Vec2::new(
            world.min + rng.random::<f32>() * world.range(),
            world.min + rng.random::<f32>() * world.range(),
        );
        let vel = if zero_vel {
            Vec2::ZERO
        } else {
            let raw = Vec2::new(
                -vmax + 2.0 * rng.random::<f32>() * vmax,
                -vmax + 2.0 * rng.random::<f32>() * vmax,
            );
            Vec2::new(
                limit_velocity(raw.x, pos.x, length, world),
                limit_velocity(raw.y, pos.y, length, world),
            )
        };
        positions.push(pos);
        velocities.push(vel);
    }

    TrajectorySample {
        positions,
        velocities,
        length,
    }
}
