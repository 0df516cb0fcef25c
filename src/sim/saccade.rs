//! Saccade planning
//!
//! A candidate eye displacement is tightened, one constrained object at a
//! time, so the object stays in view for the coming fixation and the eye
//! stays in the world.
//!
//! The tightening is greedy and order-dependent. When two constrained objects
//! pull in incompatible directions the last one processed wins, and earlier
//! objects may end up outside the view.
//!
//! Only random and external candidates pass through here. The saccade to the
//! centroid of a new trajectory is executed unclipped, so during the first
//! fixation of a trajectory an object can drift out of view when the fixation
//! outlasts what the view can hold.

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounds;

/// Random candidate displacement, each axis uniform in `[0, sac_max)`.
///
/// One-sided on purpose: the internal policy is a biased random walk, the
/// world clipping keeps it bounded.
pub fn random_displacement<R: Rng>(rng: &mut R, sac_max: f32) -> Vec2 {
    let x = rng.random::<f32>() * sac_max;
    let y = rng.random::<f32>() * sac_max;
    Vec2::new(x, y)
}

/// Tighten one axis of a saccade deviation against one object.
///
/// Steps, in order: predicted end position into view, eye into world,
/// current position into view, eye into world again.
pub fn limit_saccade(
    dev: f32,
    eye: f32,
    obj_pos: f32,
    obj_vel: f32,
    ticks: f32,
    bounds: &Bounds,
) -> f32 {
    let view = bounds.view;
    let world = bounds.world;
    let mut dev = dev;

    // current position is applied last and wins over the predicted end
    let obj_end = obj_pos + obj_vel * ticks;
    dev += view.overshoot(obj_end - (eye + dev));
    dev -= world.overshoot(eye + dev);

    dev += view.overshoot(obj_pos - (eye + dev));
    dev -= world.overshoot(eye + dev);

    dev
}

/// Clip a candidate displacement against each constrained object in index order.
pub fn clip_to_objects(
    candidate: Vec2,
    eye: Vec2,
    positions: &[Vec2],
    velocities: &[Vec2],
    ticks: u32,
    bounds: &Bounds,
) -> Vec2 {
    let ticks = ticks as f32;
    let mut plan = candidate;
    for (pos, vel) in positions.iter().zip(velocities) {
        plan.x = limit_saccade(plan.x, eye.x, pos.x, vel.x, ticks, bounds);
        plan.y = limit_saccade(plan.y, eye.y, pos.y, vel.y, ticks, bounds);
    }
    plan
}
