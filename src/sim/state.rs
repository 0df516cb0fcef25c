//! Object and eye state, plus the read-only snapshot handed to renderers
//! and loggers.

use std::fmt::Write as _;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A tracked object
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Position on the next tick (already planned)
    pub next_pos: Vec2,
    /// Velocity of the next trajectory, equal to `vel` mid-trajectory
    pub next_vel: Vec2,
    /// `pos - eye`
    pub view_pos: Vec2,
}

/// The simulated eye
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeState {
    /// World coordinates
    pub pos: Vec2,
    /// Displacement applied at the next fixation rollover
    pub pending_plan: Vec2,
    /// Displacement applied on the last step, zero while fixating
    pub saccade: Vec2,
}

impl EyeState {
    /// Apply the pending plan
    pub fn execute(&mut self) {
        self.pos += self.pending_plan;
        self.saccade = self.pending_plan;
        self.pending_plan = Vec2::ZERO;
    }

    /// Hold fixation
    pub fn hold(&mut self) {
        self.saccade = Vec2::ZERO;
    }
}

/// Per-step view of an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub object_positions: Vec<Vec2>,
    pub object_velocities: Vec<Vec2>,
    pub object_view_positions: Vec<Vec2>,
    pub object_next_positions: Vec<Vec2>,
    pub eye_position: Vec2,
    pub pending_plan: Vec2,
    pub executed_saccade: Vec2,
    pub trajectory_tick: i64,
    pub trajectory_length: i64,
    pub fixation_tick: i64,
    pub fixation_duration: i64,
    /// A trajectory started on the last step
    pub new_trajectory: bool,
    /// A saccade executed on the last step
    pub new_saccade: bool,
}

impl Snapshot {
    /// Compact label for the step, e.g. `t 2, s 0, x0 +0.31, y0 -0.12`
    pub fn trial_name(&self) -> String {
        let mut name = format!("t {}, s {}", self.trajectory_tick, self.fixation_tick);
        for (i, p) in self.object_positions.iter().enumerate() {
            let _ = write!(name, ", x{i} {:+4.2}, y{i} {:+4.2}", p.x, p.y);
        }
        name
    }
}
