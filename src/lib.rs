//! Saccade Sim - synthetic episodes of moving targets and eye movements
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bounds, trajectories, saccades, clock, step engine)
//! - `config`: Episode parameters with validation and JSON persistence
//! - `agent`: Saccade agents that supply external plans
//! - `error`: Error kinds returned by construction and stepping

pub mod agent;
pub mod config;
pub mod error;
pub mod sim;

pub use agent::{RandomAgent, SaccadeAgent};
pub use config::{SaccadeConfig, SaccadeSource, TickRange};
pub use error::SimError;
pub use sim::{Episode, Snapshot, StepResult};

/// Default episode parameters
pub mod consts {
    /// Trajectory length range (ticks, inclusive)
    pub const TRAJ_LEN_MIN: u32 = 4;
    pub const TRAJ_LEN_MAX: u32 = 4;

    /// Fixation duration range (ticks, inclusive)
    pub const FIX_DUR_MIN: u32 = 2;
    pub const FIX_DUR_MAX: u32 = 2;

    /// Maximum per-axis saccade displacement
    pub const SACCADE_MAX: f32 = 0.4;
    /// Maximum per-axis object velocity (world units per tick)
    pub const VELOCITY_MAX: f32 = 0.4;
    /// Probability that a new trajectory is stationary
    pub const ZERO_VELOCITY_P: f64 = 0.0;

    /// Edge around the -1..1 world the eye and objects never cross
    pub const MARGIN: f32 = 0.1;
    /// View half-size as a fraction of the world half-size
    pub const VIEW_PCT: f32 = 0.5;

    /// Objects per scene, and how many of them constrain saccades
    pub const NUM_OBJECTS: usize = 1;
    pub const NUM_CONSTRAINED: usize = 1;
}
