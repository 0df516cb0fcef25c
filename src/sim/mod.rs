//! Deterministic simulation module
//!
//! All episode logic lives here. This module must be pure and deterministic:
//! - Integer ticks only, no wall clock
//! - Injected, seeded RNG only
//! - Stable iteration order (by object index)
//! - No rendering or I/O dependencies

pub mod bounds;
pub mod clock;
pub mod saccade;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use bounds::{Bounds, Extent};
pub use clock::{EpisodeClock, Rollover, TickCounter};
pub use saccade::{clip_to_objects, limit_saccade, random_displacement};
pub use state::{EyeState, ObjectState, Snapshot};
pub use tick::{Episode, StepResult};
pub use trajectory::{TrajectorySample, limit_velocity, sample_ticks, sample_trajectory};
