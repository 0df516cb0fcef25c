//! Saccade agents
//!
//! An agent looks at the current snapshot and proposes the displacement for
//! the next saccade. Episodes in an external source mode ask the agent only
//! while the plan window is open.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Snapshot;

/// Source of externally computed saccade plans
pub trait SaccadeAgent {
    fn name(&self) -> &str;

    /// Proposed eye displacement, in world units
    fn act(&mut self, state: &Snapshot) -> Vec2;
}

/// Agent that saccades uniformly at random, symmetric on both axes
#[derive(Debug, Clone)]
pub struct RandomAgent<R: Rng = Pcg32> {
    /// Maximum saccade size per axis
    pub sac_max: f32,
    rng: R,
}

impl RandomAgent<Pcg32> {
    pub fn from_seed(sac_max: f32, seed: u64) -> Self {
        Self::new(sac_max, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(sac_max: f32, rng: R) -> Self {
        Self { sac_max, rng }
    }
}

impl<R: Rng> SaccadeAgent for RandomAgent<R> {
    fn name(&self) -> &str {
        "RandomAgent"
    }

    fn act(&mut self, _state: &Snapshot) -> Vec2 {
        let x = 2.0 * (self.rng.random::<f32>() - 0.5) * self.sac_max;
        let y = 2.0 * (self.rng.random::<f32>() - 0.5) * self.sac_max;
        Vec2::new(x, y)
    }
}
