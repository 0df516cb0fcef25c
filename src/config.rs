//! Episode configuration
//!
//! Persisted as JSON next to generated datasets so a run can be reproduced.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Inclusive integer range of ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

impl TickRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Fixed-length range
    pub fn fixed(len: u32) -> Self {
        Self { min: len, max: len }
    }
}

/// Where saccade plans come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaccadeSource {
    /// Internally drawn random displacement
    #[default]
    Random,
    /// Caller registers every plan; a missing plan fails the step
    External,
    /// Caller registers plans; a missing plan falls back to a random draw
    ExternalOrRandom,
}

impl SaccadeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaccadeSource::Random => "random",
            SaccadeSource::External => "external",
            SaccadeSource::ExternalOrRandom => "external_or_random",
        }
    }

    /// Whether registered plans are consumed at all
    pub fn accepts_external(&self) -> bool {
        !matches!(self, SaccadeSource::Random)
    }
}

/// Episode parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaccadeConfig {
    /// Trajectory lengths (ticks)
    pub trajectory_length: TickRange,
    /// Fixation durations (ticks)
    pub fixation_duration: TickRange,
    /// Maximum random saccade per axis
    pub saccade_max: f32,
    /// Maximum object velocity per axis
    pub velocity_max: f32,
    /// Probability of a stationary object, rolled per object per trajectory
    pub zero_velocity_p: f64,
    /// Edge around the world not to look past
    pub margin: f32,
    /// Size of the view as a proportion of the -1..1 world
    pub view_pct: f32,
    /// Objects simultaneously in the scene
    pub num_objects: usize,
    /// Leading objects that constrain saccades (all of them can over-constrain)
    pub num_constrained: usize,
    /// Plan source policy
    pub saccade_source: SaccadeSource,
}

impl Default for SaccadeConfig {
    fn default() -> Self {
        Self {
            trajectory_length: TickRange::new(TRAJ_LEN_MIN, TRAJ_LEN_MAX),
            fixation_duration: TickRange::new(FIX_DUR_MIN, FIX_DUR_MAX),
            saccade_max: SACCADE_MAX,
            velocity_max: VELOCITY_MAX,
            zero_velocity_p: ZERO_VELOCITY_P,
            margin: MARGIN,
            view_pct: VIEW_PCT,
            num_objects: NUM_OBJECTS,
            num_constrained: NUM_CONSTRAINED,
            saccade_source: SaccadeSource::Random,
        }
    }
}

impl SaccadeConfig {
    /// Check ranges; construction refuses a config that fails here
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        for (name, range) in [
            ("trajectory_length", self.trajectory_length),
            ("fixation_duration", self.fixation_duration),
        ] {
            if range.min > range.max {
                return invalid(format!("{name} min {} exceeds max {}", range.min, range.max));
            }
        }
        if !(0.0..1.0).contains(&self.margin) {
            return invalid(format!("margin {} must be in [0, 1)", self.margin));
        }
        if !(self.view_pct - self.margin > 0.0) {
            return invalid(format!(
                "view_pct {} must exceed margin {}",
                self.view_pct, self.margin
            ));
        }
        if !(0.0..=1.0).contains(&self.zero_velocity_p) {
            return invalid(format!(
                "zero_velocity_p {} must be a probability",
                self.zero_velocity_p
            ));
        }
        for (name, value) in [
            ("saccade_max", self.saccade_max),
            ("velocity_max", self.velocity_max),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} {value} must be finite and non-negative"));
            }
        }
        if self.num_objects == 0 {
            return invalid("num_objects must be at least 1".to_string());
        }
        if self.num_constrained > self.num_objects {
            return invalid(format!(
                "num_constrained {} exceeds num_objects {}",
                self.num_constrained, self.num_objects
            ));
        }
        // a one-tick fixation plans on the step that starts it, leaving no
        // tick at which an external plan could be registered
        if self.saccade_source == SaccadeSource::External && self.fixation_duration.min < 2 {
            return invalid(format!(
                "external saccade source needs fixation_duration min >= 2, got {}",
                self.fixation_duration.min
            ));
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
