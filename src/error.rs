//! Error types for episode construction and stepping

use thiserror::Error;

/// Errors surfaced by configuration, planning and plan registration.
///
/// None of these abort the process; a generator can log the failure and
/// move on to the next episode.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// External plan registered outside the two-ticks-before-rollover window.
    #[error("saccade plan window missed (fixation tick {fixation_tick}, duration {duration})")]
    PlanWindowMissed { fixation_tick: i64, duration: i64 },
    /// External mode needs a plan on this step but none was registered.
    #[error("no external saccade plan registered (fixation tick {fixation_tick}, duration {duration})")]
    PlanNotReady { fixation_tick: i64, duration: i64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
