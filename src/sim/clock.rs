//! Episode clock
//!
//! Two tick counters: one within the current trajectory, one within the
//! current fixation. Each period's length is decided one step ahead, so a
//! counter holds both the running length and the length queued for the
//! next period.

use serde::{Deserialize, Serialize};

/// Counts `0..period-1` and wraps, switching to the queued length on wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounter {
    /// Current tick, -1 before the first advance
    cur: i64,
    /// Length of the running period
    period: i64,
    /// Length of the next period
    next_period: i64,
}

impl TickCounter {
    /// Counter whose first advance lands on tick 0
    pub fn new(len: u32) -> Self {
        let len = i64::from(len);
        Self {
            cur: -1,
            period: len,
            next_period: len,
        }
    }

    #[inline]
    pub fn cur(&self) -> i64 {
        self.cur
    }

    #[inline]
    pub fn period(&self) -> i64 {
        self.period
    }

    /// Queue the length used once the running period wraps
    pub fn queue_period(&mut self, len: u32) {
        self.next_period = i64::from(len);
    }

    /// Whether the next advance wraps
    #[inline]
    pub fn wraps_next(&self) -> bool {
        self.cur + 1 >= self.period
    }

    /// Place the counter one tick before the wrap, so the next advance wraps
    pub fn force_wrap(&mut self) {
        self.cur = self.period - 1;
    }

    /// Step one tick. Returns true when a new period starts on this tick,
    /// which includes the very first advance.
    pub fn advance(&mut self) -> bool {
        let first = self.cur < 0;
        self.cur += 1;
        if self.cur >= self.period {
            self.cur = 0;
            self.period = self.next_period;
            return true;
        }
        first
    }
}

/// Rollover flags for one advance of both counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rollover {
    pub trajectory: bool,
    pub fixation: bool,
}

/// Trajectory and fixation counters advanced together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeClock {
    pub trajectory: TickCounter,
    pub fixation: TickCounter,
}

impl EpisodeClock {
    /// Clock whose first advance starts a trajectory and fires a saccade
    pub fn new(trajectory_len: u32, fixation_len: u32) -> Self {
        let mut fixation = TickCounter::new(fixation_len);
        fixation.force_wrap();
        Self {
            trajectory: TickCounter::new(trajectory_len),
            fixation,
        }
    }

    pub fn advance(&mut self) -> Rollover {
        Rollover {
            trajectory: self.trajectory.advance(),
            fixation: self.fixation.advance(),
        }
    }

    /// Whether the step after the current one needs a new trajectory
    #[inline]
    pub fn trajectory_ends_next(&self) -> bool {
        self.trajectory.wraps_next()
    }

    /// Whether the step after the current one executes a saccade
    #[inline]
    pub fn fixation_ends_next(&self) -> bool {
        self.fixation.wraps_next()
    }

    /// Whether an advance from here would call the saccade planner at the
    /// end of that step
    pub fn plans_after_advance(&self) -> bool {
        let mut ahead = *self;
        ahead.advance();
        !ahead.trajectory_ends_next() && ahead.fixation_ends_next()
    }

    /// Whether an external plan registered now lands in the planning step
    #[inline]
    pub fn plan_window_open(&self) -> bool {
        self.fixation.cur + 2 == self.fixation.period
    }
}
