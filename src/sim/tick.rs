//! Discrete step engine
//!
//! Advances an episode one tick at a time. Every state transition is planned
//! one step ahead: the trajectory and saccade for tick `t + 1` are computed at
//! the end of tick `t`, so clipping always sees where objects will be.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::Bounds;
use super::clock::EpisodeClock;
use super::saccade::{clip_to_objects, random_displacement};
use super::state::{EyeState, ObjectState, Snapshot};
use super::trajectory::{sample_ticks, sample_trajectory};
use crate::agent::SaccadeAgent;
use crate::config::{SaccadeConfig, SaccadeSource};
use crate::error::SimError;

/// What happened on one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// A new trajectory started (velocities switched)
    pub rolled_over_trajectory: bool,
    /// The eye executed a saccade
    pub rolled_over_saccade: bool,
}

/// One episode: objects, eye, clock and the generator driving them
#[derive(Debug, Clone)]
pub struct Episode<R: Rng = Pcg32> {
    config: SaccadeConfig,
    bounds: Bounds,
    rng: R,
    clock: EpisodeClock,
    objects: Vec<ObjectState>,
    eye: EyeState,
    /// Externally registered plan waiting for the planning step
    registered_plan: Option<Vec2>,
    last: StepResult,
    steps: u64,
}

impl Episode<Pcg32> {
    /// Episode driven by a `Pcg32` seeded from `seed`
    pub fn from_seed(config: SaccadeConfig, seed: u64) -> Result<Self, SimError> {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Episode<R> {
    /// Validate `config` and prepare the first trajectory. The first `step()`
    /// starts it and saccades to it.
    pub fn new(config: SaccadeConfig, rng: R) -> Result<Self, SimError> {
        config.validate()?;
        let bounds = Bounds::new(config.margin, config.view_pct);
        let n = config.num_objects;

        let mut episode = Self {
            config,
            bounds,
            rng,
            clock: EpisodeClock::new(0, 0),
            objects: vec![ObjectState::default(); n],
            eye: EyeState::default(),
            registered_plan: None,
            last: StepResult::default(),
            steps: 0,
        };
        let (length, duration) = episode.start_trajectory();
        episode.clock = EpisodeClock::new(length, duration);
        Ok(episode)
    }

    pub fn config(&self) -> &SaccadeConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance one tick.
    ///
    /// Fails only in `External` mode when this step must plan a saccade and
    /// no plan was registered. Nothing is mutated in that case, so the caller
    /// may register a plan and step again.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        if self.config.saccade_source == SaccadeSource::External
            && self.registered_plan.is_none()
            && self.clock.plans_after_advance()
        {
            return Err(SimError::PlanNotReady {
                fixation_tick: self.clock.fixation.cur(),
                duration: self.clock.fixation.period(),
            });
        }

        let rollover = self.clock.advance();

        if rollover.trajectory {
            for obj in &mut self.objects {
                obj.vel = obj.next_vel;
            }
        }

        if rollover.fixation {
            self.eye.execute();
        } else {
            self.eye.hold();
        }

        // next state was computed on the previous step
        let eye = self.eye.pos;
        for obj in &mut self.objects {
            obj.pos = obj.next_pos;
            obj.view_pos = obj.pos - eye;
        }

        if self.clock.trajectory_ends_next() {
            self.start_trajectory();
        } else {
            for obj in &mut self.objects {
                obj.next_pos = obj.pos + obj.vel;
            }
            if self.clock.fixation_ends_next() {
                self.plan_saccade()?;
            }
        }

        self.last = StepResult {
            rolled_over_trajectory: rollover.trajectory,
            rolled_over_saccade: rollover.fixation,
        };
        self.steps += 1;
        log::trace!(
            "step {}: traj tick {}/{}, fix tick {}/{}, eye {}",
            self.steps,
            self.clock.trajectory.cur(),
            self.clock.trajectory.period(),
            self.clock.fixation.cur(),
            self.clock.fixation.period(),
            self.eye.pos
        );
        Ok(self.last)
    }

    /// Whether `set_pending_plan` would be accepted right now
    pub fn plan_window_open(&self) -> bool {
        self.clock.plan_window_open()
    }

    /// Register an externally computed saccade displacement.
    ///
    /// Only valid with exactly two ticks left in the fixation; the plan is
    /// clipped like a random one when the next step plans the saccade.
    pub fn set_pending_plan(&mut self, plan: Vec2) -> Result<(), SimError> {
        if !self.clock.plan_window_open() {
            return Err(SimError::PlanWindowMissed {
                fixation_tick: self.clock.fixation.cur(),
                duration: self.clock.fixation.period(),
            });
        }
        if !self.config.saccade_source.accepts_external() {
            log::debug!("Ignoring external plan {plan}: saccade source is random");
            return Ok(());
        }
        self.registered_plan = Some(plan);
        Ok(())
    }

    /// Ask `agent` for a plan when the window is open, then step
    pub fn step_with_agent<A: SaccadeAgent + ?Sized>(
        &mut self,
        agent: &mut A,
    ) -> Result<StepResult, SimError> {
        if self.config.saccade_source.accepts_external() && self.plan_window_open() {
            let plan = agent.act(&self.current_state());
            self.set_pending_plan(plan)?;
        }
        self.step()
    }

    /// Read-only snapshot of the current tick
    pub fn current_state(&self) -> Snapshot {
        Snapshot {
            object_positions: self.objects.iter().map(|o| o.pos).collect(),
            object_velocities: self.objects.iter().map(|o| o.vel).collect(),
            object_view_positions: self.objects.iter().map(|o| o.view_pos).collect(),
            object_next_positions: self.objects.iter().map(|o| o.next_pos).collect(),
            eye_position: self.eye.pos,
            pending_plan: self.eye.pending_plan,
            executed_saccade: self.eye.saccade,
            trajectory_tick: self.clock.trajectory.cur(),
            trajectory_length: self.clock.trajectory.period(),
            fixation_tick: self.clock.fixation.cur(),
            fixation_duration: self.clock.fixation.period(),
            new_trajectory: self.last.rolled_over_trajectory,
            new_saccade: self.last.rolled_over_saccade,
        }
    }

    /// Draw the next trajectory into the `next_*` fields and schedule a
    /// saccade to its centroid on the following step. Returns the new
    /// trajectory length and fixation duration.
    ///
    /// The centroid saccade is not clipped against the view.
    fn start_trajectory(&mut self) -> (u32, u32) {
        let sample = sample_trajectory(&mut self.rng, &self.config, self.bounds.world);
        for (obj, (pos, vel)) in self
            .objects
            .iter_mut()
            .zip(sample.positions.iter().zip(&sample.velocities))
        {
            obj.next_pos = *pos;
            obj.next_vel = *vel;
        }

        let duration = sample_ticks(&mut self.rng, self.config.fixation_duration);
        let centroid = sample.centroid();
        self.eye.pending_plan = centroid - self.eye.pos;
        if self.registered_plan.take().is_some() {
            log::debug!("External plan discarded by new trajectory");
        }

        self.clock.trajectory.queue_period(sample.length);
        self.clock.fixation.queue_period(duration);
        self.clock.fixation.force_wrap();

        log::debug!(
            "New trajectory: length {}, fixation {}, centroid {}",
            sample.length,
            duration,
            centroid
        );
        (sample.length, duration)
    }

    /// Choose and clip the saccade executed at the next fixation rollover
    fn plan_saccade(&mut self) -> Result<(), SimError> {
        let duration = sample_ticks(&mut self.rng, self.config.fixation_duration);
        self.clock.fixation.queue_period(duration);

        let candidate = match (self.config.saccade_source, self.registered_plan.take()) {
            (SaccadeSource::Random, _) => random_displacement(&mut self.rng, self.config.saccade_max),
            (_, Some(plan)) => plan,
            (SaccadeSource::ExternalOrRandom, None) => {
                log::debug!("No external plan registered, falling back to random saccade");
                random_displacement(&mut self.rng, self.config.saccade_max)
            }
            (SaccadeSource::External, None) => {
                return Err(SimError::PlanNotReady {
                    fixation_tick: self.clock.fixation.cur(),
                    duration: self.clock.fixation.period(),
                });
            }
        };

        let n = self.config.num_constrained;
        let positions: Vec<Vec2> = self.objects[..n].iter().map(|o| o.next_pos).collect();
        let velocities: Vec<Vec2> = self.objects[..n].iter().map(|o| o.next_vel).collect();
        let plan = clip_to_objects(
            candidate,
            self.eye.pos,
            &positions,
            &velocities,
            duration,
            &self.bounds,
        );
        log::debug!("Planned saccade {plan} (candidate {candidate}, fixation {duration})");
        self.eye.pending_plan = plan;
        Ok(())
    }
}
