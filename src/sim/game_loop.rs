//! Frame-driven simulation loop
//!
//! The host calls [`Simulation::on_frame`] once per rendered frame with the
//! wall-clock time since the previous frame. Key events are delivered with
//! [`Simulation::key_event`] between frames; since every entry point takes
//! `&mut self`, input can never land in the middle of a tick.
//!
//! Events are kept for one frame only: each `on_frame` call starts by
//! discarding anything not yet drained (including events from setup or
//! `restart`), so hosts call [`Simulation::drain_events`] after every frame
//! they care about.

use super::event::{CollisionEvent, SimEvent};
use super::ground::{FlatGround, GroundTracker};
use super::input::{InputState, KeyCode};
use super::state::{GamePhase, GameState};
use super::tick::tick;
use super::timing::TimeAccumulator;
use crate::config::{CatchUpPolicy, RunnerConfig};
use crate::error::Result;

/// What happened during one `on_frame` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// Logical ticks run this frame
    pub ticks: u32,
    /// First collision this frame, if any
    pub collision: Option<CollisionEvent>,
    /// The run ended during this frame
    pub game_over: bool,
}

/// Host-owned simulation: config, state, input and clock in one value
#[derive(Debug, Clone)]
pub struct Simulation<G: GroundTracker = FlatGround> {
    config: RunnerConfig,
    state: GameState<G>,
    input: InputState,
    clock: TimeAccumulator,
}

impl Simulation<FlatGround> {
    /// Simulation on flat ground
    pub fn new(config: RunnerConfig, seed: u64) -> Result<Self> {
        let ground = FlatGround::new(config.ground_height, config.ground_segment_length);
        Self::with_ground(config, seed, ground)
    }
}

impl<G: GroundTracker> Simulation<G> {
    /// Simulation over a custom ground model
    pub fn with_ground(config: RunnerConfig, seed: u64, ground: G) -> Result<Self> {
        let state = GameState::new(&config, seed, ground)?;
        let clock = TimeAccumulator::new(config.tick_interval)?;
        Ok(Self {
            config,
            state,
            input: InputState::new(),
            clock,
        })
    }

    /// Advance by one rendered frame. Undrained events from the previous
    /// frame are dropped.
    pub fn on_frame(&mut self, elapsed_seconds: f64) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        self.state.events.clear();
        if self.state.is_over() {
            return outcome;
        }

        self.clock.advance(elapsed_seconds);

        match self.config.catch_up {
            CatchUpPolicy::DropBacklog => {
                if self.clock.consume_tick_dropping_backlog() {
                    self.run_tick(&mut outcome);
                }
            }
            CatchUpPolicy::CatchUp { max_ticks } => {
                while outcome.ticks < max_ticks && !outcome.game_over && self.clock.consume_tick() {
                    self.run_tick(&mut outcome);
                }
                let dropped = self.clock.drop_backlog();
                if dropped > 0 {
                    log::debug!("Dropped {} pending ticks after catch-up cap", dropped);
                }
            }
        }

        outcome
    }

    fn run_tick(&mut self, outcome: &mut FrameOutcome) {
        let collision = tick(&mut self.state, &self.input);
        outcome.ticks += 1;
        if outcome.collision.is_none() {
            outcome.collision = collision;
        }
        if self.state.phase == GamePhase::GameOver {
            outcome.game_over = true;
        }
    }

    /// Host key-down / key-up
    pub fn key_event(&mut self, code: KeyCode, pressed: bool) {
        self.input.set_pressed(code, pressed);
    }

    /// Host lost focus: release every key
    pub fn release_all_keys(&mut self) {
        self.input.release_all();
    }

    /// Start a new run with a fresh seed, keeping the config
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        self.state.restart(&self.config, seed)?;
        self.clock.reset();
        self.input.release_all();
        Ok(())
    }

    /// Take the events produced by the most recent frame
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.state.events.drain(..)
    }

    pub fn state(&self) -> &GameState<G> {
        &self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn clock(&self) -> &TimeAccumulator {
        &self.clock
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.state.time_ticks
    }

    pub fn distance(&self) -> f32 {
        self.state.distance()
    }
}
