//! Game state and run lifecycle
//!
//! Everything a tick reads or writes lives in [`GameState`]. The host owns
//! it (through [`super::Simulation`]); there are no globals.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::event::SimEvent;
use super::ground::{FlatGround, GroundTracker};
use super::obstacle::ObstaclePool;
use crate::config::RunnerConfig;
use crate::error::Result;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are running
    Running,
    /// The avatar crashed; no more ticks until restart
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState<G: GroundTracker = FlatGround> {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Ticks simulated so far this run
    pub time_ticks: u64,
    pub avatar: Avatar,
    pub obstacles: ObstaclePool,
    pub ground: G,
    /// Distance from the avatar to the recycle boundary
    pub recycle_margin: f32,
    pub end_on_collision: bool,
    /// Pending events for the host (drained each frame)
    pub events: Vec<SimEvent>,
    start_z: f32,
}

impl<G: GroundTracker> GameState<G> {
    /// Validate the config and spawn a fresh run
    pub fn new(config: &RunnerConfig, seed: u64, ground: G) -> Result<Self> {
        config.validate()?;

        let avatar = Avatar::from_config(config);
        let start_z = avatar.position.z;
        let mut state = Self {
            seed,
            phase: GamePhase::Running,
            time_ticks: 0,
            avatar,
            obstacles: ObstaclePool::new(seed, config.obstacle_half_extents),
            ground,
            recycle_margin: config.recycle_margin,
            end_on_collision: config.end_on_collision,
            events: Vec::with_capacity(config.obstacle_count + 8),
            start_z,
        };
        state.spawn(config)?;

        log::info!("New run with seed {}", seed);
        Ok(state)
    }

    /// Reset avatar and obstacles for a new run, keeping the ground model
    pub fn restart(&mut self, config: &RunnerConfig, seed: u64) -> Result<()> {
        config.validate()?;

        self.seed = seed;
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.avatar = Avatar::from_config(config);
        self.start_z = self.avatar.position.z;
        self.obstacles = ObstaclePool::new(seed, config.obstacle_half_extents);
        self.recycle_margin = config.recycle_margin;
        self.end_on_collision = config.end_on_collision;
        self.events.clear();
        self.spawn(config)?;

        log::info!("Restarted run with seed {}", seed);
        Ok(())
    }

    fn spawn(&mut self, config: &RunnerConfig) -> Result<()> {
        self.obstacles.spawn_all(
            config.obstacle_count,
            config.spawn_x,
            config.spawn_z,
            config.obstacle_y,
        )?;
        if let Some(segment) = self.ground.update(self.avatar.position.z) {
            self.events.push(SimEvent::GroundSegmentAdvanced { segment });
        }
        Ok(())
    }

    /// Obstacles with z beyond this are behind the viewer
    pub fn boundary_z(&self) -> f32 {
        self.avatar.position.z + self.recycle_margin
    }

    /// Forward distance covered this run
    pub fn distance(&self) -> f32 {
        self.start_z - self.avatar.position.z
    }

    /// Obstacle position relative to the avatar's forward position
    pub fn relative_position(&self, world: Vec3) -> Vec3 {
        world - Vec3::Z * self.avatar.position.z
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
