//! Lane Runner - simulation core for an endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, timing, avatar, obstacles, ground)
//! - `config`: Data-driven tuning, loadable from JSON
//! - `error`: Setup-time error types
//!
//! Rendering, audio and UI live with the host. The core talks to them
//! through [`sim::SimEvent`] and the [`sim::GroundTracker`] trait.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{CatchUpPolicy, RunnerConfig, SpawnRange};
pub use error::{Result, SimError};
pub use sim::{FrameOutcome, Simulation};

/// Default tuning constants
pub mod consts {
    /// Fixed logical tick interval in seconds
    pub const TICK_INTERVAL: f64 = 0.5;

    /// Number of pooled obstacles
    pub const OBSTACLE_COUNT: usize = 50;
    /// Obstacle centre height above the ground plane
    pub const OBSTACLE_Y: f32 = 7.0;
    /// Lateral spawn range (inclusive)
    pub const SPAWN_X_MIN: i32 = -200;
    pub const SPAWN_X_MAX: i32 = 200;
    /// Longitudinal spawn range, relative to the recycle boundary (inclusive)
    pub const SPAWN_Z_MIN: i32 = -3000;
    pub const SPAWN_Z_MAX: i32 = -1000;
    /// Distance between the avatar and the recycle boundary (camera offset)
    pub const RECYCLE_MARGIN: f32 = 35.0;

    /// World units the avatar advances per tick
    pub const FORWARD_SPEED: f32 = 2.5;
    /// World units the avatar shifts sideways per tick
    pub const LATERAL_SPEED: f32 = 4.0;
    /// Half-width of the playable corridor
    pub const LANE_HALF_WIDTH: f32 = 200.0;
    /// Upward velocity applied on takeoff (units/tick)
    pub const JUMP_VELOCITY: f32 = 6.0;
    /// Vertical velocity lost per tick while airborne
    pub const GRAVITY: f32 = 1.0;

    /// Avatar bounding box half extents
    pub const AVATAR_HALF_EXTENTS: [f32; 3] = [2.5, 5.0, 2.5];
    /// Obstacle bounding box half extents
    pub const OBSTACLE_HALF_EXTENTS: [f32; 3] = [5.0, 7.0, 5.0];

    /// Length of one ground tile along z
    pub const GROUND_SEGMENT_LENGTH: f32 = 500.0;
}
