//! Runner configuration
//!
//! Every gameplay tunable lives here. Configs are validated once at setup;
//! the simulation assumes a valid config on every tick.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::input::KeyBindings;

/// Inclusive integer spawn range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}

impl SpawnRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Non-degenerate means `min <= max`
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min as f32 && value <= self.max as f32
    }
}

/// What to do with pending ticks when a frame took longer than one interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CatchUpPolicy {
    /// Run one tick, then drop the backlog modulo the interval.
    /// Slow frames lose ticks instead of bursting through them.
    #[default]
    DropBacklog,
    /// Run up to `max_ticks` pending ticks per frame, then drop the rest
    CatchUp { max_ticks: u32 },
}

/// Complete runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    // === Timing ===
    /// Fixed logical tick interval (seconds)
    pub tick_interval: f64,
    pub catch_up: CatchUpPolicy,

    // === Obstacles ===
    pub obstacle_count: usize,
    /// Lateral spawn range
    pub spawn_x: SpawnRange,
    /// Longitudinal spawn range, relative to the recycle boundary (non-positive)
    pub spawn_z: SpawnRange,
    /// Fixed obstacle centre height
    pub obstacle_y: f32,
    pub obstacle_half_extents: Vec3,
    /// Obstacles further than this behind the avatar get recycled
    pub recycle_margin: f32,

    // === Avatar ===
    /// Units per tick, shared with world scroll
    pub forward_speed: f32,
    /// Units per tick
    pub lateral_speed: f32,
    pub lane_half_width: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub avatar_half_extents: Vec3,
    pub bindings: KeyBindings,

    // === Ground ===
    pub ground_height: f32,
    pub ground_segment_length: f32,

    // === Rules ===
    /// First collision ends the run
    pub end_on_collision: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            catch_up: CatchUpPolicy::DropBacklog,

            obstacle_count: OBSTACLE_COUNT,
            spawn_x: SpawnRange::new(SPAWN_X_MIN, SPAWN_X_MAX),
            spawn_z: SpawnRange::new(SPAWN_Z_MIN, SPAWN_Z_MAX),
            obstacle_y: OBSTACLE_Y,
            obstacle_half_extents: Vec3::from_array(OBSTACLE_HALF_EXTENTS),
            recycle_margin: RECYCLE_MARGIN,

            forward_speed: FORWARD_SPEED,
            lateral_speed: LATERAL_SPEED,
            lane_half_width: LANE_HALF_WIDTH,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            avatar_half_extents: Vec3::from_array(AVATAR_HALF_EXTENTS),
            bindings: KeyBindings::default(),

            ground_height: 0.0,
            ground_segment_length: GROUND_SEGMENT_LENGTH,

            end_on_collision: true,
        }
    }
}

impl RunnerConfig {
    /// Check every setup-time constraint
    pub fn validate(&self) -> Result<()> {
        if !(self.tick_interval.is_finite() && self.tick_interval > 0.0) {
            return Err(SimError::invalid(format!(
                "tick_interval must be positive, got {}",
                self.tick_interval
            )));
        }
        if let CatchUpPolicy::CatchUp { max_ticks: 0 } = self.catch_up {
            return Err(SimError::invalid("catch_up.max_ticks must be at least 1"));
        }
        if self.obstacle_count == 0 {
            return Err(SimError::invalid("obstacle_count must be at least 1"));
        }
        validate_range("spawn_x", self.spawn_x)?;
        validate_range("spawn_z", self.spawn_z)?;
        if self.spawn_z.max > 0 {
            return Err(SimError::invalid(format!(
                "spawn_z must lie ahead of the boundary (max <= 0), got max {}",
                self.spawn_z.max
            )));
        }

        finite("obstacle_y", self.obstacle_y)?;
        non_negative("recycle_margin", self.recycle_margin)?;
        finite("ground_height", self.ground_height)?;
        non_negative("forward_speed", self.forward_speed)?;
        non_negative("lateral_speed", self.lateral_speed)?;
        positive("lane_half_width", self.lane_half_width)?;
        positive("jump_velocity", self.jump_velocity)?;
        positive("gravity", self.gravity)?;
        positive("ground_segment_length", self.ground_segment_length)?;
        positive_extents("avatar_half_extents", self.avatar_half_extents)?;
        positive_extents("obstacle_half_extents", self.obstacle_half_extents)?;

        // Recycled obstacles land at avatar.z + margin + spawn_z, which must
        // be clear of the avatar on the far side
        let lead = self.recycle_lead();
        let clearance = self.avatar_half_extents.z + self.obstacle_half_extents.z;
        if lead <= clearance {
            return Err(SimError::invalid(format!(
                "spawn_z.max + recycle_margin must be below -{clearance} so recycled \
                 obstacles land ahead of the avatar, got {}",
                -lead
            )));
        }

        Ok(())
    }

    /// Smallest distance ahead of the avatar a recycled obstacle can land
    pub fn recycle_lead(&self) -> f32 {
        -(self.spawn_z.max as f32 + self.recycle_margin)
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn validate_range(name: &str, range: SpawnRange) -> Result<()> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} is degenerate: min {} > max {}",
            range.min, range.max
        )))
    }
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be finite, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be >= 0, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be > 0, got {value}")))
    }
}

fn positive_extents(name: &str, extents: Vec3) -> Result<()> {
    if extents.is_finite() && extents.min_element() > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} must be positive on every axis, got {extents}"
        )))
    }
}
