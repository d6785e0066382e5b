//! The player avatar
//!
//! Runs forward at a constant speed, strafes inside the lane and jumps
//! under simple per-tick gravity. All quantities are per tick, never per
//! second, so the arc is identical at any render rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::event::CollisionEvent;
use super::ground::GroundTracker;
use super::input::{Controls, InputState, KeyBindings};
use super::obstacle::ObstaclePool;
use crate::config::RunnerConfig;

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvatarState {
    #[default]
    Grounded,
    Jumping,
}

/// Movement constants, copied out of the config at setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarTuning {
    pub forward_speed: f32,
    pub lateral_speed: f32,
    pub lane_half_width: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub half_extents: Vec3,
}

impl AvatarTuning {
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            forward_speed: config.forward_speed,
            lateral_speed: config.lateral_speed,
            lane_half_width: config.lane_half_width,
            jump_velocity: config.jump_velocity,
            gravity: config.gravity,
            half_extents: config.avatar_half_extents,
        }
    }

    /// Upper bound on ticks spent airborne for one jump on flat ground
    pub fn max_airtime_ticks(&self) -> u32 {
        (2.0 * self.jump_velocity / self.gravity).ceil() as u32 + 2
    }
}

/// The single player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Feet position in world space (x lateral, y up, -z forward)
    pub position: Vec3,
    pub velocity_y: f32,
    pub state: AvatarState,
    pub tuning: AvatarTuning,
    pub bindings: KeyBindings,
    /// Jump input on the previous tick, for edge detection
    jump_held: bool,
}

impl Avatar {
    pub fn new(position: Vec3, tuning: AvatarTuning, bindings: KeyBindings) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            state: AvatarState::Grounded,
            tuning,
            bindings,
            jump_held: false,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(
            Vec3::new(0.0, config.ground_height, 0.0),
            AvatarTuning::from_config(config),
            config.bindings.clone(),
        )
    }

    /// World-space bounding box (box stands on the feet position)
    pub fn bounds(&self) -> Aabb {
        Aabb::resting_on(self.position, self.tuning.half_extents)
    }

    pub fn is_grounded(&self) -> bool {
        self.state == AvatarState::Grounded
    }

    /// Advance one tick: read input, move, then test against every active
    /// obstacle. An obstacle that hits is deactivated so the same approach
    /// reports only once.
    ///
    /// Input is sampled once per tick. A jump key pressed and released
    /// between two ticks is never seen; the key must still be held when the
    /// tick runs.
    pub fn update<G: GroundTracker + ?Sized>(
        &mut self,
        tick: u64,
        input: &InputState,
        obstacles: &mut ObstaclePool,
        ground: &G,
    ) -> Option<CollisionEvent> {
        let controls = self.bindings.resolve(input);
        self.step(controls, ground);
        self.check_collisions(tick, obstacles)
    }

    /// Movement half of a tick, without collision
    pub fn step<G: GroundTracker + ?Sized>(&mut self, controls: Controls, ground: &G) {
        let tuning = &self.tuning;

        self.position.z -= tuning.forward_speed;
        self.position.x = (self.position.x + controls.lateral_axis() * tuning.lateral_speed)
            .clamp(-tuning.lane_half_width, tuning.lane_half_width);

        let ground_y = ground.height_at(self.position.x, self.position.z);
        let jump_pressed = controls.jump && !self.jump_held;
        self.jump_held = controls.jump;

        if self.state == AvatarState::Grounded {
            if jump_pressed {
                self.state = AvatarState::Jumping;
                self.velocity_y = tuning.jump_velocity;
            } else {
                self.position.y = ground_y;
                return;
            }
        }

        // Airborne: integrate, then apply gravity
        self.position.y += self.velocity_y;
        self.velocity_y -= tuning.gravity;

        if self.position.y <= ground_y {
            self.position.y = ground_y;
            self.velocity_y = 0.0;
            self.state = AvatarState::Grounded;
        }
    }

    fn check_collisions(&mut self, tick: u64, obstacles: &mut ObstaclePool) -> Option<CollisionEvent> {
        let bounds = self.bounds();
        let obstacle = obstacles
            .obstacles_mut()
            .iter_mut()
            .find(|o| o.active && o.bounds().overlaps(&bounds))?;

        obstacle.active = false;
        log::info!(
            "Avatar hit obstacle {} at ({:.1}, {:.1}, {:.1}) on tick {}",
            obstacle.id,
            obstacle.position.x,
            obstacle.position.y,
            obstacle.position.z,
            tick
        );
        Some(CollisionEvent {
            obstacle_id: obstacle.id,
            obstacle_position: obstacle.position,
            avatar_position: self.position,
            tick,
        })
    }
}
