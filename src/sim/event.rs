//! Domain events emitted to the host
//!
//! The core never renders or plays sounds. Collaborators drain these after
//! each frame and update their own representation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The avatar ran into an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub obstacle_id: u32,
    pub obstacle_position: Vec3,
    pub avatar_position: Vec3,
    /// Tick on which the hit happened (1-based)
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// Obstacle moved ahead; the renderer should move its mesh and restore
    /// its default appearance
    ObstacleRecycled { id: u32, position: Vec3 },
    /// Obstacle was struck on its current approach
    ObstacleHit { id: u32 },
    Collision(CollisionEvent),
    /// Run ended
    GameOver { tick: u64, distance: f32 },
    /// Viewer crossed into a new ground tile
    GroundSegmentAdvanced { segment: i64 },
}
