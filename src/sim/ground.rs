//! Ground height model
//!
//! The avatar asks the ground for its support height; the loop tells the
//! ground how far the viewer has travelled so tiled ground meshes can be
//! shifted forward by the renderer.

use serde::{Deserialize, Serialize};

/// Terrain queried by the avatar and advanced by the simulation loop
pub trait GroundTracker {
    /// Support height at a world position
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Follow the viewer. Returns the new segment index when the viewer
    /// crosses into a different ground tile.
    fn update(&mut self, viewer_z: f32) -> Option<i64>;
}

/// Infinite flat plane split into fixed-length tiles along z
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatGround {
    height: f32,
    segment_length: f32,
    /// Distance travelled toward -z
    scroll_offset: f32,
    segment: i64,
}

impl FlatGround {
    pub fn new(height: f32, segment_length: f32) -> Self {
        Self {
            height,
            segment_length,
            scroll_offset: 0.0,
            segment: 0,
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn segment(&self) -> i64 {
        self.segment
    }
}

impl GroundTracker for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn update(&mut self, viewer_z: f32) -> Option<i64> {
        self.scroll_offset = -viewer_z;
        let segment = (self.scroll_offset / self.segment_length).floor() as i64;
        if segment != self.segment {
            self.segment = segment;
            Some(segment)
        } else {
            None
        }
    }
}
