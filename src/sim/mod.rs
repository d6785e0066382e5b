//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical ticks only, never wall-clock deltas
//! - Seeded RNG only
//! - Stable iteration order (by obstacle index)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod event;
pub mod game_loop;
pub mod ground;
pub mod input;
pub mod obstacle;
pub mod state;
pub mod tick;
pub mod timing;

pub use avatar::{Avatar, AvatarState, AvatarTuning};
pub use collision::Aabb;
pub use event::{CollisionEvent, SimEvent};
pub use game_loop::{FrameOutcome, Simulation};
pub use ground::{FlatGround, GroundTracker};
pub use input::{Controls, InputState, KeyBindings, KeyCode};
pub use obstacle::{Obstacle, ObstaclePool};
pub use state::{GamePhase, GameState};
pub use tick::tick;
pub use timing::TimeAccumulator;
