//! Fixed timestep simulation tick
//!
//! One tick runs avatar movement and collision, then obstacle recycling,
//! then the ground update. The order matters: a same-tick collision is
//! tested against obstacle positions from before recycling.

use super::event::{CollisionEvent, SimEvent};
use super::ground::GroundTracker;
use super::input::InputState;
use super::state::{GamePhase, GameState};

/// Advance the game state by one logical tick
pub fn tick<G: GroundTracker>(state: &mut GameState<G>, input: &InputState) -> Option<CollisionEvent> {
    if state.phase == GamePhase::GameOver {
        return None;
    }

    state.time_ticks += 1;

    // Avatar physics and collision
    let collision = state
        .avatar
        .update(state.time_ticks, input, &mut state.obstacles, &state.ground);

    if let Some(hit) = collision {
        state.events.push(SimEvent::ObstacleHit {
            id: hit.obstacle_id,
        });
        state.events.push(SimEvent::Collision(hit));

        if state.end_on_collision {
            state.phase = GamePhase::GameOver;
            let distance = state.distance();
            state.events.push(SimEvent::GameOver {
                tick: state.time_ticks,
                distance,
            });
            log::info!(
                "Game over on tick {} after {:.1} units",
                state.time_ticks,
                distance
            );
        }
    }

    // Obstacle recycling against the post-move boundary
    let boundary = state.boundary_z();
    state.obstacles.recycle_passed(boundary, &mut state.events);

    // Ground follows the viewer
    if let Some(segment) = state.ground.update(state.avatar.position.z) {
        state.events.push(SimEvent::GroundSegmentAdvanced { segment });
    }

    log::trace!(
        "Tick {}: avatar ({:.1}, {:.1}, {:.1}) {:?}",
        state.time_ticks,
        state.avatar.position.x,
        state.avatar.position.y,
        state.avatar.position.z,
        state.avatar.state
    );

    collision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunnerConfig, SpawnRange};
    use crate::sim::avatar::AvatarState;
    use crate::sim::ground::FlatGround;
    use crate::sim::input::KeyCode;
    use proptest::prelude::*;

    fn scenario_config() -> RunnerConfig {
        RunnerConfig {
            obstacle_count: 1,
            spawn_x: SpawnRange::new(50, 50),
            spawn_z: SpawnRange::new(-100, -100),
            recycle_margin: 0.0,
            forward_speed: 10.0,
            ..Default::default()
        }
    }

    fn new_state(config: &RunnerConfig, seed: u64) -> GameState {
        GameState::new(config, seed, FlatGround::new(0.0, config.ground_segment_length)).unwrap()
    }

    #[test]
    fn test_pinned_obstacle_recycles_after_crossing() {
        let config = scenario_config();
        let mut state = new_state(&config, 1);
        let input = InputState::new();

        for _ in 0..10 {
            tick(&mut state, &input);
        }
        // Relative z has reached 0 but not crossed it
        let obstacle = state.obstacles.get(0).unwrap();
        assert_eq!(state.relative_position(obstacle.position).z, 0.0);
        assert!(!state.events.iter().any(|e| matches!(e, SimEvent::ObstacleRecycled { .. })));

        tick(&mut state, &input);
        let obstacle = state.obstacles.get(0).unwrap();
        assert_eq!(state.relative_position(obstacle.position).z, -100.0);
        assert_eq!(obstacle.position.x, 50.0);

        let recycled: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ObstacleRecycled { .. }))
            .collect();
        assert_eq!(recycled.len(), 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_recycle_with_margin_lands_ahead_of_avatar() {
        let config = RunnerConfig {
            recycle_margin: 35.0,
            ..scenario_config()
        };
        let mut state = new_state(&config, 1);
        let input = InputState::new();

        // Boundary is 35 behind the avatar, so z -100 passes it on tick 14
        for _ in 0..13 {
            tick(&mut state, &input);
        }
        assert!(state.events.is_empty());

        tick(&mut state, &input);
        let obstacle = state.obstacles.get(0).unwrap();
        assert_eq!(state.avatar.position.z, -140.0);
        assert!(obstacle.position.z < state.avatar.position.z);
        assert_eq!(state.relative_position(obstacle.position).z, -65.0);
        assert!(obstacle.active);
    }

    #[test]
    fn test_collision_ends_run() {
        let config = RunnerConfig {
            spawn_x: SpawnRange::new(0, 0),
            forward_speed: 10.0,
            ..scenario_config()
        };
        let mut state = new_state(&config, 1);
        let input = InputState::new();

        let mut hit = None;
        for _ in 0..20 {
            if let Some(event) = tick(&mut state, &input) {
                hit = Some(event);
                break;
            }
        }

        let hit = hit.expect("avatar should hit the obstacle");
        assert_eq!(hit.obstacle_id, 0);
        assert!(state.is_over());
        assert!(state.events.contains(&SimEvent::Collision(hit)));
        assert!(state.events.iter().any(|e| matches!(e, SimEvent::GameOver { .. })));

        // No further ticks once over
        let ticks = state.time_ticks;
        assert!(tick(&mut state, &input).is_none());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_collision_without_game_over() {
        let config = RunnerConfig {
            spawn_x: SpawnRange::new(0, 0),
            end_on_collision: false,
            ..scenario_config()
        };
        let mut state = new_state(&config, 1);
        let input = InputState::new();

        let mut hits = 0;
        for _ in 0..40 {
            if tick(&mut state, &input).is_some() {
                hits += 1;
            }
        }
        // Hits on ticks 10, 21 and 32: one per approach, and each recycle
        // lands 100 units ahead of a boundary that is already 10 past it
        assert_eq!(hits, 3);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_jump_one_tick_round_trip() {
        let config = RunnerConfig {
            spawn_x: SpawnRange::new(150, 150),
            ..Default::default()
        };
        let mut state = new_state(&config, 5);
        let mut input = InputState::new();

        input.set_pressed(KeyCode::SPACE, true);
        tick(&mut state, &input);
        assert_eq!(state.avatar.state, AvatarState::Jumping);
        input.set_pressed(KeyCode::SPACE, false);

        let max_ticks = state.avatar.tuning.max_airtime_ticks();
        let mut ticks = 1;
        while state.avatar.state == AvatarState::Jumping {
            tick(&mut state, &input);
            ticks += 1;
            assert!(ticks <= max_ticks);
        }
        assert_eq!(ticks, 13);
        assert_eq!(state.avatar.position.y, config.ground_height);
    }

    #[test]
    fn test_ground_segment_events() {
        let config = RunnerConfig {
            forward_speed: 100.0,
            ground_segment_length: 250.0,
            spawn_x: SpawnRange::new(150, 150),
            ..Default::default()
        };
        let mut state = new_state(&config, 2);
        let input = InputState::new();
        for _ in 0..5 {
            tick(&mut state, &input);
        }
        let segments: Vec<i64> = state
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::GroundSegmentAdvanced { segment } => Some(*segment),
                _ => None,
            })
            .collect();
        assert_eq!(segments, vec![1, 2]);
    }

    #[test]
    fn test_determinism() {
        let config = RunnerConfig {
            forward_speed: 40.0,
            end_on_collision: false,
            ..Default::default()
        };
        let mut state1 = new_state(&config, 99999);
        let mut state2 = new_state(&config, 99999);

        let mut input = InputState::new();
        for step in 0..300u32 {
            input.set_pressed(KeyCode::LEFT, step % 40 < 15);
            input.set_pressed(KeyCode::RIGHT, step % 40 > 25);
            input.set_pressed(KeyCode::SPACE, step % 17 == 0);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.events, state2.events);
        assert_eq!(state1.avatar.position, state2.avatar.position);
        let layout = |s: &GameState| s.obstacles.obstacles().iter().map(|o| o.position).collect::<Vec<_>>();
        assert_eq!(layout(&state1), layout(&state2));
    }

    proptest! {
        #[test]
        fn prop_recycled_obstacles_land_ahead_of_avatar(
            seed in any::<u64>(),
            margin in 0.0f32..200.0,
            z_max in -600i32..-1,
            z_span in 0i32..1000,
            speed in 1.0f32..50.0,
        ) {
            let config = RunnerConfig {
                obstacle_count: 10,
                spawn_z: SpawnRange::new(z_max - z_span, z_max),
                recycle_margin: margin,
                forward_speed: speed,
                end_on_collision: false,
                ..Default::default()
            };
            prop_assume!(config.validate().is_ok());

            let mut state = new_state(&config, seed);
            let input = InputState::new();
            for _ in 0..200 {
                tick(&mut state, &input);
                let avatar_z = state.avatar.position.z;
                for event in state.events.drain(..) {
                    if let SimEvent::ObstacleRecycled { position, .. } = event {
                        prop_assert!(
                            position.z < avatar_z,
                            "recycled to z {} with avatar at {}",
                            position.z,
                            avatar_z
                        );
                    }
                }
            }
        }
    }
}
