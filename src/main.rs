//! Lane Runner headless entry point
//!
//! Stands in for the render host: feeds fixed 60 Hz frames into the
//! simulation, plays a simple autopilot on the keyboard, and logs every
//! event the core emits.

use std::path::PathBuf;

use clap::Parser;
use lane_runner::sim::{GroundTracker, KeyCode, SimEvent, Simulation};
use lane_runner::{Result, RunnerConfig};

const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_SECONDS: f64 = 300.0;

/// How far ahead the autopilot looks for obstacles
const LOOKAHEAD: f32 = 60.0;

#[derive(Parser)]
#[command(name = "lane-runner")]
#[command(about = "Run the lane-runner simulation headless with an autopilot")]
struct Args {
    /// Path to a JSON config (defaults are used when omitted)
    config: Option<PathBuf>,

    /// RNG seed for obstacle placement
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Simulated wall-clock seconds to run
    #[arg(long, default_value_t = DEFAULT_SECONDS)]
    seconds: f64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => RunnerConfig::from_json_file(path)?,
        None => RunnerConfig::default(),
    };
    let Args { seed, seconds, .. } = args;

    log::info!("Lane Runner (headless) starting, seed {seed}, {seconds}s");
    let mut sim = Simulation::new(config, seed)?;

    let frames = (seconds / FRAME_DT).ceil() as u64;
    let mut recycled = 0u64;
    for _ in 0..frames {
        autopilot(&mut sim);

        let outcome = sim.on_frame(FRAME_DT);
        for event in sim.drain_events() {
            match event {
                SimEvent::ObstacleRecycled { .. } => recycled += 1,
                SimEvent::Collision(hit) => log::warn!(
                    "Collision with obstacle {} on tick {}",
                    hit.obstacle_id,
                    hit.tick
                ),
                SimEvent::GameOver { tick, distance } => {
                    log::info!("GAME OVER on tick {tick}, distance {distance:.1}")
                }
                SimEvent::GroundSegmentAdvanced { segment } => {
                    log::debug!("Ground segment {segment}")
                }
                SimEvent::ObstacleHit { .. } => {}
            }
        }
        if outcome.game_over {
            break;
        }
    }

    println!(
        "ticks: {}  distance: {:.1}  obstacles recycled: {}  phase: {:?}",
        sim.tick_count(),
        sim.distance(),
        recycled,
        sim.phase()
    );
    Ok(())
}

/// Steer away from the nearest obstacle in the avatar's path, jumping when
/// it is too close to dodge
fn autopilot<G: GroundTracker>(sim: &mut Simulation<G>) {
    let state = sim.state();
    let avatar = &state.avatar;
    let reach = avatar.tuning.half_extents.x * 2.0 + 10.0;

    let threat = state
        .obstacles
        .obstacles()
        .iter()
        .filter(|o| o.active)
        .map(|o| (o, avatar.position.z - o.position.z))
        .filter(|(o, ahead)| {
            *ahead > 0.0 && *ahead < LOOKAHEAD && (o.position.x - avatar.position.x).abs() < reach
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let (left, right, jump) = match threat {
        Some((obstacle, ahead)) => {
            let steer_left = obstacle.position.x >= avatar.position.x;
            let near = ahead < avatar.tuning.forward_speed * 3.0;
            (steer_left, !steer_left, near && avatar.is_grounded())
        }
        None => (false, false, false),
    };

    sim.key_event(KeyCode::LEFT, left);
    sim.key_event(KeyCode::RIGHT, right);
    sim.key_event(KeyCode::SPACE, jump);
}
