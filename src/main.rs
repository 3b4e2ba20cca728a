//! Planet Catcher headless runner
//!
//! Plays one session with the demo autopilot and prints the final snapshot
//! as JSON. Rendering and input hosts embed the library instead.
//!
//! Usage: `planet-catcher [seed] [tuning.json]`

use std::process::ExitCode;

use planet_catcher::autopilot;
use planet_catcher::consts::*;
use planet_catcher::sim::{GameEvent, Session};
use planet_catcher::{Tuning, TuningError};

/// Give up after this much simulated time (seconds)
const MAX_RUN_SECS: f32 = 300.0;
/// Simulated display refresh driving the fixed-step loop
const FRAME_DT: f32 = 1.0 / 144.0;

fn load_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let tuning = Tuning::from_file(path)?;
    log::info!("Loaded tuning from {}", path);
    Ok(tuning)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Planet Catcher (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x00C0_FFEE);
    let tuning = match load_tuning(args.next().as_deref()) {
        Ok(tuning) => tuning,
        Err(err) => {
            log::error!("Invalid tuning: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(tuning, seed);
    let simulated = autopilot::run(&mut session, SIM_DT, FRAME_DT, MAX_RUN_SECS, |event| {
        match event {
            GameEvent::LevelUp { level } => println!("level {level}"),
            GameEvent::HazardHit { entity_id } => println!("hit by meteor {entity_id}"),
            _ => {}
        }
    });

    let snapshot = session.snapshot();
    println!(
        "final: score={} level={} after {:.1}s",
        snapshot.score, snapshot.level, simulated
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Could not serialize snapshot: {}", err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
