//! Arrowfall headless driver
//!
//! Runs the simulation at the fixed timestep with a scripted auto-firing
//! input and logs a run summary. This is the reference external driver:
//! real frontends do the same thing with a real clock, real input, and a
//! renderer behind the `Surface` trait.

use std::path::Path;

use arrowfall::Viewport;
use arrowfall::consts::SIM_DT;
use arrowfall::sim::{GameState, TickInput, tick};
use arrowfall::tuning::Tuning;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    let seed: u64 = env_or("ARROWFALL_SEED", rand::random());
    let seconds: f32 = env_or("ARROWFALL_SECS", 60.0);
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!("Arrowfall starting: seed {seed}, {seconds}s run");
    let mut state = GameState::new(seed, tuning, Viewport::default());

    // Scripted input: hold fire and let auto-aim pick targets; restart once
    // if the run ends early.
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    let mut restarted = false;

    let ticks = (seconds / SIM_DT) as u64;
    let report_every = (10.0 / SIM_DT) as u64;
    for t in 0..ticks {
        tick(&mut state, &input, SIM_DT);
        input.restart = false;

        if state.is_game_over() && !restarted {
            log::info!(
                "Run ended at {:.1}s: score {} kills {} leaked {} - restarting",
                t as f32 * SIM_DT,
                state.score,
                state.kills,
                state.passed
            );
            input.restart = true;
            restarted = true;
        }

        if t > 0 && t % report_every == 0 {
            log::debug!(
                "t={:.0}s score {} kills {} hp {}/{}",
                t as f32 * SIM_DT,
                state.score,
                state.kills,
                state.player.health,
                state.player.max_health
            );
        }
    }

    log::info!(
        "Run complete: score {} kills {} leaked {} hp {}/{} {}",
        state.score,
        state.kills,
        state.passed,
        state.player.health,
        state.player.max_health,
        if state.is_game_over() { "(game over)" } else { "" }
    );
}
