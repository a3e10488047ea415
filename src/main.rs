//! TNT Breakout headless runner
//!
//! Plays an auto-pilot session at the fixed tick rate and prints the final
//! snapshot as JSON.
//!
//! Usage: `tnt-breakout [CONFIG.toml] [SEED]`

use std::process::ExitCode;

use tnt_breakout::GameConfig;
use tnt_breakout::audio::{AudioSink, LogAudio, sounds_for_tick};
use tnt_breakout::consts::TICK_RATE_HZ;
use tnt_breakout::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Ten minutes of simulated play
const MAX_TICKS: u64 = 10 * 60 * TICK_RATE_HZ as u64;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            log::warn!("Ignoring invalid seed ({}), using 0", err);
            0
        }
        None => 0,
    };

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("TNT Breakout starting (seed {})", seed);

    let mut audio = LogAudio::new();
    let input = TickInput {
        auto_play: true,
        ..Default::default()
    };

    while state.time_ticks < MAX_TICKS && state.phase != GamePhase::GameOver {
        tick(&mut state, &input);

        for sound in sounds_for_tick(&state.events) {
            audio.play(sound);
        }
        for event in &state.events {
            if let GameEvent::Detonation { index, destroyed } = event {
                log::info!("TNT {} detonated, {} bricks destroyed", index, destroyed);
            }
        }
    }

    log::info!(
        "Finished after {} ticks: level {}, score {}, {} detonations, {} sounds",
        state.time_ticks,
        state.level,
        state.score,
        state.tnt_count,
        audio.played
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to serialize snapshot: {}", err);
            ExitCode::FAILURE
        }
    }
}
