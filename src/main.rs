//! Polyarena headless driver
//!
//! Usage: `polyarena [LAYOUT_PATH] [CONFIG_JSON_PATH]`
//!
//! Environment: `POLYARENA_SEED` (default 1), `POLYARENA_TICKS` (default 1000).

use std::process::ExitCode;

use polyarena::ArenaConfig;
use polyarena::error::ArenaError;
use polyarena::policy::{Policy, RandomPolicy, collect_actions};
use polyarena::sim::{Arena, Layout, ray_probe, snapshot, tick};

/// Built-in 17x17 layout used when no layout file is given
const DEFAULT_LAYOUT: &str = "\
.................
.................
..XXX.......XXX..
..X...........X..
..X...........X..
.................
.................
.......XXX.......
.......XXX.......
.......XXX.......
.................
.................
..X...........X..
..X...........X..
..XXX.......XXX..
.................
.................
";

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn read_file(path: &str) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        log::error!("Cannot read {}: {}", path, e);
        ExitCode::FAILURE
    })
}

fn run(config: ArenaConfig, layout_text: &str, seed: u64, ticks: u64) -> Result<(), ArenaError> {
    let layout = Layout::parse(layout_text, config.wall_marker)?;
    let mut arena = Arena::new(config, &layout, seed)?;

    let mut policies: Vec<Box<dyn Policy>> = (0..arena.config.teams)
        .map(|team| Box::new(RandomPolicy::new(seed.wrapping_add(team as u64))) as Box<dyn Policy>)
        .collect();
    let teams: Vec<u8> = arena.characters.iter().map(|c| c.team).collect();

    let mut penalties = vec![0i64; arena.config.teams];
    // Arena::new already spawned the characters
    let mut outcome = snapshot(&arena);

    for _ in 0..ticks {
        let actions = collect_actions(&mut policies, &teams, &outcome);
        outcome = tick(&mut arena, &actions)?;
        for i in outcome.collided() {
            penalties[teams[i] as usize] += outcome.rewards[i] as i64;
        }
    }

    for (team, total) in penalties.iter().enumerate() {
        log::info!("Team {}: cumulative reward {}", team, total);
    }
    if !arena.characters.is_empty() {
        log::debug!("Final probe for character 0: {:?}", ray_probe(&arena, 0));
    }
    log::info!("Finished {} ticks", arena.tick_count());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Polyarena (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let layout_text = match args.first() {
        Some(path) => match read_file(path) {
            Ok(text) => text,
            Err(code) => return code,
        },
        None => DEFAULT_LAYOUT.to_string(),
    };

    let config = match args.get(1) {
        Some(path) => {
            let json = match read_file(path) {
                Ok(json) => json,
                Err(code) => return code,
            };
            match ArenaConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Bad config {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => ArenaConfig::default(),
    };

    let seed = env_or("POLYARENA_SEED", 1u64);
    let ticks = env_or("POLYARENA_TICKS", 1000u64);

    match run(config, &layout_text, seed, ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_tick_input() {
                log::error!("Driver produced an invalid tick: {}", e);
            } else {
                log::error!("Setup failed: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
