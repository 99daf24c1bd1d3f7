//! Headless Duel Runner
//!
//! Plays a full run at a fixed frame rate, always choosing the default
//! attack, and prints a summary.

use std::path::PathBuf;

use clap::Parser;
use desert_duel::battle::{Battle, BattleEvent, GameMode, Session};
use desert_duel::core::config::{BattleConfig, DEFAULT_CONFIG_PATH};
use desert_duel::core::error::Result;
use serde::Serialize;

/// Headless Duel Runner - plays every encounter without a renderer
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Simulate a full run of encounters and report the result")]
struct Args {
    /// Battle config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the full battle log
    #[arg(long)]
    log: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    outcome: GameMode,
    encounters_won: u32,
    frames: u64,
    simulated_seconds: f32,
    player_health: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<Vec<BattleEvent>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "desert_duel=debug"
    } else {
        "desert_duel=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = BattleConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let max_frames = (args.max_seconds * fps as f32) as u64;

    let mut session = Session::new(Battle::from_config(&config)?);
    session.start_game()?;
    session.enter_battle()?;

    let mut frames = 0u64;
    let mut encounters_won = 0u32;

    while frames < max_frames {
        match session.mode() {
            GameMode::Battle => {
                if session.battle().attack_controls_visible() {
                    session.player_attack()?;
                }
                session.update(dt);
                frames += 1;
            }
            GameMode::LevelUp => {
                encounters_won += 1;
                session.acknowledge();
                session.enter_battle()?;
            }
            _ => break,
        }
    }

    let report = RunReport {
        outcome: session.mode(),
        encounters_won,
        frames,
        simulated_seconds: frames as f32 * dt,
        player_health: session.battle().player_health().to_string(),
        log: args.log.then(|| session.battle().log().to_vec()),
    };

    if args.format == "text" {
        println!("Outcome:          {:?}", report.outcome);
        println!("Encounters won:   {}", report.encounters_won);
        println!("Frames:           {}", report.frames);
        println!("Simulated time:   {:.2}s", report.simulated_seconds);
        println!("Player health:    {}", report.player_health);
        if let Some(log) = &report.log {
            for event in log {
                println!("[{:>6}] {}", event.tick, event.description);
            }
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
