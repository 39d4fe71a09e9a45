//! Skeld Headless Spectator
//!
//! Runs one game in-process and prints a line per round. No rendering, no
//! input: the engine decides everything from the seed.
//!
//! Usage:
//!   cargo run -p skeld-simtest
//!   cargo run -p skeld-simtest -- --seed 42 --show-log
//!   cargo run -p skeld-simtest -- --seed 42 --watch electrical
//!   cargo run -p skeld-simtest -- --config data/sim_config.json --json

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use skeld_logic::config::SimConfig;
use skeld_logic::engine::{Engine, Outcome};
use skeld_logic::model::{Role, TaskProgress};
use skeld_logic::rooms::RoomId;

/// Entries printed by `--show-log`.
const SHOWN_LOG_ENTRIES: usize = 80;

#[derive(Parser)]
#[command(name = "skeld-simtest")]
#[command(about = "Run a Skeld game headlessly and watch it play out", version)]
struct Cli {
    /// Seed for the game; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds if nobody has won
    #[arg(long, default_value_t = 200)]
    rounds: u32,

    /// Only print the final result
    #[arg(short, long)]
    quiet: bool,

    /// Print the most recent event log entries, oldest first
    #[arg(long)]
    show_log: bool,

    /// JSON file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also list who is standing in this room each round (e.g. `lower_engine`)
    #[arg(long, value_parser = parse_room)]
    watch: Option<RoomId>,

    /// Milliseconds to wait between rounds
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Print a JSON summary of the final state
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

// ── JSON summary ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PlayerSummary<'a> {
    name: &'a str,
    color: &'a str,
    role: Role,
    alive: bool,
    room: RoomId,
    tasks_done: usize,
    tasks_total: usize,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    round: u32,
    outcome: Outcome,
    alive_crew: usize,
    alive_impostors: usize,
    tasks: TaskProgress,
    pending_bodies: usize,
    players: Vec<PlayerSummary<'a>>,
}

impl<'a> Summary<'a> {
    fn from_engine(engine: &'a Engine) -> Self {
        let state = engine.state();
        Self {
            seed: engine.seed(),
            round: engine.round(),
            outcome: engine.outcome(),
            alive_crew: engine.alive_crew_count(),
            alive_impostors: engine.alive_impostor_count(),
            tasks: engine.task_progress(),
            pending_bodies: engine.pending_bodies().len(),
            players: state
                .players
                .iter()
                .map(|p| PlayerSummary {
                    name: &p.name,
                    color: &p.color,
                    role: p.role,
                    alive: p.alive,
                    room: p.room,
                    tasks_done: p.tasks_done(),
                    tasks_total: p.tasks.len(),
                })
                .collect(),
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays parseable with --json.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    debug!("config: {:?}", config);

    let mut engine = Engine::with_config(cli.seed, config).context("failed to set up game")?;
    info!("seed {}", engine.seed());

    let print_rounds = !cli.quiet && !cli.json;
    if print_rounds {
        println!("=== Skeld (seed {}) ===\n", engine.seed());
        print_roster(&engine);
        println!();
    }

    while !engine.is_concluded() && engine.round() < cli.rounds {
        engine.tick();
        if print_rounds {
            println!("{}", round_line(&engine));
            if let Some(room) = cli.watch {
                println!("{}", watch_line(&engine, room));
            }
        }
        if cli.tick_ms > 0 {
            thread::sleep(Duration::from_millis(cli.tick_ms));
        }
    }

    if cli.show_log && !cli.json {
        println!(
            "\n--- Event log (last {} of {} kept) ---",
            SHOWN_LOG_ENTRIES.min(engine.log().len()),
            engine.log().capacity()
        );
        for entry in engine.log().recent_chronological(SHOWN_LOG_ENTRIES) {
            println!("{entry}");
        }
    }

    if cli.json {
        let summary = Summary::from_engine(&engine);
        let json =
            serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
    } else {
        println!("\n=== RESULT: {} ===", outcome_line(engine.outcome()));
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

fn print_roster(engine: &Engine) {
    println!("--- Roster ---");
    for p in &engine.state().players {
        println!(
            "  {:<7} {:<9} starts in {:<15} {} tasks",
            p.name,
            p.role.label(),
            p.room.name(),
            p.tasks.len()
        );
    }
}

/// `R007 | alive: 9 | crew/impostor: 7/2 | tasks: 12/48 (25%)`
fn round_line(engine: &Engine) -> String {
    let progress = engine.task_progress();
    format!(
        "R{:03} | alive: {} | crew/impostor: {}/{} | tasks: {}/{} ({:.0}%)",
        engine.round(),
        engine.state().alive_count(),
        engine.alive_crew_count(),
        engine.alive_impostor_count(),
        progress.done,
        progress.total,
        progress.fraction() * 100.0
    )
}

/// `      Electrical: Red, Lime`
fn watch_line(engine: &Engine, room: RoomId) -> String {
    let names: Vec<&str> = engine
        .players_in_room(room)
        .map(|p| p.name.as_str())
        .collect();
    let names = if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    };
    format!("      {}: {}", room.name(), names)
}

fn parse_room(key: &str) -> Result<RoomId, String> {
    RoomId::from_key(key).ok_or_else(|| {
        let keys: Vec<&str> = RoomId::ALL.iter().map(|room| room.key()).collect();
        format!("unknown room '{key}', expected one of: {}", keys.join(", "))
    })
}

fn outcome_line(outcome: Outcome) -> String {
    match outcome {
        Outcome::Won {
            team,
            reason,
            round,
        } => format!("{team} win ({reason}) at round {round}"),
        Outcome::RoundLimit { round } => format!("no winner after {round} rounds"),
    }
}
