//! Pure simulation logic for Skeld.
//!
//! Skeld is a spectator-mode social-deduction simulator: ten agents wander the
//! rooms of a small ship, crewmates complete tasks, impostors eliminate them,
//! and reported bodies trigger a vote that may eject a suspect. The game ends
//! when one side satisfies a win condition.
//!
//! This crate contains the whole engine and nothing else. There is no
//! rendering, no I/O and no global state: every random draw comes from the
//! generator owned by [`engine::Engine`], so a seed fully determines a game.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Per-room task names used to deal task sets |
//! | [`config`] | Probabilities, sizes and their validation |
//! | [`engine`] | Round driver: movement, actions, reports, win check |
//! | [`error`] | Setup and snapshot errors |
//! | [`meeting`] | Ordered vote tally and ejection |
//! | [`model`] | Players, tasks, bodies, event log, `GameState` |
//! | [`pathfinding`] | BFS shortest path and direction hints |
//! | [`rooms`] | Room identifiers and the adjacency graph |
//! | [`setup`] | Deterministic population and task generation |
//! | [`strategy`] | Per-role decision functions returning intents |
//! | [`win`] | Win-condition priority chain |
//!
//! ```
//! use skeld_logic::engine::{Engine, Outcome};
//!
//! let mut engine = Engine::new(Some(42)).unwrap();
//! match engine.run(220) {
//!     Outcome::Won { team, reason, .. } => println!("{team} win ({reason})"),
//!     Outcome::RoundLimit { round } => println!("no winner by round {round}"),
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod meeting;
pub mod model;
pub mod pathfinding;
pub mod rooms;
pub mod setup;
pub mod strategy;
pub mod win;
