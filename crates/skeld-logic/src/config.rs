//! Simulation configuration: population size, task counts and the fixed
//! probabilities behind every agent decision.
//!
//! The defaults are the standard game. Tests override individual
//! probabilities (0.0 or 1.0) to force a behavior deterministically.
//!
//! ```
//! use skeld_logic::config::{validate_config, SimConfig};
//!
//! let mut config = SimConfig::default();
//! config.p_kill = 1.0;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::setup::PLAYER_NAMES;

/// Fewest players for which a meeting can still eject someone.
pub const MIN_POPULATION: usize = 3;

/// Tunable parameters of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of players, taken in order from the fixed name list.
    pub population: usize,
    /// Tasks dealt to every player at setup.
    pub tasks_per_player: usize,
    /// Players secretly assigned the impostor role.
    pub impostor_count: usize,
    /// Rounds an impostor must wait after an elimination.
    pub kill_cooldown: u32,
    /// Chance a crewmate finishes an eligible task this round.
    pub p_task: f64,
    /// Chance an impostor strikes when a victim is in the room.
    pub p_kill: f64,
    /// Chance a body is reported when someone is standing next to it.
    pub p_report: f64,
    /// Chance a voter skips instead of accusing someone.
    pub p_skip: f64,
    /// Votes the leading candidate needs to be ejected.
    pub min_ejection_votes: u32,
    /// Event log entries kept, most recent first.
    pub log_window: usize,
    /// Rooms kept in each player's recent route.
    pub route_window: usize,
    /// Room changes kept in each player's position log.
    pub position_window: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 10,
            tasks_per_player: 6,
            impostor_count: 2,
            kill_cooldown: 3,
            p_task: 0.70,
            p_kill: 0.45,
            p_report: 0.50,
            p_skip: 0.25,
            min_ejection_votes: 2,
            log_window: 120,
            route_window: 16,
            position_window: 160,
        }
    }
}

impl SimConfig {
    /// First validation error, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match validate_config(self).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population {0} is below the minimum of {min}", min = MIN_POPULATION)]
    PopulationTooSmall(usize),

    #[error("population {population} exceeds the {max} available player names")]
    PopulationTooLarge { population: usize, max: usize },

    #[error("{impostors} impostors cannot be seated in a population of {population}")]
    InvalidImpostorCount { impostors: usize, population: usize },

    #[error("players must be dealt at least one task")]
    NoTasks,

    #[error("probability {field} = {value} is outside [0, 1]")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("ejection threshold must be at least one vote")]
    ZeroEjectionThreshold,

    #[error("event log window must hold at least one entry")]
    EmptyLogWindow,

    #[error("route window must hold at least one room")]
    EmptyRouteWindow,

    #[error("position window must hold at least one visit")]
    EmptyPositionWindow,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.population < MIN_POPULATION {
        errors.push(ConfigError::PopulationTooSmall(config.population));
    }
    if config.population > PLAYER_NAMES.len() {
        errors.push(ConfigError::PopulationTooLarge {
            population: config.population,
            max: PLAYER_NAMES.len(),
        });
    }
    if config.impostor_count == 0 || config.impostor_count >= config.population {
        errors.push(ConfigError::InvalidImpostorCount {
            impostors: config.impostor_count,
            population: config.population,
        });
    }
    if config.tasks_per_player == 0 {
        errors.push(ConfigError::NoTasks);
    }

    let probabilities = [
        ("p_task", config.p_task),
        ("p_kill", config.p_kill),
        ("p_report", config.p_report),
        ("p_skip", config.p_skip),
    ];
    for (field, value) in probabilities {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::InvalidProbability { field, value });
        }
    }

    if config.min_ejection_votes == 0 {
        errors.push(ConfigError::ZeroEjectionThreshold);
    }
    if config.log_window == 0 {
        errors.push(ConfigError::EmptyLogWindow);
    }
    if config.route_window == 0 {
        errors.push(ConfigError::EmptyRouteWindow);
    }
    if config.position_window == 0 {
        errors.push(ConfigError::EmptyPositionWindow);
    }

    errors
}
