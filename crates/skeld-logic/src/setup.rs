//! Game setup: deterministic population and task generation.
//!
//! Draw order is fixed: for each player in name order, the starting room,
//! then each task's room and name; impostors are sampled last. Changing this
//! order changes every game for a given seed.

use std::collections::VecDeque;

use log::info;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::catalog::TaskCatalog;
use crate::config::SimConfig;
use crate::error::SetupError;
use crate::model::{EventLog, GameState, Player, Role, Task};
use crate::rooms::{RoomGraph, RoomId};

/// Display names, in seating order. The population takes a prefix.
pub const PLAYER_NAMES: [&str; 10] = [
    "Red", "Blue", "Green", "Yellow", "Purple", "Orange", "Cyan", "Pink", "Lime", "Brown",
];

/// Hex colors matching `PLAYER_NAMES`.
pub const PLAYER_COLORS: [&str; 10] = [
    "#c63c3c", "#3b8eff", "#33cc66", "#ffd43b", "#7d54ff", "#f2933f", "#5df2ff", "#ff8dd8",
    "#9be84a", "#8a5a2b",
];

/// Build the initial state of a game.
///
/// Everything is validated before the first draw, so a failed setup leaves
/// `rng` untouched.
pub fn setup_game(
    seed: u64,
    config: &SimConfig,
    graph: &RoomGraph,
    catalog: &TaskCatalog,
    rng: &mut impl Rng,
) -> Result<GameState, SetupError> {
    config.validate()?;
    graph.validate()?;
    catalog.validate(graph)?;

    let rooms: Vec<RoomId> = graph.rooms().collect();

    let mut players = Vec::with_capacity(config.population);
    for (id, (name, color)) in PLAYER_NAMES
        .iter()
        .zip(PLAYER_COLORS.iter())
        .take(config.population)
        .enumerate()
    {
        let room = pick_room(&rooms, rng)?;
        let tasks = generate_tasks(config.tasks_per_player, &rooms, catalog, rng)?;
        let mut player = Player {
            id,
            name: (*name).to_string(),
            color: (*color).to_string(),
            role: Role::Crew,
            alive: true,
            room,
            kill_cooldown: 0,
            emergency_left: 1,
            tasks,
            recent_route: VecDeque::new(),
            position_log: VecDeque::new(),
        };
        player.record_visit(1, config.route_window, config.position_window);
        players.push(player);
    }

    for idx in index::sample(rng, players.len(), config.impostor_count).into_iter() {
        if let Some(player) = players.get_mut(idx) {
            player.role = Role::Impostor;
        }
    }

    let mut log = EventLog::new(config.log_window);
    log.push(1, "Game started.");

    info!(
        "Game set up: seed={} players={} impostors={} tasks/player={}",
        seed,
        players.len(),
        config.impostor_count,
        config.tasks_per_player
    );

    Ok(GameState {
        seed,
        players,
        round: 1,
        pending_bodies: VecDeque::new(),
        log,
        winner: None,
        win_reason: None,
    })
}

/// Deal `count` tasks: a uniformly random room, then a uniformly random task
/// name from that room's catalog. Duplicates are allowed.
pub fn generate_tasks(
    count: usize,
    rooms: &[RoomId],
    catalog: &TaskCatalog,
    rng: &mut impl Rng,
) -> Result<Vec<Task>, SetupError> {
    let mut tasks = Vec::with_capacity(count);
    for _ in 0..count {
        let room = pick_room(rooms, rng)?;
        let name = catalog
            .tasks_for(room)
            .choose(rng)
            .ok_or(SetupError::EmptyTaskCatalog(room))?;
        tasks.push(Task::new(room, *name));
    }
    Ok(tasks)
}

fn pick_room(rooms: &[RoomId], rng: &mut impl Rng) -> Result<RoomId, SetupError> {
    rooms.choose(rng).copied().ok_or(SetupError::NoRooms)
}
