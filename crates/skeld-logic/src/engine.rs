//! Simulation engine - owns a game and advances it one round per tick.
//!
//! A round runs in a fixed order:
//!
//! 1. the round counter advances
//! 2. every player alive at the start of the round, in population order,
//!    moves to a random neighboring room and then acts for their role
//! 3. the oldest pending body may be reported, which calls a meeting
//! 4. win conditions are checked
//!
//! All randomness comes from one `StdRng` seeded at construction, so two
//! engines built from the same seed and configuration stay identical tick for
//! tick.

use std::collections::VecDeque;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::TaskCatalog;
use crate::config::SimConfig;
use crate::error::{SetupError, SnapshotError};
use crate::meeting::hold_meeting;
use crate::model::{
    Body, EventLog, GameState, Player, PlayerId, Role, Team, TaskProgress, WinReason,
};
use crate::pathfinding::next_step;
use crate::rooms::{RoomGraph, RoomId};
use crate::setup::setup_game;
use crate::strategy::{
    choose_reporter, crew_intent, impostor_intent, CrewIntent, ImpostorIntent,
};
use crate::win;

/// How a call to [`Engine::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won {
        team: Team,
        reason: WinReason,
        round: u32,
    },
    /// No winner yet when the round limit was reached.
    RoundLimit { round: u32 },
}

/// Main simulation engine
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    config: SimConfig,
    graph: RoomGraph,
    catalog: TaskCatalog,
    rng: StdRng,
}

impl Engine {
    /// Standard game. Without a seed one is drawn and recorded in the state.
    pub fn new(seed: Option<u64>) -> Result<Self, SetupError> {
        Self::with_config(seed, SimConfig::default())
    }

    pub fn with_config(seed: Option<u64>, config: SimConfig) -> Result<Self, SetupError> {
        Self::with_world(seed, config, RoomGraph::standard(), TaskCatalog::standard())
    }

    /// Game on a custom map and task catalog.
    pub fn with_world(
        seed: Option<u64>,
        config: SimConfig,
        graph: RoomGraph,
        catalog: TaskCatalog,
    ) -> Result<Self, SetupError> {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let state = setup_game(seed, &config, &graph, &catalog, &mut rng)?;
        Ok(Self {
            state,
            config,
            graph,
            catalog,
            rng,
        })
    }

    /// Resume from an existing state on the standard map.
    ///
    /// The generator restarts from `state.seed`, so the continuation differs
    /// from the game the state was taken from.
    pub fn from_state(state: GameState, config: SimConfig) -> Result<Self, SetupError> {
        Self::from_state_in_world(state, config, RoomGraph::standard(), TaskCatalog::standard())
    }

    /// Resume from an existing state on a custom map and task catalog.
    pub fn from_state_in_world(
        state: GameState,
        config: SimConfig,
        graph: RoomGraph,
        catalog: TaskCatalog,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        graph.validate()?;
        catalog.validate(&graph)?;
        let rng = StdRng::seed_from_u64(state.seed);
        Ok(Self {
            state,
            config,
            graph,
            catalog,
            rng,
        })
    }

    /// Advance one round. Does nothing once the game is concluded.
    pub fn tick(&mut self) {
        if self.state.is_concluded() {
            return;
        }
        self.state.round += 1;

        // Players eliminated earlier in the pass still take their turn.
        for id in self.state.alive_ids() {
            self.move_player(id);
            self.act(id);
        }

        self.resolve_report();
        self.check_win();

        debug!(
            "round {}: alive={} crew={} impostors={} tasks={}/{} bodies={}",
            self.state.round,
            self.state.alive_count(),
            self.state.alive_crew_count(),
            self.state.alive_impostor_count(),
            self.task_progress().done,
            self.task_progress().total,
            self.state.pending_bodies.len()
        );
    }

    /// Tick until someone wins or the round counter reaches `max_rounds`.
    pub fn run(&mut self, max_rounds: u32) -> Outcome {
        while !self.state.is_concluded() && self.state.round < max_rounds {
            self.tick();
        }
        self.outcome()
    }

    /// `Won` once concluded, otherwise `RoundLimit` at the current round.
    pub fn outcome(&self) -> Outcome {
        match (self.state.winner, self.state.win_reason) {
            (Some(team), Some(reason)) => Outcome::Won {
                team,
                reason,
                round: self.state.round,
            },
            _ => Outcome::RoundLimit {
                round: self.state.round,
            },
        }
    }

    fn move_player(&mut self, id: PlayerId) {
        let round = self.state.round;
        let Some(player) = self.state.players.get_mut(id) else {
            return;
        };
        if let Some(&next) = self.graph.neighbors(player.room).choose(&mut self.rng) {
            trace!("round {}: {} moves {} -> {}", round, player.name, player.room, next);
            player.room = next;
            player.record_visit(
                round,
                self.config.route_window,
                self.config.position_window,
            );
        }
    }

    fn act(&mut self, id: PlayerId) {
        let Some(player) = self.state.players.get(id) else {
            return;
        };
        let role = player.role;
        match role {
            Role::Crew => {
                if let CrewIntent::CompleteTask(idx) =
                    crew_intent(player, &self.config, &mut self.rng)
                {
                    self.complete_task(id, idx);
                }
            }
            Role::Impostor => {
                let victims: Vec<PlayerId> = self
                    .state
                    .players_in_room(player.room)
                    .filter(|p| p.is_crew() && p.id != id)
                    .map(|p| p.id)
                    .collect();
                match impostor_intent(player, &victims, &self.config, &mut self.rng) {
                    ImpostorIntent::CoolDown => {
                        if let Some(p) = self.state.players.get_mut(id) {
                            p.kill_cooldown = p.kill_cooldown.saturating_sub(1);
                        }
                    }
                    ImpostorIntent::Hold => {}
                    ImpostorIntent::Eliminate(victim) => self.eliminate(id, victim),
                }
            }
        }
    }

    fn complete_task(&mut self, id: PlayerId, idx: usize) {
        let Some(player) = self.state.players.get_mut(id) else {
            return;
        };
        let Some(task) = player.tasks.get_mut(idx) else {
            return;
        };
        task.done = true;
        let message = format!("{} completed {} in {}.", player.name, task.name, task.room);
        trace!("round {}: {}", self.state.round, message);
        self.state.log_event(message);
    }

    fn eliminate(&mut self, impostor: PlayerId, victim: PlayerId) {
        let killer = match self.state.players.get_mut(impostor) {
            Some(p) => {
                p.kill_cooldown = self.config.kill_cooldown;
                p.name.clone()
            }
            None => return,
        };
        let (target, room) = match self.state.players.get_mut(victim) {
            Some(p) => {
                p.alive = false;
                (p.name.clone(), p.room)
            }
            None => return,
        };

        self.state.pending_bodies.push_back(Body {
            victim,
            room,
            round: self.state.round,
        });
        let message = format!("{} eliminated {} in {}.", killer, target, room);
        trace!("round {}: {}", self.state.round, message);
        self.state.log_event(message);
    }

    /// Only the oldest body is looked at; a meeting clears them all.
    fn resolve_report(&mut self) {
        let Some(body) = self.state.pending_bodies.front().copied() else {
            return;
        };
        let witnesses: Vec<PlayerId> = self
            .state
            .players_in_room(body.room)
            .map(|p| p.id)
            .collect();
        let Some(reporter) = choose_reporter(&witnesses, &self.config, &mut self.rng) else {
            return;
        };

        let message = format!(
            "{} reported {}'s body in {}.",
            self.player_name(reporter),
            self.player_name(body.victim),
            body.room
        );
        self.state.log_event(message);
        hold_meeting(&mut self.state, &self.config, &mut self.rng);
    }

    fn check_win(&mut self) {
        if let Some((team, reason)) = win::evaluate(&self.state) {
            self.state.winner = Some(team);
            self.state.win_reason = Some(reason);
            self.state.log_event(win::announcement(team, reason));
            info!(
                "Game over at round {}: {} win ({})",
                self.state.round, team, reason
            );
        }
    }

    fn player_name(&self, id: PlayerId) -> &str {
        self.state.player(id).map_or("", |p| p.name.as_str())
    }

    // ── Accessors ──

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.state.alive_players()
    }

    pub fn alive_crew_count(&self) -> usize {
        self.state.alive_crew_count()
    }

    pub fn alive_impostor_count(&self) -> usize {
        self.state.alive_impostor_count()
    }

    pub fn task_progress(&self) -> TaskProgress {
        self.state.task_progress()
    }

    pub fn pending_bodies(&self) -> &VecDeque<Body> {
        &self.state.pending_bodies
    }

    pub fn log(&self) -> &EventLog {
        &self.state.log
    }

    pub fn winner(&self) -> Option<Team> {
        self.state.winner
    }

    pub fn win_reason(&self) -> Option<WinReason> {
        self.state.win_reason
    }

    pub fn is_concluded(&self) -> bool {
        self.state.is_concluded()
    }

    pub fn players_in_room(&self, room: RoomId) -> impl Iterator<Item = &Player> + '_ {
        self.state.players_in_room(room)
    }

    pub fn crew_tasks_left(&self) -> usize {
        self.state.crew_tasks_left()
    }

    /// Room `player` occupied at the end of `round`.
    pub fn room_at_round(&self, player: PlayerId, round: u32) -> Option<RoomId> {
        self.state.player(player).map(|p| p.room_at_round(round))
    }

    pub fn next_task_room(&self, player: PlayerId) -> Option<RoomId> {
        self.state.player(player).and_then(Player::next_task_room)
    }

    /// First step toward the player's next task room. `None` if no task is
    /// left or the player is already there.
    pub fn direction_hint(&self, player: PlayerId) -> Option<RoomId> {
        let p = self.state.player(player)?;
        let target = p.next_task_room()?;
        next_step(&self.graph, p.room, target)
    }

    /// Canonical encoding of the current state.
    pub fn fingerprint(&self) -> Result<Vec<u8>, SnapshotError> {
        self.state.fingerprint()
    }
}
