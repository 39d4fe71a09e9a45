//! Entity model: players, tasks, bodies, the event log and `GameState`.
//!
//! These are plain data records. The engine is the only writer; drivers read
//! them between ticks or take an owned snapshot.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::rooms::RoomId;

/// Index of a player in `GameState::players`. Stable for the whole game.
pub type PlayerId = usize;

/// Secret role, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Crew,
    Impostor,
}

impl Role {
    /// Label revealed on ejection.
    pub fn label(self) -> &'static str {
        match self {
            Role::Crew => "Crewmate",
            Role::Impostor => "Impostor",
        }
    }
}

/// Winning side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Crew,
    Impostors,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Team::Crew => "Crewmates",
            Team::Impostors => "Impostors",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    AllImpostorsRemoved,
    ParityReached,
    AllTasksCompleted,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WinReason::AllImpostorsRemoved => "all impostors removed",
            WinReason::ParityReached => "parity reached",
            WinReason::AllTasksCompleted => "all tasks completed",
        })
    }
}

/// A room-bound unit of work owned by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub room: RoomId,
    pub name: String,
    pub done: bool,
}

impl Task {
    pub fn new(room: RoomId, name: impl Into<String>) -> Self {
        Self {
            room,
            name: name.into(),
            done: false,
        }
    }
}

/// A room change, recorded in the round it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub round: u32,
    pub room: RoomId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Hex color for drivers that draw players. Not used by the engine.
    pub color: String,
    pub role: Role,
    pub alive: bool,
    pub room: RoomId,
    pub kill_cooldown: u32,
    /// Emergency meetings left. Reserved; no meeting path consumes it yet.
    pub emergency_left: u32,
    pub tasks: Vec<Task>,
    /// Trailing rooms visited, oldest first.
    pub recent_route: VecDeque<RoomId>,
    /// Room changes with their round, oldest first. Bounded by the
    /// configured position window.
    pub position_log: VecDeque<Visit>,
}

impl Player {
    pub fn is_impostor(&self) -> bool {
        self.role == Role::Impostor
    }

    pub fn is_crew(&self) -> bool {
        self.role == Role::Crew
    }

    /// Indices of this player's unfinished tasks in their current room.
    pub fn open_tasks_here(&self) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.done && t.room == self.room)
            .map(|(i, _)| i)
            .collect()
    }

    /// Room of the first unfinished task, in dealt order.
    pub fn next_task_room(&self) -> Option<RoomId> {
        self.tasks.iter().find(|t| !t.done).map(|t| t.room)
    }

    pub fn tasks_done(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Record arrival in the current room, trimming both histories to
    /// their windows.
    pub fn record_visit(&mut self, round: u32, route_window: usize, position_window: usize) {
        self.recent_route.push_back(self.room);
        while self.recent_route.len() > route_window {
            self.recent_route.pop_front();
        }
        if self.position_log.back().map(|v| v.room) != Some(self.room) {
            self.position_log.push_back(Visit {
                round,
                room: self.room,
            });
        }
        while self.position_log.len() > position_window {
            self.position_log.pop_front();
        }
    }

    /// Room this player occupied at the end of `round`.
    ///
    /// Falls back to the current room when nothing was recorded, and to the
    /// oldest retained room for rounds before the log starts.
    pub fn room_at_round(&self, round: u32) -> RoomId {
        let mut found = match self.position_log.front() {
            Some(first) => first.room,
            None => return self.room,
        };
        for visit in &self.position_log {
            if visit.round > round {
                break;
            }
            found = visit.room;
        }
        found
    }
}

/// An eliminated player waiting to be discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub victim: PlayerId,
    pub room: RoomId,
    pub round: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[R{:03}] {}", self.round, self.message)
    }
}

/// Bounded event log, most recent entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Add an entry at the front, dropping the oldest past capacity.
    pub fn push(&mut self, round: u32, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            round,
            message: message.into(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// The `n` most recent entries in the order they happened.
    pub fn recent_chronological(&self, n: usize) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().take(n).rev()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Completed over total, counting crew-owned tasks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub done: usize,
    pub total: usize,
}

impl TaskProgress {
    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f32 / self.total as f32
        }
    }
}

/// Everything the engine knows about a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the game was generated from.
    pub seed: u64,
    pub players: Vec<Player>,
    pub round: u32,
    /// Unreported bodies, oldest first. Only the head is ever examined.
    pub pending_bodies: VecDeque<Body>,
    pub log: EventLog,
    pub winner: Option<Team>,
    pub win_reason: Option<WinReason>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(|p| p.alive)
    }

    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.alive_players().map(|p| p.id).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    pub fn alive_crew_count(&self) -> usize {
        self.alive_players().filter(|p| p.is_crew()).count()
    }

    pub fn alive_impostor_count(&self) -> usize {
        self.alive_players().filter(|p| p.is_impostor()).count()
    }

    /// Alive players currently standing in `room`.
    pub fn players_in_room(&self, room: RoomId) -> impl Iterator<Item = &Player> + '_ {
        self.alive_players().filter(move |p| p.room == room)
    }

    /// Progress over every crew-owned task, dead crew included.
    pub fn task_progress(&self) -> TaskProgress {
        let crew_tasks = self
            .players
            .iter()
            .filter(|p| p.is_crew())
            .flat_map(|p| p.tasks.iter());
        let (done, total) = crew_tasks.fold((0, 0), |(done, total), t| {
            (done + usize::from(t.done), total + 1)
        });
        TaskProgress { done, total }
    }

    /// Unfinished tasks held by crew who are still alive.
    pub fn crew_tasks_left(&self) -> usize {
        self.alive_players()
            .filter(|p| p.is_crew())
            .map(|p| p.tasks.len() - p.tasks_done())
            .sum()
    }

    pub fn is_concluded(&self) -> bool {
        self.winner.is_some()
    }

    /// Append an entry to the event log, tagged with the current round.
    pub fn log_event(&mut self, message: impl Into<String>) {
        self.log.push(self.round, message);
    }

    /// Canonical byte encoding of the whole state.
    pub fn fingerprint(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(role: Role, room: RoomId) -> Player {
        Player {
            id: 0,
            name: "Red".into(),
            color: "#c63c3c".into(),
            role,
            alive: true,
            room,
            kill_cooldown: 0,
            emergency_left: 1,
            tasks: vec![
                Task::new(RoomId::Admin, "Swipe Card"),
                Task::new(RoomId::Reactor, "Start Reactor"),
                Task::new(RoomId::Admin, "Upload Data"),
            ],
            recent_route: VecDeque::new(),
            position_log: VecDeque::new(),
        }
    }

    #[test]
    fn open_tasks_here_filters_room_and_done() {
        let mut p = player(Role::Crew, RoomId::Admin);
        assert_eq!(p.open_tasks_here(), vec![0, 2]);
        p.tasks[0].done = true;
        assert_eq!(p.open_tasks_here(), vec![2]);
        p.room = RoomId::Storage;
        assert!(p.open_tasks_here().is_empty());
    }

    #[test]
    fn next_task_room_skips_done_tasks() {
        let mut p = player(Role::Crew, RoomId::Admin);
        assert_eq!(p.next_task_room(), Some(RoomId::Admin));
        p.tasks[0].done = true;
        assert_eq!(p.next_task_room(), Some(RoomId::Reactor));
        for t in &mut p.tasks {
            t.done = true;
        }
        assert_eq!(p.next_task_room(), None);
        assert_eq!(p.tasks_done(), 3);
    }

    #[test]
    fn route_is_bounded() {
        let mut p = player(Role::Crew, RoomId::Admin);
        for (round, room) in [RoomId::Admin, RoomId::Storage, RoomId::Shields, RoomId::O2]
            .into_iter()
            .enumerate()
        {
            p.room = room;
            p.record_visit(round as u32 + 1, 2, 16);
        }
        assert_eq!(
            p.recent_route,
            VecDeque::from([RoomId::Shields, RoomId::O2])
        );
        assert_eq!(p.position_log.len(), 4);
    }

    #[test]
    fn position_log_ignores_repeat_rooms() {
        let mut p = player(Role::Crew, RoomId::Admin);
        p.record_visit(1, 16, 160);
        p.record_visit(2, 16, 160);
        assert_eq!(
            p.position_log,
            VecDeque::from([Visit {
                round: 1,
                room: RoomId::Admin
            }])
        );
    }

    #[test]
    fn room_at_round_uses_last_visit_not_after() {
        let mut p = player(Role::Crew, RoomId::Admin);
        p.record_visit(1, 16, 160);
        p.room = RoomId::Storage;
        p.record_visit(3, 16, 160);
        p.room = RoomId::Electrical;
        p.record_visit(5, 16, 160);

        assert_eq!(p.room_at_round(0), RoomId::Admin);
        assert_eq!(p.room_at_round(2), RoomId::Admin);
        assert_eq!(p.room_at_round(3), RoomId::Storage);
        assert_eq!(p.room_at_round(4), RoomId::Storage);
        assert_eq!(p.room_at_round(9), RoomId::Electrical);
    }

    #[test]
    fn room_at_round_without_log_is_current_room() {
        let p = player(Role::Impostor, RoomId::Reactor);
        assert_eq!(p.room_at_round(7), RoomId::Reactor);
    }

    #[test]
    fn position_log_is_bounded() {
        let mut p = player(Role::Crew, RoomId::Admin);
        let rooms = [RoomId::Admin, RoomId::Storage];
        for round in 1..=50u32 {
            p.room = rooms[round as usize % 2];
            p.record_visit(round, 16, 8);
        }
        assert_eq!(p.position_log.len(), 8);
        assert_eq!(p.position_log.front().map(|v| v.round), Some(43));
        assert_eq!(p.room_at_round(50), RoomId::Admin);
        assert_eq!(p.room_at_round(49), RoomId::Storage);
        // Rounds older than the window answer with the oldest retained room.
        assert_eq!(p.room_at_round(10), RoomId::Storage);
    }

    #[test]
    fn event_log_is_most_recent_first_and_bounded() {
        let mut log = EventLog::new(3);
        for i in 1..=5 {
            log.push(i, format!("event {i}"));
        }
        assert_eq!(log.len(), 3);
        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["event 5", "event 4", "event 3"]);
        let chronological: Vec<_> = log
            .recent_chronological(2)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(chronological, vec!["event 4", "event 5"]);
    }

    #[test]
    fn log_entry_display_pads_round() {
        let entry = LogEntry {
            round: 7,
            message: "Red completed Swipe Card in Admin.".into(),
        };
        assert_eq!(entry.to_string(), "[R007] Red completed Swipe Card in Admin.");
    }

    #[test]
    fn task_progress_fraction() {
        assert_eq!(TaskProgress { done: 0, total: 0 }.fraction(), 1.0);
        assert_eq!(TaskProgress { done: 3, total: 12 }.fraction(), 0.25);
        assert!(TaskProgress { done: 12, total: 12 }.is_complete());
    }

    #[test]
    fn role_labels_and_team_names() {
        assert_eq!(Role::Impostor.label(), "Impostor");
        assert_eq!(Role::Crew.label(), "Crewmate");
        assert_eq!(Team::Crew.to_string(), "Crewmates");
        assert_eq!(WinReason::ParityReached.to_string(), "parity reached");
    }
}
