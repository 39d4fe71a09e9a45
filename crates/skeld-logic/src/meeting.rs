//! Meetings: an ordered vote tally and at most one ejection.
//!
//! The tally lists alive players in population order followed by a single
//! skip entry. The leader is the entry with the strictly greatest count, so a
//! tie goes to whichever entry comes first and a player tied with skip wins.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::model::{GameState, PlayerId, Role};
use crate::strategy::{vote_intent, VoteIntent};

/// Something a vote can be cast for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    Player(PlayerId),
    Skip,
}

impl From<VoteIntent> for Candidate {
    fn from(vote: VoteIntent) -> Self {
        match vote {
            VoteIntent::Skip => Candidate::Skip,
            VoteIntent::Accuse(id) => Candidate::Player(id),
        }
    }
}

/// Vote counts in tally order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(Candidate, u32)>,
}

impl Tally {
    /// One zeroed entry per player in `alive`, then skip.
    pub fn new(alive: &[PlayerId]) -> Self {
        let entries = alive
            .iter()
            .map(|&id| (Candidate::Player(id), 0))
            .chain(std::iter::once((Candidate::Skip, 0)))
            .collect();
        Self { entries }
    }

    /// Count one vote. Votes for someone not on the tally are dropped.
    pub fn record(&mut self, candidate: Candidate) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(c, _)| *c == candidate) {
            *count += 1;
        }
    }

    pub fn count_for(&self, candidate: Candidate) -> u32 {
        self.entries
            .iter()
            .find(|(c, _)| *c == candidate)
            .map_or(0, |&(_, count)| count)
    }

    /// Strictly greatest count, first entry on ties.
    pub fn leader(&self) -> Option<(Candidate, u32)> {
        let mut best: Option<(Candidate, u32)> = None;
        for &(candidate, count) in &self.entries {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((candidate, count));
            }
        }
        best
    }

    pub fn entries(&self) -> &[(Candidate, u32)] {
        &self.entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetingOutcome {
    /// Too few players alive to vote; nothing changed.
    Skipped,
    Ejected {
        player: PlayerId,
        role: Role,
        votes: u32,
    },
    NoEjection {
        top_votes: u32,
    },
}

/// Run a meeting on `state`.
///
/// With two or fewer players alive the meeting does not happen and pending
/// bodies stay. Otherwise every alive player votes, the leader is ejected if
/// it is a player with at least `min_ejection_votes`, and all pending bodies
/// are cleared.
pub fn hold_meeting(
    state: &mut GameState,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> MeetingOutcome {
    let alive = state.alive_ids();
    if alive.len() <= 2 {
        debug!("round {}: meeting skipped, {} alive", state.round, alive.len());
        return MeetingOutcome::Skipped;
    }

    let mut tally = Tally::new(&alive);
    for &voter in &alive {
        let vote = Candidate::from(vote_intent(voter, &alive, config, rng));
        trace!("round {}: player {} votes {:?}", state.round, voter, vote);
        tally.record(vote);
    }

    let leader = tally.leader();
    let ejected = match leader {
        Some((Candidate::Player(id), votes)) if votes >= config.min_ejection_votes => state
            .players
            .get_mut(id)
            .map(|player| {
                player.alive = false;
                (id, player.name.clone(), player.role, votes)
            }),
        _ => None,
    };

    let outcome = match ejected {
        Some((player, name, role, votes)) => {
            state.log_event(format!("Meeting result: {} ejected ({}).", name, role.label()));
            MeetingOutcome::Ejected {
                player,
                role,
                votes,
            }
        }
        None => {
            state.log_event("Meeting result: no one was ejected.");
            MeetingOutcome::NoEjection {
                top_votes: leader.map_or(0, |(_, votes)| votes),
            }
        }
    };

    state.pending_bodies.clear();
    debug!(
        "round {}: meeting {:?}, {} skipped",
        state.round,
        outcome,
        tally.count_for(Candidate::Skip)
    );
    outcome
}
