//! Per-role decision functions.
//!
//! Each function inspects read-only state, draws from the supplied generator
//! and returns an intent. The engine applies intents; nothing here mutates a
//! player. A draw is only made when the decision is actually open (an
//! eligible task, victim or reporter exists).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SimConfig;
use crate::model::{Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewIntent {
    /// Nothing to do or chose not to.
    Idle,
    /// Finish the task at this index of the player's task list.
    CompleteTask(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpostorIntent {
    /// Still cooling down; the cooldown ticks by one.
    CoolDown,
    /// Ready but no victim or chose to wait.
    Hold,
    Eliminate(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteIntent {
    Skip,
    Accuse(PlayerId),
}

/// Bernoulli draw against a configured probability.
fn roll(rng: &mut impl Rng, p: f64) -> bool {
    rng.gen::<f64>() < p
}

pub fn crew_intent(player: &Player, config: &SimConfig, rng: &mut impl Rng) -> CrewIntent {
    let open = player.open_tasks_here();
    if open.is_empty() || !roll(rng, config.p_task) {
        return CrewIntent::Idle;
    }
    match open.choose(rng) {
        Some(&idx) => CrewIntent::CompleteTask(idx),
        None => CrewIntent::Idle,
    }
}

/// `victims` are the alive crew sharing the impostor's room.
pub fn impostor_intent(
    player: &Player,
    victims: &[PlayerId],
    config: &SimConfig,
    rng: &mut impl Rng,
) -> ImpostorIntent {
    if player.kill_cooldown > 0 {
        return ImpostorIntent::CoolDown;
    }
    if victims.is_empty() || !roll(rng, config.p_kill) {
        return ImpostorIntent::Hold;
    }
    match victims.choose(rng) {
        Some(&victim) => ImpostorIntent::Eliminate(victim),
        None => ImpostorIntent::Hold,
    }
}

/// Pick who (if anyone) reports the body. `witnesses` are the alive players
/// in the body's room.
pub fn choose_reporter(
    witnesses: &[PlayerId],
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<PlayerId> {
    if witnesses.is_empty() || !roll(rng, config.p_report) {
        return None;
    }
    witnesses.choose(rng).copied()
}

/// `alive` lists every alive player, voter included.
pub fn vote_intent(
    voter: PlayerId,
    alive: &[PlayerId],
    config: &SimConfig,
    rng: &mut impl Rng,
) -> VoteIntent {
    if roll(rng, config.p_skip) {
        return VoteIntent::Skip;
    }
    let candidates: Vec<PlayerId> = alive.iter().copied().filter(|&id| id != voter).collect();
    match candidates.choose(rng) {
        Some(&target) => VoteIntent::Accuse(target),
        None => VoteIntent::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Task};
    use crate::rooms::RoomId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

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
                Task::new(RoomId::Admin, "Upload Data"),
                Task::new(RoomId::Reactor, "Start Reactor"),
            ],
            recent_route: VecDeque::new(),
            position_log: VecDeque::new(),
        }
    }

    fn always() -> SimConfig {
        SimConfig {
            p_task: 1.0,
            p_kill: 1.0,
            p_report: 1.0,
            p_skip: 0.0,
            ..Default::default()
        }
    }

    fn never() -> SimConfig {
        SimConfig {
            p_task: 0.0,
            p_kill: 0.0,
            p_report: 0.0,
            p_skip: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn crew_completes_a_task_in_the_room() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = player(Role::Crew, RoomId::Admin);
        match crew_intent(&p, &always(), &mut rng) {
            CrewIntent::CompleteTask(idx) => assert!(idx == 0 || idx == 1),
            other => panic!("expected a task, got {other:?}"),
        }
    }

    #[test]
    fn crew_idle_without_local_tasks() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = player(Role::Crew, RoomId::Storage);
        assert_eq!(crew_intent(&p, &always(), &mut rng), CrewIntent::Idle);
    }

    #[test]
    fn crew_idle_when_roll_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = player(Role::Crew, RoomId::Admin);
        assert_eq!(crew_intent(&p, &never(), &mut rng), CrewIntent::Idle);
    }

    #[test]
    fn no_draw_without_eligible_task() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut fresh = StdRng::seed_from_u64(9);
        let p = player(Role::Crew, RoomId::Storage);
        crew_intent(&p, &SimConfig::default(), &mut rng);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn impostor_cools_down_before_anything_else() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut p = player(Role::Impostor, RoomId::Admin);
        p.kill_cooldown = 2;
        assert_eq!(
            impostor_intent(&p, &[3, 4], &always(), &mut rng),
            ImpostorIntent::CoolDown
        );
    }

    #[test]
    fn impostor_eliminates_a_listed_victim() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = player(Role::Impostor, RoomId::Admin);
        match impostor_intent(&p, &[3, 4], &always(), &mut rng) {
            ImpostorIntent::Eliminate(v) => assert!(v == 3 || v == 4),
            other => panic!("expected an elimination, got {other:?}"),
        }
    }

    #[test]
    fn impostor_holds_without_victims() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = player(Role::Impostor, RoomId::Admin);
        assert_eq!(
            impostor_intent(&p, &[], &always(), &mut rng),
            ImpostorIntent::Hold
        );
        assert_eq!(
            impostor_intent(&p, &[5], &never(), &mut rng),
            ImpostorIntent::Hold
        );
    }

    #[test]
    fn reporter_is_a_witness() {
        let mut rng = StdRng::seed_from_u64(3);
        let reporter = choose_reporter(&[1, 2, 3], &always(), &mut rng).unwrap();
        assert!([1, 2, 3].contains(&reporter));
        assert_eq!(choose_reporter(&[], &always(), &mut rng), None);
        assert_eq!(choose_reporter(&[1], &never(), &mut rng), None);
    }

    #[test]
    fn voter_never_accuses_self() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            match vote_intent(1, &[0, 1, 2], &always(), &mut rng) {
                VoteIntent::Accuse(target) => assert_ne!(target, 1),
                VoteIntent::Skip => panic!("p_skip = 0 must not skip"),
            }
        }
    }

    #[test]
    fn lone_voter_skips() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(vote_intent(0, &[0], &always(), &mut rng), VoteIntent::Skip);
        assert_eq!(vote_intent(0, &[0, 1], &never(), &mut rng), VoteIntent::Skip);
    }
}
