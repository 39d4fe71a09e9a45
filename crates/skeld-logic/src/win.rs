//! Win conditions, checked in a fixed priority order.

use crate::model::{GameState, Team, WinReason};

/// The first satisfied condition, if any:
///
/// 1. no impostor alive: crew win
/// 2. alive impostors at least alive crew: impostors win
/// 3. every crew-owned task done: crew win
pub fn evaluate(state: &GameState) -> Option<(Team, WinReason)> {
    let impostors = state.alive_impostor_count();
    let crew = state.alive_crew_count();

    if impostors == 0 {
        Some((Team::Crew, WinReason::AllImpostorsRemoved))
    } else if impostors >= crew {
        Some((Team::Impostors, WinReason::ParityReached))
    } else if state.task_progress().is_complete() {
        Some((Team::Crew, WinReason::AllTasksCompleted))
    } else {
        None
    }
}

/// Event log line announcing the result.
pub fn announcement(team: Team, reason: WinReason) -> String {
    format!("{team} win ({reason}).")
}
