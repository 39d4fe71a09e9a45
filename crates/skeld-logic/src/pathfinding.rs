//! Shortest paths over the room graph.
//!
//! Unweighted BFS that expands neighbors in listed order, so ties between
//! equally short routes always resolve the same way.

use std::collections::{HashSet, VecDeque};

use crate::rooms::{RoomGraph, RoomId};

/// Rooms from `start` to `goal`, both inclusive.
///
/// Returns `[start]` if the rooms are the same or `goal` is unreachable.
pub fn shortest_path(graph: &RoomGraph, start: RoomId, goal: RoomId) -> Vec<RoomId> {
    if start == goal {
        return vec![start];
    }

    let mut visited = HashSet::new();
    let mut queue: VecDeque<(RoomId, Vec<RoomId>)> = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, vec![start]));

    while let Some((current, path)) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if next == goal {
                let mut result = path;
                result.push(next);
                return result;
            }
            if visited.insert(next) {
                let mut new_path = path.clone();
                new_path.push(next);
                queue.push_back((next, new_path));
            }
        }
    }

    vec![start]
}

/// First room to step into on the way to `goal`, if a move is needed.
pub fn next_step(graph: &RoomGraph, start: RoomId, goal: RoomId) -> Option<RoomId> {
    shortest_path(graph, start, goal).get(1).copied()
}
