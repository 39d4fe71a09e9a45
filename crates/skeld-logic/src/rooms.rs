//! Room identifiers and the static adjacency graph of the ship.
//!
//! `RoomGraph` holds an ordered adjacency list. Neighbor order is part of the
//! deterministic contract: movement picks a neighbor by index, so the same
//! seed walks the same route only if the lists never reorder.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A room on the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomId {
    Cafeteria,
    Weapons,
    O2,
    Navigation,
    Shields,
    Communications,
    Storage,
    Admin,
    Electrical,
    LowerEngine,
    Reactor,
    Security,
    Medbay,
    UpperEngine,
}

impl RoomId {
    /// Every room, in map order.
    pub const ALL: [RoomId; 14] = [
        RoomId::Cafeteria,
        RoomId::Weapons,
        RoomId::O2,
        RoomId::Navigation,
        RoomId::Shields,
        RoomId::Communications,
        RoomId::Storage,
        RoomId::Admin,
        RoomId::Electrical,
        RoomId::LowerEngine,
        RoomId::Reactor,
        RoomId::Security,
        RoomId::Medbay,
        RoomId::UpperEngine,
    ];

    /// Stable snake_case key, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            RoomId::Cafeteria => "cafeteria",
            RoomId::Weapons => "weapons",
            RoomId::O2 => "o2",
            RoomId::Navigation => "navigation",
            RoomId::Shields => "shields",
            RoomId::Communications => "communications",
            RoomId::Storage => "storage",
            RoomId::Admin => "admin",
            RoomId::Electrical => "electrical",
            RoomId::LowerEngine => "lower_engine",
            RoomId::Reactor => "reactor",
            RoomId::Security => "security",
            RoomId::Medbay => "medbay",
            RoomId::UpperEngine => "upper_engine",
        }
    }

    /// Human-readable name used in the event log.
    pub fn name(self) -> &'static str {
        match self {
            RoomId::Cafeteria => "Cafeteria",
            RoomId::Weapons => "Weapons",
            RoomId::O2 => "O2",
            RoomId::Navigation => "Navigation",
            RoomId::Shields => "Shields",
            RoomId::Communications => "Communications",
            RoomId::Storage => "Storage",
            RoomId::Admin => "Admin",
            RoomId::Electrical => "Electrical",
            RoomId::LowerEngine => "Lower Engine",
            RoomId::Reactor => "Reactor",
            RoomId::Security => "Security",
            RoomId::Medbay => "MedBay",
            RoomId::UpperEngine => "Upper Engine",
        }
    }

    pub fn from_key(key: &str) -> Option<RoomId> {
        RoomId::ALL.into_iter().find(|room| room.key() == key)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Corridors of the standard map, listed per room.
static STANDARD_ADJACENCY: &[(RoomId, &[RoomId])] = &[
    (
        RoomId::Cafeteria,
        &[RoomId::UpperEngine, RoomId::Medbay, RoomId::Weapons, RoomId::Admin],
    ),
    (
        RoomId::Weapons,
        &[RoomId::Cafeteria, RoomId::O2, RoomId::Navigation],
    ),
    (RoomId::O2, &[RoomId::Weapons, RoomId::Navigation, RoomId::Shields]),
    (
        RoomId::Navigation,
        &[RoomId::Weapons, RoomId::O2, RoomId::Shields],
    ),
    (
        RoomId::Shields,
        &[
            RoomId::O2,
            RoomId::Navigation,
            RoomId::Communications,
            RoomId::Storage,
        ],
    ),
    (RoomId::Communications, &[RoomId::Shields, RoomId::Storage]),
    (
        RoomId::Storage,
        &[
            RoomId::Admin,
            RoomId::Electrical,
            RoomId::Communications,
            RoomId::Shields,
            RoomId::LowerEngine,
        ],
    ),
    (RoomId::Admin, &[RoomId::Cafeteria, RoomId::Storage]),
    (
        RoomId::Electrical,
        &[RoomId::Storage, RoomId::LowerEngine, RoomId::Security],
    ),
    (
        RoomId::LowerEngine,
        &[RoomId::Electrical, RoomId::Reactor, RoomId::Storage],
    ),
    (
        RoomId::Reactor,
        &[RoomId::Security, RoomId::LowerEngine, RoomId::UpperEngine],
    ),
    (
        RoomId::Security,
        &[RoomId::Reactor, RoomId::Electrical, RoomId::Medbay],
    ),
    (
        RoomId::Medbay,
        &[RoomId::Cafeteria, RoomId::Security, RoomId::UpperEngine],
    ),
    (
        RoomId::UpperEngine,
        &[RoomId::Reactor, RoomId::Medbay, RoomId::Cafeteria],
    ),
];

/// Static adjacency graph over rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGraph {
    /// room → neighbors, in listed order
    adj: BTreeMap<RoomId, Vec<RoomId>>,
}

impl RoomGraph {
    /// The standard ship map.
    pub fn standard() -> Self {
        Self::from_adjacency(STANDARD_ADJACENCY)
    }

    /// Build a graph from per-room neighbor lists, kept as given.
    pub fn from_adjacency(adjacency: &[(RoomId, &[RoomId])]) -> Self {
        let adj = adjacency
            .iter()
            .map(|(room, neighbors)| (*room, neighbors.to_vec()))
            .collect();
        Self { adj }
    }

    /// Build an undirected graph from an edge list.
    pub fn from_links(links: &[(RoomId, RoomId)]) -> Self {
        let mut adj: BTreeMap<RoomId, Vec<RoomId>> = BTreeMap::new();
        for &(a, b) in links {
            let forward = adj.entry(a).or_default();
            if !forward.contains(&b) {
                forward.push(b);
            }
            let back = adj.entry(b).or_default();
            if !back.contains(&a) {
                back.push(a);
            }
        }
        Self { adj }
    }

    /// Neighbors of a room. Empty for rooms not in the graph.
    pub fn neighbors(&self, room: RoomId) -> &[RoomId] {
        self.adj.get(&room).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Rooms in the graph, in map order.
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.adj.keys().copied()
    }

    pub fn has_room(&self, room: RoomId) -> bool {
        self.adj.contains_key(&room)
    }

    pub fn room_count(&self) -> usize {
        self.adj.len()
    }

    pub fn are_adjacent(&self, a: RoomId, b: RoomId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Check that the graph is a connected simple graph with symmetric links.
    pub fn validate(&self) -> Result<(), SetupError> {
        let Some(first) = self.rooms().next() else {
            return Err(SetupError::NoRooms);
        };

        for (&room, neighbors) in &self.adj {
            if neighbors.is_empty() {
                return Err(SetupError::IsolatedRoom(room));
            }
            for &next in neighbors {
                if next == room {
                    return Err(SetupError::SelfLink(room));
                }
                if !self.are_adjacent(next, room) {
                    return Err(SetupError::AsymmetricLink {
                        from: room,
                        to: next,
                    });
                }
            }
        }

        let mut seen = HashSet::from([first]);
        let mut queue = VecDeque::from([first]);
        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        match self.rooms().find(|room| !seen.contains(room)) {
            Some(unreached) => Err(SetupError::Disconnected(unreached)),
            None => Ok(()),
        }
    }
}

impl Default for RoomGraph {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_map_covers_every_room() {
        let graph = RoomGraph::standard();
        assert_eq!(graph.room_count(), RoomId::ALL.len());
        for room in RoomId::ALL {
            assert!(graph.has_room(room), "{room} missing");
        }
    }

    #[test]
    fn standard_map_is_valid() {
        assert_eq!(RoomGraph::standard().validate(), Ok(()));
    }

    #[test]
    fn neighbor_order_is_preserved() {
        let graph = RoomGraph::standard();
        assert_eq!(
            graph.neighbors(RoomId::Cafeteria),
            &[
                RoomId::UpperEngine,
                RoomId::Medbay,
                RoomId::Weapons,
                RoomId::Admin
            ]
        );
        assert_eq!(graph.neighbors(RoomId::Storage).len(), 5);
    }

    #[test]
    fn rooms_iterate_in_map_order() {
        let graph = RoomGraph::standard();
        let rooms: Vec<_> = graph.rooms().collect();
        assert_eq!(rooms, RoomId::ALL.to_vec());
    }

    #[test]
    fn keys_round_trip() {
        for room in RoomId::ALL {
            assert_eq!(RoomId::from_key(room.key()), Some(room));
        }
        assert_eq!(RoomId::from_key("bridge"), None);
    }

    #[test]
    fn display_uses_map_names() {
        assert_eq!(RoomId::LowerEngine.to_string(), "Lower Engine");
        assert_eq!(RoomId::Medbay.to_string(), "MedBay");
    }

    #[test]
    fn from_links_is_undirected() {
        let graph = RoomGraph::from_links(&[
            (RoomId::Admin, RoomId::Storage),
            (RoomId::Storage, RoomId::Admin),
        ]);
        assert_eq!(graph.neighbors(RoomId::Admin), &[RoomId::Storage]);
        assert_eq!(graph.neighbors(RoomId::Storage), &[RoomId::Admin]);
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn disconnected_graph_rejected() {
        let graph = RoomGraph::from_links(&[
            (RoomId::Admin, RoomId::Storage),
            (RoomId::Reactor, RoomId::Security),
        ]);
        assert_eq!(
            graph.validate(),
            Err(SetupError::Disconnected(RoomId::Reactor))
        );
    }

    #[test]
    fn asymmetric_link_rejected() {
        let graph = RoomGraph::from_adjacency(&[
            (RoomId::Admin, &[RoomId::Storage]),
            (RoomId::Storage, &[RoomId::Electrical]),
            (RoomId::Electrical, &[RoomId::Storage]),
        ]);
        assert_eq!(
            graph.validate(),
            Err(SetupError::AsymmetricLink {
                from: RoomId::Admin,
                to: RoomId::Storage
            })
        );
    }

    #[test]
    fn isolated_room_rejected() {
        let graph = RoomGraph::from_adjacency(&[(RoomId::Admin, &[])]);
        assert_eq!(graph.validate(), Err(SetupError::IsolatedRoom(RoomId::Admin)));
    }

    #[test]
    fn empty_graph_rejected() {
        assert_eq!(RoomGraph::from_links(&[]).validate(), Err(SetupError::NoRooms));
    }

    #[test]
    fn unknown_room_has_no_neighbors() {
        let graph = RoomGraph::from_links(&[(RoomId::Admin, RoomId::Storage)]);
        assert!(graph.neighbors(RoomId::Reactor).is_empty());
        assert!(!graph.has_room(RoomId::Reactor));
    }
}
