//! Task catalog: the task names that can be dealt in each room.

use std::collections::BTreeMap;

use crate::error::SetupError;
use crate::rooms::{RoomGraph, RoomId};

static STANDARD_TASKS: &[(RoomId, &[&str])] = &[
    (RoomId::Cafeteria, &["Fix Wiring", "Empty Garbage"]),
    (RoomId::Weapons, &["Clear Asteroids", "Align Scope"]),
    (RoomId::O2, &["Clean O2 Filter", "Fix Wiring"]),
    (RoomId::Navigation, &["Chart Course", "Stabilize Steering"]),
    (RoomId::Shields, &["Prime Shields", "Fix Wiring"]),
    (RoomId::Communications, &["Download Data", "Upload Data"]),
    (RoomId::Storage, &["Fuel Engines", "Empty Garbage"]),
    (RoomId::Admin, &["Swipe Card", "Upload Data"]),
    (
        RoomId::Electrical,
        &["Calibrate Distributor", "Divert Power", "Fix Wiring"],
    ),
    (RoomId::LowerEngine, &["Align Engine Output", "Fuel Engines"]),
    (RoomId::Reactor, &["Start Reactor", "Unlock Manifolds"]),
    (RoomId::Security, &["Monitor Cameras", "Fix Wiring"]),
    (RoomId::Medbay, &["Submit Scan", "Inspect Sample"]),
    (RoomId::UpperEngine, &["Align Engine Output", "Fuel Engines"]),
];

/// Per-room list of task names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCatalog {
    entries: BTreeMap<RoomId, Vec<&'static str>>,
}

impl TaskCatalog {
    /// The catalog for the standard map.
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_TASKS)
    }

    pub fn from_entries(entries: &[(RoomId, &[&'static str])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(room, names)| (*room, names.to_vec()))
                .collect(),
        }
    }

    /// Task names available in a room. Empty if the room has no entry.
    pub fn tasks_for(&self, room: RoomId) -> &[&'static str] {
        self.entries
            .get(&room)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every room of `graph` must offer at least one task.
    pub fn validate(&self, graph: &RoomGraph) -> Result<(), SetupError> {
        match graph.rooms().find(|&room| self.tasks_for(room).is_empty()) {
            Some(room) => Err(SetupError::EmptyTaskCatalog(room)),
            None => Ok(()),
        }
    }
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_standard_map() {
        let catalog = TaskCatalog::standard();
        assert_eq!(catalog.validate(&RoomGraph::standard()), Ok(()));
    }

    #[test]
    fn every_room_has_tasks() {
        let catalog = TaskCatalog::standard();
        for room in RoomId::ALL {
            assert!(!catalog.tasks_for(room).is_empty(), "{room} has no tasks");
        }
    }

    #[test]
    fn electrical_has_three_tasks() {
        let catalog = TaskCatalog::standard();
        assert_eq!(
            catalog.tasks_for(RoomId::Electrical),
            &["Calibrate Distributor", "Divert Power", "Fix Wiring"]
        );
    }

    #[test]
    fn missing_room_fails_validation() {
        let catalog = TaskCatalog::from_entries(&[(RoomId::Admin, &["Swipe Card"])]);
        let graph = RoomGraph::from_links(&[(RoomId::Admin, RoomId::Storage)]);
        assert_eq!(
            catalog.validate(&graph),
            Err(SetupError::EmptyTaskCatalog(RoomId::Storage))
        );
    }

    #[test]
    fn empty_entry_fails_validation() {
        let catalog = TaskCatalog::from_entries(&[
            (RoomId::Admin, &["Swipe Card"]),
            (RoomId::Storage, &[]),
        ]);
        let graph = RoomGraph::from_links(&[(RoomId::Admin, RoomId::Storage)]);
        assert_eq!(
            catalog.validate(&graph),
            Err(SetupError::EmptyTaskCatalog(RoomId::Storage))
        );
    }
}
