//! Error types.
//!
//! Only setup can fail. Once an engine exists, `tick` is infallible.

use thiserror::Error;

use crate::config::ConfigError;
use crate::rooms::RoomId;

/// Reasons a game cannot be set up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("room {0} has no tasks in the catalog")]
    EmptyTaskCatalog(RoomId),

    #[error("the ship has no rooms")]
    NoRooms,

    #[error("room {0} has no neighbors")]
    IsolatedRoom(RoomId),

    #[error("room {0} links to itself")]
    SelfLink(RoomId),

    #[error("link {from} -> {to} has no matching link back")]
    AsymmetricLink { from: RoomId, to: RoomId },

    #[error("room {0} cannot be reached from the rest of the ship")]
    Disconnected(RoomId),
}

/// Failure to encode a state snapshot.
#[derive(Debug, Error)]
#[error("failed to encode game state: {0}")]
pub struct SnapshotError(#[from] bincode::Error);
