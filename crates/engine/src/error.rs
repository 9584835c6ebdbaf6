//! Error types for server slot table operations

use s2net_sdk::{PlayerSlot, ServerState};

/// Error type for client slot and server state operations
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Slot is outside `[0, max_clients)`
    #[error("Invalid player slot: {0}")]
    InvalidSlot(PlayerSlot),

    /// No client occupies the slot
    #[error("No client in slot {0}")]
    SlotEmpty(PlayerSlot),

    /// Every slot below `max_clients` is taken
    #[error("Server full ({0} clients)")]
    ServerFull(usize),

    /// The state machine does not allow this transition
    #[error("Invalid server state transition: {from} -> {to}")]
    InvalidTransition { from: ServerState, to: ServerState },

    /// The client list does not exist in the current state
    #[error("Client roster unavailable while server is {0}")]
    RosterUnavailable(ServerState),

    /// Split-screen owner must be a connected primary client
    #[error("Invalid split-screen owner: {0}")]
    InvalidOwner(PlayerSlot),
}
