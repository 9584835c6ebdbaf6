//! Network channel and server state definitions
//!
//! Mirrors `NetChannelBufType_t` and `server_state_t` from the engine headers.

use std::fmt;

/// Which netchannel stream a message is written to
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetChannelBufType {
    /// Dropped if the datagram is lost
    Unreliable = 0,
    /// Resent until acknowledged
    #[default]
    Reliable = 1,
    /// Voice data stream
    Voice = 2,
}

impl NetChannelBufType {
    /// Convert a raw engine value
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unreliable),
            1 => Some(Self::Reliable),
            2 => Some(Self::Voice),
            _ => None,
        }
    }

    /// Check if this is the reliable stream
    pub fn is_reliable(self) -> bool {
        self == Self::Reliable
    }
}

/// Network server lifecycle state
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServerState {
    /// No server running
    #[default]
    Dead = 0,
    /// Waiting for the resource manifest of the next map
    WaitingForManifest = 1,
    /// Map is loading; clients may connect
    Loading = 2,
    /// Simulating
    Active = 3,
    /// Running but not simulating
    Paused = 4,
}

impl ServerState {
    /// Check if a transition from `self` to `next` is allowed
    ///
    /// ```text
    /// Dead ─► WaitingForManifest ─► Loading ─► Active ◄─► Paused
    ///   ▲                                                   │
    ///   └────────────────── (from any state) ───────────────┘
    /// ```
    ///
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: ServerState) -> bool {
        use ServerState::*;

        if self == next || next == Dead {
            return true;
        }

        matches!(
            (self, next),
            (Dead, WaitingForManifest)
                | (WaitingForManifest, Loading)
                | (Loading, Active)
                | (Active, Paused)
                | (Paused, Active)
        )
    }

    /// Check if the client list exists in this state
    ///
    /// Roster-dependent filter operations are only meaningful here.
    pub fn has_client_roster(self) -> bool {
        matches!(self, Self::Loading | Self::Active | Self::Paused)
    }

    /// Check if ticks advance in this state
    pub fn is_simulating(self) -> bool {
        self == Self::Active
    }
}

impl From<i32> for ServerState {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::WaitingForManifest,
            2 => Self::Loading,
            3 => Self::Active,
            4 => Self::Paused,
            _ => Self::Dead,
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dead => "dead",
            Self::WaitingForManifest => "waiting_for_manifest",
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buf_type_from_raw() {
        assert_eq!(NetChannelBufType::from_raw(0), Some(NetChannelBufType::Unreliable));
        assert_eq!(NetChannelBufType::from_raw(1), Some(NetChannelBufType::Reliable));
        assert_eq!(NetChannelBufType::from_raw(2), Some(NetChannelBufType::Voice));
        assert_eq!(NetChannelBufType::from_raw(-1), None);
        assert_eq!(NetChannelBufType::from_raw(3), None);
    }

    #[test]
    fn test_buf_type_default_is_reliable() {
        assert_eq!(NetChannelBufType::default(), NetChannelBufType::Reliable);
        assert!(NetChannelBufType::default().is_reliable());
    }

    #[test]
    fn test_server_state_from_i32() {
        assert_eq!(ServerState::from(0), ServerState::Dead);
        assert_eq!(ServerState::from(3), ServerState::Active);
        assert_eq!(ServerState::from(4), ServerState::Paused);
        // Unknown values map to Dead
        assert_eq!(ServerState::from(42), ServerState::Dead);
    }

    #[test]
    fn test_server_state_transitions() {
        use ServerState::*;

        assert!(Dead.can_transition_to(WaitingForManifest));
        assert!(WaitingForManifest.can_transition_to(Loading));
        assert!(Loading.can_transition_to(Active));
        assert!(Active.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Active));
        assert!(Paused.can_transition_to(Dead));
        assert!(Active.can_transition_to(Active));

        assert!(!Dead.can_transition_to(Active));
        assert!(!Dead.can_transition_to(Loading));
        assert!(!Loading.can_transition_to(Paused));
        assert!(!Active.can_transition_to(Loading));
    }

    #[test]
    fn test_server_state_roster() {
        assert!(!ServerState::Dead.has_client_roster());
        assert!(!ServerState::WaitingForManifest.has_client_roster());
        assert!(ServerState::Loading.has_client_roster());
        assert!(ServerState::Active.has_client_roster());
        assert!(ServerState::Paused.has_client_roster());

        assert!(ServerState::Active.is_simulating());
        assert!(!ServerState::Paused.is_simulating());
    }
}
