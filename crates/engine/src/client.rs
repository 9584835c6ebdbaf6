//! Server-side client records
//!
//! One [`ServerSideClient`] exists per occupied slot. A client is *connected*
//! as soon as it takes a slot and *active* once it has fully entered the game;
//! only active clients receive broadcast messages.

use bitflags::bitflags;

use s2net_sdk::{ClusterId, PlayerSlot, TeamId};

bitflags! {
    /// Connection and role flags of a client slot
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClientFlags: u32 {
        /// Slot is occupied
        const CONNECTED = 1 << 0;
        /// Client has fully entered the game
        const ACTIVE = 1 << 1;
        /// Bot without a network connection
        const FAKE = 1 << 2;
        /// Broadcast relay (HLTV / replay) client
        const HLTV = 1 << 3;
        /// Secondary split-screen slot sharing its owner's connection
        const SPLIT_SCREEN = 1 << 4;
    }
}

/// A client occupying a slot on the server
#[derive(Debug, Clone)]
pub struct ServerSideClient {
    slot: PlayerSlot,
    name: String,
    flags: ClientFlags,
    team: TeamId,
    view_cluster: Option<ClusterId>,
    split_screen_owner: Option<PlayerSlot>,
}

impl ServerSideClient {
    pub(crate) fn new(slot: PlayerSlot, name: &str, flags: ClientFlags) -> Self {
        Self {
            slot,
            name: name.to_owned(),
            flags: flags | ClientFlags::CONNECTED,
            team: TeamId::UNASSIGNED,
            view_cluster: None,
            split_screen_owner: None,
        }
    }

    pub(crate) fn with_owner(mut self, owner: PlayerSlot) -> Self {
        self.flags |= ClientFlags::SPLIT_SCREEN;
        self.split_screen_owner = Some(owner);
        self
    }

    pub fn player_slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> ClientFlags {
        self.flags
    }

    pub fn is_connected(&self) -> bool {
        self.flags.contains(ClientFlags::CONNECTED)
    }

    /// Check if the client has fully entered the game
    pub fn is_active(&self) -> bool {
        self.flags.contains(ClientFlags::ACTIVE)
    }

    pub fn is_fake(&self) -> bool {
        self.flags.contains(ClientFlags::FAKE)
    }

    pub fn is_hltv(&self) -> bool {
        self.flags.contains(ClientFlags::HLTV)
    }

    pub fn is_split_screen(&self) -> bool {
        self.flags.contains(ClientFlags::SPLIT_SCREEN)
    }

    /// Primary slot owning this split-screen slot
    pub fn split_screen_owner(&self) -> Option<PlayerSlot> {
        self.split_screen_owner
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Cluster the client's view origin currently sits in
    pub fn view_cluster(&self) -> Option<ClusterId> {
        self.view_cluster
    }

    pub(crate) fn set_active(&mut self) {
        self.flags |= ClientFlags::ACTIVE;
    }

    pub(crate) fn set_team(&mut self, team: TeamId) {
        self.team = team;
    }

    pub(crate) fn set_view_cluster(&mut self, cluster: Option<ClusterId>) {
        self.view_cluster = cluster;
    }
}
