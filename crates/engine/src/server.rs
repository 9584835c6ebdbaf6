//! Network game server slot table
//!
//! Owns the client list that recipient filters read from, the server state
//! machine, and the tick counter.
//!
//! # Slot Allocation
//!
//! New clients take the lowest free slot below `max_clients`. Disconnecting a
//! primary client also disconnects every split-screen slot it owns.

use std::thread::ThreadId;

use s2net_sdk::{
    ClusterId, ClusterSet, PlayerBitVec, PlayerSlot, ServerState, TeamId, ABSOLUTE_PLAYER_LIMIT,
};

use crate::client::{ClientFlags, ServerSideClient};
use crate::error::ServerError;

/// The server's client-slot table and lifecycle state
pub struct NetworkGameServer {
    state: ServerState,
    tick: u64,
    max_clients: usize,
    clients: Vec<Option<ServerSideClient>>,
    /// Simulation thread (the thread that created the server)
    owner_thread: ThreadId,
}

impl NetworkGameServer {
    /// Create a dead server with room for `max_clients` slots
    ///
    /// `max_clients` is clamped to `[1, ABSOLUTE_PLAYER_LIMIT]`.
    pub fn new(max_clients: usize) -> Self {
        let max_clients = max_clients.clamp(1, ABSOLUTE_PLAYER_LIMIT);
        Self {
            state: ServerState::Dead,
            tick: 0,
            max_clients,
            clients: vec![None; max_clients],
            owner_thread: std::thread::current().id(),
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Current server tick (0 until the first simulated tick)
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn max_clients(&self) -> usize {
        self.max_clients
    }

    /// Check if the current thread is the one that created the server
    pub fn is_simulation_thread(&self) -> bool {
        std::thread::current().id() == self.owner_thread
    }

    /// Move to a new server state
    ///
    /// Entering [`ServerState::Dead`] drops every client and resets the tick.
    ///
    /// # Returns
    /// The previous state.
    pub fn set_state(&mut self, next: ServerState) -> Result<ServerState, ServerError> {
        let previous = self.state;
        if !previous.can_transition_to(next) {
            return Err(ServerError::InvalidTransition {
                from: previous,
                to: next,
            });
        }

        if previous == next {
            return Ok(previous);
        }

        if next == ServerState::Dead {
            let dropped = self.client_count();
            self.clients.iter_mut().for_each(|c| *c = None);
            self.tick = 0;
            if dropped > 0 {
                tracing::debug!("Dropped {} clients on server shutdown", dropped);
            }
        }

        self.state = next;
        tracing::debug!("Server state: {} -> {}", previous, next);
        Ok(previous)
    }

    /// Advance one tick if the server is simulating
    ///
    /// # Returns
    /// The new tick, or `None` while not [`ServerState::Active`].
    pub fn advance_tick(&mut self) -> Option<u64> {
        if !self.state.is_simulating() {
            return None;
        }
        self.tick += 1;
        Some(self.tick)
    }

    // ========================================================================
    // Client lifecycle
    // ========================================================================

    /// Connect a networked client
    pub fn connect_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        self.insert_client(name, ClientFlags::empty(), None)
    }

    /// Connect a bot
    pub fn connect_fake_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        self.insert_client(name, ClientFlags::FAKE, None)
    }

    /// Connect a broadcast relay (HLTV / replay) client
    pub fn connect_replay_client(&mut self, name: &str) -> Result<PlayerSlot, ServerError> {
        self.insert_client(name, ClientFlags::FAKE | ClientFlags::HLTV, None)
    }

    /// Connect a split-screen slot sharing `owner`'s connection
    ///
    /// The owner must be a connected primary client with a real network
    /// connection, so bots and relay clients are rejected. The new slot joins
    /// the owner's team.
    pub fn connect_split_screen_client(
        &mut self,
        owner: PlayerSlot,
        name: &str,
    ) -> Result<PlayerSlot, ServerError> {
        let owner_team = match self.client(owner) {
            Some(client) if !client.is_split_screen() && !client.is_fake() => client.team(),
            _ => return Err(ServerError::InvalidOwner(owner)),
        };

        let slot = self.insert_client(name, ClientFlags::empty(), Some(owner))?;
        if let Some(client) = self.client_mut(slot) {
            client.set_team(owner_team);
        }
        Ok(slot)
    }

    /// Mark a client as fully in game
    pub fn activate_client(&mut self, slot: PlayerSlot) -> Result<(), ServerError> {
        self.require_client_mut(slot)?.set_active();
        tracing::debug!("Client {} active", slot);
        Ok(())
    }

    pub fn set_client_team(&mut self, slot: PlayerSlot, team: TeamId) -> Result<(), ServerError> {
        self.require_client_mut(slot)?.set_team(team);
        Ok(())
    }

    /// Update the visibility cluster a client views the world from
    pub fn set_client_view_cluster(
        &mut self,
        slot: PlayerSlot,
        cluster: Option<ClusterId>,
    ) -> Result<(), ServerError> {
        self.require_client_mut(slot)?.set_view_cluster(cluster);
        Ok(())
    }

    /// Disconnect a client and any split-screen slots it owns
    ///
    /// # Returns
    /// Every freed slot, the requested one first.
    pub fn disconnect_client(&mut self, slot: PlayerSlot) -> Result<Vec<PlayerSlot>, ServerError> {
        let index = self.slot_index(slot)?;
        let removed = self.clients[index]
            .take()
            .ok_or(ServerError::SlotEmpty(slot))?;

        let mut freed = vec![slot];
        if !removed.is_split_screen() {
            for child in self.split_screen_children(slot).iter() {
                if let Some(i) = child.index() {
                    self.clients[i] = None;
                    freed.push(child);
                }
            }
        }

        tracing::debug!("Client {} ({}) disconnected, freed {:?}", slot, removed.name(), freed);
        Ok(freed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get the client in a slot
    pub fn client(&self, slot: PlayerSlot) -> Option<&ServerSideClient> {
        slot.index()
            .and_then(|i| self.clients.get(i))
            .and_then(Option::as_ref)
    }

    /// Iterate occupied slots in slot order
    pub fn clients(&self) -> impl Iterator<Item = &ServerSideClient> {
        self.clients.iter().flatten()
    }

    pub fn client_count(&self) -> usize {
        self.clients().count()
    }

    /// Slots of connected clients on a team
    pub fn team_members(&self, team: TeamId) -> PlayerBitVec {
        self.clients()
            .filter(|c| c.team() == team)
            .map(ServerSideClient::player_slot)
            .collect()
    }

    /// Split-screen slots owned by `owner`
    pub fn split_screen_children(&self, owner: PlayerSlot) -> PlayerBitVec {
        self.clients()
            .filter(|c| c.split_screen_owner() == Some(owner))
            .map(ServerSideClient::player_slot)
            .collect()
    }

    /// Slots of broadcast relay clients
    pub fn replay_slots(&self) -> PlayerBitVec {
        self.clients()
            .filter(|c| c.is_hltv())
            .map(ServerSideClient::player_slot)
            .collect()
    }

    /// Active clients whose view cluster is in `clusters`
    pub fn clients_in_clusters(&self, clusters: &ClusterSet) -> PlayerBitVec {
        self.clients()
            .filter(|c| c.is_active())
            .filter(|c| c.view_cluster().is_some_and(|id| clusters.contains(&id)))
            .map(ServerSideClient::player_slot)
            .collect()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn insert_client(
        &mut self,
        name: &str,
        flags: ClientFlags,
        owner: Option<PlayerSlot>,
    ) -> Result<PlayerSlot, ServerError> {
        if !self.state.has_client_roster() {
            return Err(ServerError::RosterUnavailable(self.state));
        }

        let index = self
            .clients
            .iter()
            .position(Option::is_none)
            .ok_or(ServerError::ServerFull(self.max_clients))?;
        let slot = PlayerSlot::new(index as i32);

        let mut client = ServerSideClient::new(slot, name, flags);
        if let Some(owner) = owner {
            client = client.with_owner(owner);
        }
        self.clients[index] = Some(client);

        tracing::debug!("Client {} connected in slot {}", name, slot);
        Ok(slot)
    }

    fn slot_index(&self, slot: PlayerSlot) -> Result<usize, ServerError> {
        slot.index()
            .filter(|&i| i < self.max_clients)
            .ok_or(ServerError::InvalidSlot(slot))
    }

    fn client_mut(&mut self, slot: PlayerSlot) -> Option<&mut ServerSideClient> {
        slot.index()
            .and_then(|i| self.clients.get_mut(i))
            .and_then(Option::as_mut)
    }

    fn require_client_mut(
        &mut self,
        slot: PlayerSlot,
    ) -> Result<&mut ServerSideClient, ServerError> {
        let index = self.slot_index(slot)?;
        self.clients[index]
            .as_mut()
            .ok_or(ServerError::SlotEmpty(slot))
    }
}

impl Default for NetworkGameServer {
    fn default() -> Self {
        Self::new(ABSOLUTE_PLAYER_LIMIT)
    }
}
