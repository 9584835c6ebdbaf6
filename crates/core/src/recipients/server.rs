//! Collaborator implementations backed by the server slot table

use s2net_engine::{NetworkGameServer, ServerSideClient};
use s2net_sdk::{ClusterSet, PlayerBitVec, PlayerSlot, TeamId, Vector};

use super::providers::{
    ClientHandle, ClientRoster, ReplayDirector, SplitScreenRegistry, TeamRoster,
    VisibilityOracle, VisibilityQuery,
};

impl ClientHandle for ServerSideClient {
    fn is_active(&self) -> bool {
        ServerSideClient::is_active(self)
    }

    fn player_slot(&self) -> PlayerSlot {
        ServerSideClient::player_slot(self)
    }
}

impl ClientRoster for NetworkGameServer {
    type Client = ServerSideClient;

    fn clients(&self) -> impl Iterator<Item = &ServerSideClient> {
        NetworkGameServer::clients(self)
    }

    fn is_available(&self) -> bool {
        self.state().has_client_roster()
    }

    fn is_simulation_thread(&self) -> bool {
        NetworkGameServer::is_simulation_thread(self)
    }
}

impl TeamRoster for NetworkGameServer {
    fn team_members(&self, team: TeamId) -> PlayerBitVec {
        NetworkGameServer::team_members(self, team)
    }
}

impl SplitScreenRegistry for NetworkGameServer {
    fn owner_of(&self, slot: PlayerSlot) -> PlayerSlot {
        self.client(slot)
            .and_then(ServerSideClient::split_screen_owner)
            .unwrap_or(slot)
    }

    fn is_secondary(&self, slot: PlayerSlot) -> bool {
        self.client(slot)
            .map(ServerSideClient::is_split_screen)
            .unwrap_or(false)
    }
}

impl ReplayDirector for NetworkGameServer {
    fn replay_slots(&self) -> PlayerBitVec {
        NetworkGameServer::replay_slots(self)
    }
}

/// Visibility oracle pairing a world cluster query with the server's view clusters
///
/// The world supplies `clusters_visible_from`; which client sits in which
/// cluster comes from the slot table.
pub struct ServerVisibility<'a, F> {
    server: &'a NetworkGameServer,
    query: F,
}

impl<'a, F> ServerVisibility<'a, F>
where
    F: Fn(&Vector, VisibilityQuery) -> ClusterSet,
{
    pub fn new(server: &'a NetworkGameServer, query: F) -> Self {
        Self { server, query }
    }
}

impl<F> VisibilityOracle for ServerVisibility<'_, F>
where
    F: Fn(&Vector, VisibilityQuery) -> ClusterSet,
{
    fn clusters_visible_from(&self, origin: &Vector, query: VisibilityQuery) -> ClusterSet {
        (self.query)(origin, query)
    }

    fn clients_in_clusters(&self, clusters: &ClusterSet) -> PlayerBitVec {
        self.server.clients_in_clusters(clusters)
    }
}
