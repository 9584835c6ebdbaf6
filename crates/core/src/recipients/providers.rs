//! Collaborators consumed by recipient filters
//!
//! Filters never reach for global state. Everything they read - the client
//! list, team rosters, world visibility, split-screen ownership - comes in
//! through one of these traits, passed explicitly by the caller.
//!
//! [`NetworkGameServer`](s2net_engine::NetworkGameServer) implements every
//! trait here except [`VisibilityOracle`] and [`PredictionHost`], whose data
//! lives in the world and the movement simulation.

use s2net_sdk::{ClusterSet, PlayerBitVec, PlayerSlot, TeamId, Vector};

/// A client as seen by the filter
pub trait ClientHandle {
    /// Check if the client has fully entered the game
    fn is_active(&self) -> bool;

    fn player_slot(&self) -> PlayerSlot;
}

/// The live client list of the network server
pub trait ClientRoster {
    type Client: ClientHandle;

    /// Iterate clients in slot order
    fn clients(&self) -> impl Iterator<Item = &Self::Client>;

    /// Check if the client list exists
    ///
    /// Reading the roster before the network server is up is a programmer
    /// error, not a recoverable condition.
    fn is_available(&self) -> bool {
        true
    }

    /// Check if the caller runs on the server simulation thread
    fn is_simulation_thread(&self) -> bool {
        true
    }
}

/// Team membership lookup
pub trait TeamRoster {
    fn team_members(&self, team: TeamId) -> PlayerBitVec;
}

/// Which spatial set to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityQuery {
    /// Potentially visible set
    Pvs,
    /// Potentially audible set
    Pas,
}

/// Spatial visibility lookup backed by the world's leaf partition
pub trait VisibilityOracle {
    /// Clusters that can see (or hear) `origin`
    fn clusters_visible_from(&self, origin: &Vector, query: VisibilityQuery) -> ClusterSet;

    /// Clients whose view cluster is one of `clusters`
    fn clients_in_clusters(&self, clusters: &ClusterSet) -> PlayerBitVec;

    /// Clients that can see (or hear) `origin`
    fn clients_visible_from(&self, origin: &Vector, query: VisibilityQuery) -> PlayerBitVec {
        let clusters = self.clusters_visible_from(origin, query);
        self.clients_in_clusters(&clusters)
    }
}

/// Split-screen slot ownership
pub trait SplitScreenRegistry {
    /// Primary slot owning `slot`, or `slot` itself for primaries
    fn owner_of(&self, slot: PlayerSlot) -> PlayerSlot;

    fn is_secondary(&self, slot: PlayerSlot) -> bool;
}

/// Broadcast relay (HLTV / replay) pipeline
pub trait ReplayDirector {
    /// Slots of relay clients that record what regular clients receive
    fn replay_slots(&self) -> PlayerBitVec;
}

/// Client-side prediction state of the movement simulation
pub trait PredictionHost {
    /// Player whose user command is being simulated, if any
    ///
    /// That player predicts its own effects, so prediction-aware messages
    /// skip it.
    fn suppressed_host(&self) -> Option<PlayerSlot>;
}

/// A fixed suppressed host, or none
impl PredictionHost for Option<PlayerSlot> {
    fn suppressed_host(&self) -> Option<PlayerSlot> {
        *self
    }
}
