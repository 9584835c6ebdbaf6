//! In-memory collaborator fakes shared by the recipient tests

use std::collections::HashMap;

use s2net_sdk::{ClusterId, ClusterSet, PlayerBitVec, PlayerSlot, TeamId, Vector};

use super::providers::{
    ClientHandle, ClientRoster, SplitScreenRegistry, TeamRoster, VisibilityOracle,
    VisibilityQuery,
};

pub fn slots(values: &[i32]) -> PlayerBitVec {
    values.iter().copied().map(PlayerSlot::new).collect()
}

pub fn collect(bits: &PlayerBitVec) -> Vec<i32> {
    bits.iter().map(PlayerSlot::get).collect()
}

pub struct FakeClient {
    slot: PlayerSlot,
    active: bool,
}

impl ClientHandle for FakeClient {
    fn is_active(&self) -> bool {
        self.active
    }

    fn player_slot(&self) -> PlayerSlot {
        self.slot
    }
}

pub struct FakeRoster {
    clients: Vec<FakeClient>,
    pub available: bool,
}

impl FakeRoster {
    /// Build from `(slot, active)` pairs
    pub fn new(clients: &[(i32, bool)]) -> Self {
        Self {
            clients: clients
                .iter()
                .map(|&(slot, active)| FakeClient {
                    slot: PlayerSlot::new(slot),
                    active,
                })
                .collect(),
            available: true,
        }
    }
}

impl ClientRoster for FakeRoster {
    type Client = FakeClient;

    fn clients(&self) -> impl Iterator<Item = &FakeClient> {
        self.clients.iter()
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[derive(Default)]
pub struct FakeTeams {
    members: HashMap<TeamId, Vec<i32>>,
}

impl FakeTeams {
    pub fn with(mut self, team: TeamId, members: &[i32]) -> Self {
        self.members.insert(team, members.to_vec());
        self
    }
}

impl TeamRoster for FakeTeams {
    fn team_members(&self, team: TeamId) -> PlayerBitVec {
        self.members
            .get(&team)
            .map(|m| slots(m))
            .unwrap_or_default()
    }
}

/// Maps secondary slot -> owner slot
#[derive(Default)]
pub struct FakeSplitScreen {
    owners: HashMap<i32, i32>,
}

impl FakeSplitScreen {
    pub fn with(mut self, secondary: i32, owner: i32) -> Self {
        self.owners.insert(secondary, owner);
        self
    }
}

impl SplitScreenRegistry for FakeSplitScreen {
    fn owner_of(&self, slot: PlayerSlot) -> PlayerSlot {
        self.owners
            .get(&slot.get())
            .copied()
            .map(PlayerSlot::new)
            .unwrap_or(slot)
    }

    fn is_secondary(&self, slot: PlayerSlot) -> bool {
        self.owners.contains_key(&slot.get())
    }
}

/// World where every origin sees the same clusters
#[derive(Default)]
pub struct FakeWorld {
    pvs: ClusterSet,
    pas: ClusterSet,
    views: Vec<(i32, ClusterId)>,
}

impl FakeWorld {
    pub fn visible(mut self, clusters: &[i32]) -> Self {
        self.pvs = clusters.iter().copied().map(ClusterId).collect();
        self
    }

    pub fn audible(mut self, clusters: &[i32]) -> Self {
        self.pas = clusters.iter().copied().map(ClusterId).collect();
        self
    }

    pub fn view(mut self, slot: i32, cluster: i32) -> Self {
        self.views.push((slot, ClusterId(cluster)));
        self
    }
}

impl VisibilityOracle for FakeWorld {
    fn clusters_visible_from(&self, _origin: &Vector, query: VisibilityQuery) -> ClusterSet {
        match query {
            VisibilityQuery::Pvs => self.pvs.clone(),
            VisibilityQuery::Pas => self.pas.clone(),
        }
    }

    fn clients_in_clusters(&self, clusters: &ClusterSet) -> PlayerBitVec {
        self.views
            .iter()
            .filter(|(_, cluster)| clusters.contains(cluster))
            .map(|&(slot, _)| PlayerSlot::new(slot))
            .collect()
    }
}
