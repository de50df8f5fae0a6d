use crate::cluster::Cluster;
use crate::organism::{Organism, OrganismId, OrganismKind, PLAYER_START_SIZE};
use serde::{Deserialize, Serialize};

/// Everything a running session owns, and the unit handed to persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub organisms: Vec<Organism>,
    pub clusters: Vec<Cluster>,
    pub player: Option<OrganismId>,
    /// Set once the automatic evolution has fired.
    pub has_evolved: bool,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fresh player cell and designates it as the player.
    pub fn create_initial_player(&mut self, kind: OrganismKind, name: impl Into<String>) -> OrganismId {
        let organism = Organism::new(name, kind, PLAYER_START_SIZE);
        let id = organism.id;
        self.organisms.push(organism);
        self.player = Some(id);
        id
    }

    #[must_use]
    pub fn index_of(&self, id: &OrganismId) -> Option<usize> {
        self.organisms.iter().position(|o| &o.id == id)
    }

    #[must_use]
    pub fn organism(&self, id: &OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| &o.id == id)
    }

    pub fn organism_mut(&mut self, id: &OrganismId) -> Option<&mut Organism> {
        self.organisms.iter_mut().find(|o| &o.id == id)
    }

    #[must_use]
    pub fn player(&self) -> Option<&Organism> {
        self.player.as_ref().and_then(|id| self.organism(id))
    }

    #[must_use]
    pub fn player_index(&self) -> Option<usize> {
        self.player.as_ref().and_then(|id| self.index_of(id))
    }

    #[must_use]
    pub fn is_player(&self, id: &OrganismId) -> bool {
        self.player.as_ref() == Some(id)
    }

    #[must_use]
    pub fn name_taken(&self, name: &str) -> bool {
        self.organisms.iter().any(|o| o.name == name)
    }

    /// Removes an organism and every membership pointing at it.
    pub fn remove_organism(&mut self, id: &OrganismId) -> Option<Organism> {
        let idx = self.index_of(id)?;
        let removed = self.organisms.remove(idx);
        for cluster in &mut self.clusters {
            cluster.members.retain(|m| m != id);
        }
        if self.player.as_ref() == Some(id) {
            self.player = None;
        }
        Some(removed)
    }

    /// First cluster (in iteration order) that lists `id` as a member.
    #[must_use]
    pub fn cluster_of(&self, id: &OrganismId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(id))
    }

    #[must_use]
    pub fn cluster_index_of(&self, id: &OrganismId) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(id))
    }
}
