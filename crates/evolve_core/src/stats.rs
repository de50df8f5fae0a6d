//! Summary statistics for the stats screen.

use crate::cluster::power;
use evolve_data::{OrganismKind, World};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub name: String,
    pub kind: OrganismKind,
    pub size: u32,
    pub cluster: Option<(String, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldStats {
    pub player: Option<PlayerStats>,
    pub organisms: usize,
    pub clusters: usize,
    pub largest: Option<(String, u32)>,
    pub has_evolved: bool,
}

impl WorldStats {
    #[must_use]
    pub fn collect(world: &World) -> Self {
        let player = world.player().map(|p| PlayerStats {
            name: p.name.clone(),
            kind: p.kind,
            size: p.size,
            cluster: world
                .cluster_of(&p.id)
                .map(|c| (c.name.clone(), power(&c.name))),
        });
        let largest = world
            .organisms
            .iter()
            .filter(|o| !world.is_player(&o.id))
            .max_by_key(|o| o.size)
            .map(|o| (o.name.clone(), o.size));
        Self {
            player,
            organisms: world.organisms.len(),
            clusters: world.clusters.len(),
            largest,
            has_evolved: world.has_evolved,
        }
    }

    /// One line per stat, ready for the console.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.player {
            Some(p) => {
                lines.push(format!("Player: {} the {}", p.name, p.kind));
                lines.push(format!("Size: {}", p.size));
                match &p.cluster {
                    Some((name, power)) => {
                        lines.push(format!("Cluster: {name} (power {power})"))
                    }
                    None => lines.push("Cluster: none".to_string()),
                }
            }
            None => lines.push("Player: none".to_string()),
        }
        lines.push(format!("Cells in world: {}", self.organisms));
        lines.push(format!("Clusters in world: {}", self.clusters));
        if let Some((name, size)) = &self.largest {
            lines.push(format!("Largest rival: {name} (size {size})"));
        }
        lines.push(format!(
            "Evolution: {}",
            if self.has_evolved { "done" } else { "pending" }
        ));
        lines
    }
}

impl fmt::Display for WorldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
