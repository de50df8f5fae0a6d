//! Cluster membership and power.

use crate::error::{LifeError, Result};
use evolve_data::{Cluster, OrganismId, World};

/// Derives a cluster's power from its name: every ASCII digit, in order of
/// appearance, read as one decimal number. No digits means power 0.
///
/// ```
/// assert_eq!(evolve_core::power("Haven42"), 42);
/// assert_eq!(evolve_core::power("Pod7Den3"), 73);
/// assert_eq!(evolve_core::power("Nest"), 0);
/// ```
#[must_use]
pub fn power(name: &str) -> u64 {
    name.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d))
        })
}

pub trait ClusterLogic {
    /// Adds a member. Adding an existing member changes nothing.
    fn add_member(&mut self, id: OrganismId) -> Result<()>;

    /// Removes a member. Removing an absent member changes nothing.
    fn remove_member(&mut self, id: OrganismId) -> Result<()>;

    fn power(&self) -> u64;
}

impl ClusterLogic for Cluster {
    fn add_member(&mut self, id: OrganismId) -> Result<()> {
        if id.is_nil() {
            return Err(LifeError::NilArgument("organism"));
        }
        if !self.contains(&id) {
            self.members.push(id);
        }
        Ok(())
    }

    fn remove_member(&mut self, id: OrganismId) -> Result<()> {
        if id.is_nil() {
            return Err(LifeError::NilArgument("organism"));
        }
        self.members.retain(|m| m != &id);
        Ok(())
    }

    fn power(&self) -> u64 {
        power(&self.name)
    }
}

/// Moves `id` into the cluster at `target`, leaving any cluster it was in.
pub fn move_into(world: &mut World, id: OrganismId, target: usize) -> Result<()> {
    if let Some(prior) = world.cluster_index_of(&id) {
        if prior == target {
            return Ok(());
        }
        world.clusters[prior].remove_member(id)?;
    }
    match world.clusters.get_mut(target) {
        Some(cluster) => cluster.add_member(id),
        None => Err(LifeError::NilArgument("cluster")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_power_examples() {
        assert_eq!(power("Haven42"), 42);
        assert_eq!(power("Nest"), 0);
        assert_eq!(power("Pod7Den3"), 73);
        assert_eq!(power("007"), 7);
        assert_eq!(power(""), 0);
    }

    #[test]
    fn test_power_saturates() {
        assert_eq!(power("Deep99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_membership_is_idempotent() {
        let mut cluster = Cluster::new("Haven42");
        let id = Uuid::new_v4();
        cluster.add_member(id).unwrap();
        cluster.add_member(id).unwrap();
        assert_eq!(cluster.members.len(), 1);

        cluster.remove_member(id).unwrap();
        cluster.remove_member(id).unwrap();
        assert!(cluster.members.is_empty());
    }

    #[test]
    fn test_nil_argument() {
        let mut cluster = Cluster::new("Haven42");
        assert_eq!(
            cluster.add_member(Uuid::nil()),
            Err(LifeError::NilArgument("organism"))
        );
        assert_eq!(
            cluster.remove_member(Uuid::nil()),
            Err(LifeError::NilArgument("organism"))
        );
    }

    #[test]
    fn test_move_into_leaves_prior_cluster() {
        let mut world = World::new();
        let id = world.create_initial_player(evolve_data::OrganismKind::Omnivore, "Ada");
        world.clusters.push(Cluster::new("Low3"));
        world.clusters.push(Cluster::new("High80"));
        move_into(&mut world, id, 0).unwrap();
        move_into(&mut world, id, 1).unwrap();
        assert!(!world.clusters[0].contains(&id));
        assert!(world.clusters[1].contains(&id));
    }
}
