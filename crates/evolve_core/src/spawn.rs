//! Random organism and cluster generation.

use crate::cluster::ClusterLogic;
use crate::error::Result;
use evolve_data::{Cluster, Organism, OrganismKind, World};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

pub const ORGANISM_NAMES: [&str; 16] = [
    "Blip", "Mote", "Speck", "Gloop", "Nib", "Wisp", "Fleck", "Puddle", "Dot", "Squish", "Bobby",
    "Quill", "Sprout", "Fang", "Ember", "Drift",
];

pub const CLUSTER_NAMES: [&str; 10] = [
    "Haven", "Nest", "Pod", "Colony", "Hive", "Den", "Reef", "Grove", "Swarm", "Core",
];

/// Retries against existing names before falling back to a numeric suffix.
pub const NAME_RETRIES: usize = 10;

const SPAWN_SIZE_RANGE: std::ops::Range<u32> = 1..8;
const CLUSTER_POWER_RANGE: std::ops::Range<u32> = 1..100;
const CLUSTER_SEED_RANGE: std::ops::RangeInclusive<usize> = 2..=5;

/// Picks a pool name not yet used in `world`. After `NAME_RETRIES` collisions
/// the last checked pick gets a random number appended.
pub fn unique_name<R: Rng + ?Sized>(world: &World, rng: &mut R) -> String {
    let mut candidate = "";
    for _ in 0..NAME_RETRIES {
        candidate = pick(&ORGANISM_NAMES, rng);
        if !world.name_taken(candidate) {
            return candidate.to_string();
        }
    }
    format!("{candidate}{}", rng.gen_range(1..1000))
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or("Cell")
}

/// A wild cell: herbivore or carnivore with size in `[1, 8)`. The id comes
/// from `rng` too, so a seeded session reproduces ids.
pub fn random_organism<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Organism {
    let kind = if rng.gen_bool(0.5) {
        OrganismKind::Herbivore
    } else {
        OrganismKind::Carnivore
    };
    let name = unique_name(world, rng);
    let size = rng.gen_range(SPAWN_SIZE_RANGE);
    let id = Uuid::from_u128(rng.gen::<u128>());
    Organism::with_id(id, name, kind, size)
}

/// Generates a wild cell and appends it to the world.
pub fn spawn_organism<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Organism {
    let organism = random_organism(world, rng);
    tracing::debug!(name = %organism.name, size = organism.size, kind = organism.kind.tag(), "Spawned organism");
    world.organisms.push(organism.clone());
    organism
}

/// Builds a cluster named from the pool with a power suffix in `[1, 100)`,
/// seeds it with 2 to 5 fresh cells and appends it. Returns its index.
pub fn spawn_cluster<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Result<usize> {
    let name = format!(
        "{}{}",
        pick(&CLUSTER_NAMES, rng),
        rng.gen_range(CLUSTER_POWER_RANGE)
    );
    let mut cluster = Cluster::new(name);
    cluster.id = Uuid::from_u128(rng.gen::<u128>());
    let seeds = rng.gen_range(CLUSTER_SEED_RANGE);
    for _ in 0..seeds {
        let member = spawn_organism(world, rng);
        cluster.add_member(member.id)?;
    }
    tracing::debug!(name = %cluster.name, members = cluster.members.len(), "Spawned cluster");
    world.clusters.push(cluster);
    Ok(world.clusters.len() - 1)
}
