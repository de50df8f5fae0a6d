//! Evolution thresholds and transformation.

use crate::cluster::power;
use evolve_data::{Organism, OrganismId, OrganismKind, World};
use rand::Rng;

/// Minimum size before an organism may evolve.
pub const EVOLUTION_MIN_SIZE: u32 = 15;
/// The containing cluster's power must exceed this.
pub const EVOLUTION_MIN_POWER: u64 = 50;

const ALIEN_STAT_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// True when `id` sits in a cluster of power above 50 and has reached size 15.
#[must_use]
pub fn can_evolve(world: &World, id: &OrganismId) -> bool {
    let Some(organism) = world.organism(id) else {
        return false;
    };
    match world.cluster_of(id) {
        Some(cluster) => {
            organism.size >= EVOLUTION_MIN_SIZE && power(&cluster.name) > EVOLUTION_MIN_POWER
        }
        None => false,
    }
}

/// Builds the evolved form of `organism`: Alderbrook or AlienDidi with equal
/// odds. Id, name and size carry over.
pub fn evolve<R: Rng + ?Sized>(organism: &Organism, rng: &mut R) -> Organism {
    let kind = if rng.gen_bool(0.5) {
        OrganismKind::Alderbrook
    } else {
        OrganismKind::AlienDidi {
            speed: rng.gen_range(ALIEN_STAT_RANGE),
            attack: rng.gen_range(ALIEN_STAT_RANGE),
        }
    };
    Organism::with_id(organism.id, organism.name.clone(), kind, organism.size)
}

/// Replaces the organism's slot with its evolved form. Since the id is kept,
/// the player handle and cluster memberships stay valid.
pub fn evolve_in_place<R: Rng + ?Sized>(
    world: &mut World,
    id: &OrganismId,
    rng: &mut R,
) -> Option<Organism> {
    let idx = world.index_of(id)?;
    let evolved = evolve(&world.organisms[idx], rng);
    tracing::info!(
        name = %evolved.name,
        kind = evolved.kind.tag(),
        size = evolved.size,
        "Organism evolved"
    );
    world.organisms[idx] = evolved.clone();
    Some(evolved)
}

/// Evolves the player if the one-shot flag is still clear and thresholds are
/// met. Shared by the automatic turn check and the manual command.
pub fn try_evolve_player<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Option<Organism> {
    if world.has_evolved {
        return None;
    }
    let id = world.player?;
    if !can_evolve(world, &id) {
        return None;
    }
    let evolved = evolve_in_place(world, &id, rng)?;
    world.has_evolved = true;
    Some(evolved)
}
