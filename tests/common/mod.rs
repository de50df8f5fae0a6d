pub mod macros;

use evolve_core::cluster::ClusterLogic;
use evolve_data::{Cluster, Organism, OrganismId, OrganismKind, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

#[allow(dead_code)]
pub struct WorldBuilder {
    world: World,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            world: World::new(),
        }
    }

    pub fn with_player(mut self, kind: OrganismKind, name: &str, size: u32) -> Self {
        let id = self.world.create_initial_player(kind, name);
        self.world
            .organism_mut(&id)
            .expect("player just created")
            .size = size;
        self
    }

    pub fn with_organism(mut self, name: &str, kind: OrganismKind, size: u32) -> Self {
        self.world.organisms.push(Organism::new(name, kind, size));
        self
    }

    /// Adds a cluster whose members are looked up by organism name.
    pub fn with_cluster(mut self, name: &str, members: &[&str]) -> Self {
        let mut cluster = Cluster::new(name);
        for member in members {
            let id = id_of(&self.world, member);
            cluster.add_member(id).expect("valid member id");
        }
        self.world.clusters.push(cluster);
        self
    }

    pub fn with_evolved_flag(mut self) -> Self {
        self.world.has_evolved = true;
        self
    }

    pub fn build(self) -> World {
        self.world
    }
}

#[allow(dead_code)]
pub fn id_of(world: &World, name: &str) -> OrganismId {
    world
        .organisms
        .iter()
        .find(|o| o.name == name)
        .map(|o| o.id)
        .unwrap_or_else(|| panic!("no organism named {name}"))
}

#[allow(dead_code)]
pub fn player_id(world: &World) -> OrganismId {
    world.player.expect("world has a player")
}

/// Converts a roll in `[0, 1)` into the `u64` that `Rng::gen::<f64>()` maps
/// back onto it.
#[allow(dead_code)]
pub fn roll(r: f64) -> u64 {
    ((r * (1u64 << 53) as f64) as u64) << 11
}

/// `u64` draws that make `gen_bool(0.5)` return true and false respectively.
#[allow(dead_code)]
pub const COIN_TRUE: u64 = 0;
#[allow(dead_code)]
pub const COIN_FALSE: u64 = u64::MAX;

/// Serves scripted `u64` draws first, then falls back to a seeded generator.
/// `u32` draws always come from the fallback.
#[allow(dead_code)]
pub struct ScriptedRng {
    script: VecDeque<u64>,
    fallback: ChaCha8Rng,
}

#[allow(dead_code)]
impl ScriptedRng {
    pub fn new(script: &[u64]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            fallback: ChaCha8Rng::seed_from_u64(0xC0FFEE),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.fallback.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.next_u64())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fallback.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fallback.try_fill_bytes(dest)
    }
}
