//! Core data structures for the Evolve simulation.
//!
//! Everything here is plain, serializable state. Behaviour (eating,
//! membership rules, evolution, turn resolution) lives in `evolve_core`.

pub mod cluster;
pub mod organism;
pub mod world;

pub use cluster::{Cluster, ClusterId};
pub use organism::{FoodType, Organism, OrganismId, OrganismKind};
pub use world::World;
