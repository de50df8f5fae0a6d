//! # Evolve IO
//!
//! Persistence layer for the Evolve simulation.
//!
//! This crate provides:
//! - Structured error handling for store failures
//! - The `WorldStore` abstraction used by the session
//! - A SQLite store with a relational layout
//! - A versioned JSON snapshot store

/// Error types and result aliases for persistence
pub mod error;
/// Versioned JSON snapshot files
pub mod persistence;
/// SQLite-backed relational store
pub mod storage;

pub use error::{IoError, Result};
pub use persistence::JsonStore;
pub use storage::SqliteStore;

use evolve_data::{Organism, OrganismId, World};

/// Name prefix marking the player cell in stores without a player column.
pub const PLAYER_TAG: &str = "__PLAYER__";

/// Player for a save that does not name one: the first cell in store order,
/// or nobody when there are no cells.
pub(crate) fn fallback_player(organisms: &[Organism]) -> Option<OrganismId> {
    let first = organisms.first().map(|o| o.id);
    if first.is_some() {
        tracing::warn!("No player cell found in save data, defaulting to first cell");
    }
    first
}

/// A durable home for a whole world.
///
/// `save` replaces everything previously stored; it never merges. A failed
/// save or load must not leave a partial result behind.
pub trait WorldStore {
    fn save(&mut self, world: &World) -> Result<()>;

    /// Loads the stored world. An empty store yields an empty world.
    fn load(&mut self) -> Result<World>;

    /// Timestamp of the last successful save, if the store records one.
    fn saved_at(&mut self) -> Result<Option<String>>;
}

impl<S: WorldStore + ?Sized> WorldStore for Box<S> {
    fn save(&mut self, world: &World) -> Result<()> {
        (**self).save(world)
    }

    fn load(&mut self) -> Result<World> {
        (**self).load()
    }

    fn saved_at(&mut self) -> Result<Option<String>> {
        (**self).saved_at()
    }
}
