//! # Evolve Core
//!
//! The turn resolution and creature lifecycle engine.
//!
//! This crate contains the deterministic game logic, including:
//! - Eating rules for every organism kind
//! - Cluster membership and the name-encoded power value
//! - Evolution thresholds and the evolved kinds
//! - The probabilistic turn resolver
//!
//! All randomness is taken from a caller-supplied generator, so a seeded
//! `ChaCha8Rng` reproduces a whole session.
//!
//! ## Example
//!
//! ```
//! use evolve_core::turn::advance_turn;
//! use evolve_data::{OrganismKind, World};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut world = World::new();
//! world.create_initial_player(OrganismKind::Omnivore, "Bobby");
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let events = advance_turn(&mut world, &mut rng).unwrap();
//! assert!(!events.is_empty());
//! ```

/// Cluster membership and power
pub mod cluster;
/// Session configuration (seed, storage, logging)
pub mod config;
/// Eating rules per organism kind
pub mod diet;
/// Error taxonomy for game rules
pub mod error;
/// Evolution thresholds and transformation
pub mod evolution;
/// Tracing subscriber setup
pub mod logging;
/// Random organism and cluster generation
pub mod spawn;
/// Summary statistics for display
pub mod stats;
/// The per-turn action selector
pub mod turn;

pub use cluster::{power, ClusterLogic};
pub use diet::DietLogic;
pub use error::{LifeError, Result};
pub use logging::init_logging;
pub use turn::{advance_turn, TurnEvent};
