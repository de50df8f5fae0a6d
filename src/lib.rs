//! Console front end and session plumbing for the Evolve simulation.
//!
//! The rules live in `evolve_core`, storage in `evolve_io`; this crate wires
//! them to commands.

pub mod app;
pub mod ui;

pub use app::{Command, Narration, Session, Tone};
