//! Error types for the game rules.

use evolve_data::FoodType;
use thiserror::Error;

/// Failures of the eating and membership contracts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// The food kind does not match the organism's diet.
    #[error("{name} can only eat {accepted}")]
    WrongDiet {
        name: String,
        offered: FoodType,
        accepted: FoodType,
    },

    /// The organism's kind cannot consume other organisms.
    #[error("{name} cannot eat other creatures")]
    CannotEatOrganisms { name: String },

    /// The organism is not strictly larger than its target.
    #[error("{name} is not large enough to eat {target}")]
    TooSmall { name: String, target: String },

    /// A required entity reference was unset.
    #[error("missing required argument: {0}")]
    NilArgument(&'static str),
}

/// Result type alias for rule operations.
pub type Result<T> = std::result::Result<T, LifeError>;
