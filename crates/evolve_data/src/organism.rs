use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable handle of an organism for its whole lifetime.
pub type OrganismId = Uuid;

/// Size every player-created cell starts with.
pub const PLAYER_START_SIZE: u32 = 3;

/// Food items found while foraging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Plant,
    Meat,
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodType::Plant => write!(f, "plants"),
            FoodType::Meat => write!(f, "meat"),
        }
    }
}

/// Closed set of organism kinds.
///
/// The first three are the base kinds a cell can be created as; `Alderbrook`
/// and `AlienDidi` only appear through evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganismKind {
    Herbivore,
    Carnivore,
    Omnivore,
    Alderbrook,
    AlienDidi { speed: u32, attack: u32 },
}

impl OrganismKind {
    /// Persistence discriminator.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            OrganismKind::Herbivore => "Herbivore",
            OrganismKind::Carnivore => "Carnivore",
            OrganismKind::Omnivore => "Omnivore",
            OrganismKind::Alderbrook => "Alderbrook",
            OrganismKind::AlienDidi { .. } => "AlienDidi",
        }
    }

    /// Rebuilds a kind from its discriminator. `AlienDidi` needs its two
    /// attributes; a missing attribute is treated as an unknown record.
    #[must_use]
    pub fn from_tag(tag: &str, speed: Option<u32>, attack: Option<u32>) -> Option<Self> {
        match tag {
            "Herbivore" => Some(OrganismKind::Herbivore),
            "Carnivore" => Some(OrganismKind::Carnivore),
            "Omnivore" => Some(OrganismKind::Omnivore),
            "Alderbrook" => Some(OrganismKind::Alderbrook),
            "AlienDidi" => Some(OrganismKind::AlienDidi {
                speed: speed?,
                attack: attack?,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_evolved(&self) -> bool {
        matches!(
            self,
            OrganismKind::Alderbrook | OrganismKind::AlienDidi { .. }
        )
    }

    /// Parses a user-supplied base kind name (case-insensitive).
    #[must_use]
    pub fn parse_base(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "herbivore" | "h" => Some(OrganismKind::Herbivore),
            "carnivore" | "c" => Some(OrganismKind::Carnivore),
            "omnivore" | "o" => Some(OrganismKind::Omnivore),
            _ => None,
        }
    }
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganismKind::AlienDidi { speed, attack } => {
                write!(f, "AlienDidi (speed {speed}, attack {attack})")
            }
            other => f.write_str(other.tag()),
        }
    }
}

/// A single growable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub name: String,
    pub size: u32,
    pub kind: OrganismKind,
}

impl Organism {
    /// Creates an organism with a fresh id. Sizes below 1 are raised to 1.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: OrganismKind, size: u32) -> Self {
        Self::with_id(Uuid::new_v4(), name, kind, size)
    }

    #[must_use]
    pub fn with_id(id: OrganismId, name: impl Into<String>, kind: OrganismKind, size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            size: size.max(1),
            kind,
        }
    }
}
