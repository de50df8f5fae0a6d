//! Eating rules.
//!
//! Each kind decides what it may eat. The rules only change the eater's own
//! size; removing a consumed organism from the world is left to the caller.

use crate::error::{LifeError, Result};
use evolve_data::{FoodType, Organism, OrganismKind};

pub trait DietLogic {
    /// Consumes a food item and returns the new size.
    fn eat_food(&mut self, food: FoodType) -> Result<u32>;

    /// Consumes `other` and returns the new size. `other` is left untouched.
    fn eat_organism(&mut self, other: &Organism) -> Result<u32>;

    fn can_eat_organisms(&self) -> bool;
}

/// Whether a kind can hunt at all.
#[must_use]
pub fn kind_eats_organisms(kind: &OrganismKind) -> bool {
    !matches!(kind, OrganismKind::Herbivore)
}

impl DietLogic for Organism {
    fn eat_food(&mut self, food: FoodType) -> Result<u32> {
        let grows = match (self.kind, food) {
            (OrganismKind::Herbivore, FoodType::Plant) => true,
            (OrganismKind::Herbivore, FoodType::Meat) => {
                return Err(LifeError::WrongDiet {
                    name: self.name.clone(),
                    offered: food,
                    accepted: FoodType::Plant,
                })
            }
            (OrganismKind::Carnivore, FoodType::Meat) => true,
            (OrganismKind::Carnivore, FoodType::Plant) => {
                return Err(LifeError::WrongDiet {
                    name: self.name.clone(),
                    offered: food,
                    accepted: FoodType::Meat,
                })
            }
            (OrganismKind::Omnivore, _) => true,
            // Evolved kinds only grow on plants; meat is swallowed without effect.
            (OrganismKind::Alderbrook | OrganismKind::AlienDidi { .. }, FoodType::Plant) => true,
            (OrganismKind::Alderbrook | OrganismKind::AlienDidi { .. }, FoodType::Meat) => false,
        };
        if grows {
            self.size = self.size.saturating_add(1);
        }
        Ok(self.size)
    }

    fn eat_organism(&mut self, other: &Organism) -> Result<u32> {
        if !self.can_eat_organisms() {
            return Err(LifeError::CannotEatOrganisms {
                name: self.name.clone(),
            });
        }
        if self.size <= other.size {
            return Err(LifeError::TooSmall {
                name: self.name.clone(),
                target: other.name.clone(),
            });
        }
        self.size = self.size.saturating_add(other.size);
        Ok(self.size)
    }

    fn can_eat_organisms(&self) -> bool {
        kind_eats_organisms(&self.kind)
    }
}
