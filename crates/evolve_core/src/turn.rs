//! Turn resolution.
//!
//! One call resolves exactly one turn. The evolution check runs first and is
//! not random; otherwise a single roll in `[0, 1)` falls into one of four
//! cumulative bands. Predation without a target falls through to migration
//! within the same turn.

use crate::cluster::{move_into, power};
use crate::diet::DietLogic;
use crate::error::{LifeError, Result};
use crate::evolution::try_evolve_player;
use crate::spawn::{spawn_cluster, spawn_organism};
use evolve_data::{FoodType, OrganismId, OrganismKind, World};
use rand::Rng;
use std::fmt;

/// Upper edge of the spawn band.
pub const SPAWN_BAND: f64 = 0.30;
/// Upper edge of the predation band.
pub const PREDATION_BAND: f64 = 0.60;
/// Upper edge of the foraging band. Everything above migrates.
pub const FORAGE_BAND: f64 = 0.85;

const PLANT_BONUS_RANGE: std::ops::Range<u32> = 1..6;

/// The action class picked by the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Spawn,
    Predation,
    Forage,
    Migrate,
}

/// Maps a roll to its band. Rolls outside `[0, 1)` select nothing.
#[must_use]
pub fn select_action(roll: f64) -> Option<TurnAction> {
    if !(0.0..1.0).contains(&roll) {
        return None;
    }
    Some(if roll < SPAWN_BAND {
        TurnAction::Spawn
    } else if roll < PREDATION_BAND {
        TurnAction::Predation
    } else if roll < FORAGE_BAND {
        TurnAction::Forage
    } else {
        TurnAction::Migrate
    })
}

/// Something that happened during a turn, rendered for the player via
/// `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    NoPlayer,
    Evolved {
        name: String,
        kind: OrganismKind,
        size: u32,
    },
    Spawned {
        name: String,
        kind: OrganismKind,
        size: u32,
    },
    Ate {
        predator: String,
        prey: String,
        gained: u32,
        new_size: u32,
    },
    CannotHunt {
        name: String,
        prey: String,
    },
    HuntFailed {
        prey: String,
        reason: LifeError,
    },
    Foraged {
        name: String,
        food: FoodType,
        bonus: Option<u32>,
        new_size: u32,
    },
    ForageSkipped {
        name: String,
        food: FoodType,
    },
    DietRejected {
        food: FoodType,
        bonus: Option<u32>,
        reason: LifeError,
    },
    ClusterFormed {
        cluster: String,
        members: usize,
    },
    JoinedCluster {
        name: String,
        cluster: String,
        power: u64,
        left: Option<String>,
    },
    Idle {
        name: String,
    },
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnEvent::NoPlayer => write!(f, "There is no player cell. Create one first."),
            TurnEvent::Evolved { name, kind, size } => {
                write!(f, "{name} has evolved into {kind} at size {size}!")
            }
            TurnEvent::Spawned { name, kind, size } => {
                write!(f, "A new {kind} named {name} (size {size}) appeared.")
            }
            TurnEvent::Ate {
                predator,
                prey,
                gained,
                new_size,
            } => write!(
                f,
                "{predator} ate {prey} and gained {gained} size! (now {new_size})"
            ),
            TurnEvent::CannotHunt { name, prey } => {
                write!(f, "{name} encountered {prey} but cannot eat other creatures.")
            }
            TurnEvent::HuntFailed { prey, reason } => {
                write!(f, "The hunt for {prey} failed: {reason}.")
            }
            TurnEvent::Foraged {
                name,
                food,
                bonus,
                new_size,
            } => match bonus {
                Some(bonus) => write!(
                    f,
                    "{name} found {food} (+{bonus} bonus) and grew to size {new_size}."
                ),
                None => write!(f, "{name} found {food} and is now size {new_size}."),
            },
            TurnEvent::ForageSkipped { name, food } => {
                write!(f, "{name} found {food} but cannot eat that.")
            }
            TurnEvent::DietRejected {
                food,
                bonus,
                reason,
            } => match bonus {
                Some(bonus) => write!(f, "Found {food} (+{bonus} bonus), but {reason}."),
                None => write!(f, "Found {food}, but {reason}."),
            },
            TurnEvent::ClusterFormed { cluster, members } => {
                write!(f, "A new cluster {cluster} formed with {members} cells.")
            }
            TurnEvent::JoinedCluster {
                name,
                cluster,
                power,
                left: Some(left),
            } => write!(f, "{name} left {left} and joined {cluster} (power {power})."),
            TurnEvent::JoinedCluster {
                name,
                cluster,
                power,
                left: None,
            } => write!(f, "{name} joined {cluster} (power {power})."),
            TurnEvent::Idle { name } => write!(f, "{name} drifts idly. Nothing happens."),
        }
    }
}

/// Resolves one turn for the player and returns what happened.
///
/// Eating failures never escape: they become events. The only error is a
/// broken membership contract.
pub fn advance_turn<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Result<Vec<TurnEvent>> {
    let Some(player_id) = world.player.filter(|id| world.organism(id).is_some()) else {
        return Ok(vec![TurnEvent::NoPlayer]);
    };

    if let Some(evolved) = try_evolve_player(world, rng) {
        return Ok(vec![TurnEvent::Evolved {
            name: evolved.name,
            kind: evolved.kind,
            size: evolved.size,
        }]);
    }

    let roll: f64 = rng.gen();
    let action = select_action(roll);
    tracing::debug!(roll, ?action, "Turn roll");

    let events = match action {
        Some(TurnAction::Spawn) => vec![spawn(world, rng)],
        Some(TurnAction::Predation) => match hunt(world, player_id) {
            Some(event) => vec![event],
            None => migrate(world, player_id, rng)?,
        },
        Some(TurnAction::Forage) => vec![forage(world, player_id, rng)],
        Some(TurnAction::Migrate) => migrate(world, player_id, rng)?,
        None => vec![TurnEvent::Idle {
            name: player_name(world, &player_id),
        }],
    };
    Ok(events)
}

fn player_name(world: &World, id: &OrganismId) -> String {
    world
        .organism(id)
        .map(|o| o.name.clone())
        .unwrap_or_default()
}

fn spawn<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> TurnEvent {
    let organism = spawn_organism(world, rng);
    TurnEvent::Spawned {
        name: organism.name,
        kind: organism.kind,
        size: organism.size,
    }
}

/// Largest organism strictly smaller than the player; the first one wins ties.
#[must_use]
pub fn predation_target(world: &World, player_id: &OrganismId) -> Option<OrganismId> {
    let player_size = world.organism(player_id)?.size;
    world
        .organisms
        .iter()
        .filter(|o| &o.id != player_id && o.size < player_size)
        .fold(None::<&evolve_data::Organism>, |best, o| match best {
            Some(b) if b.size >= o.size => Some(b),
            _ => Some(o),
        })
        .map(|o| o.id)
}

/// Returns `None` when there is nothing to hunt.
fn hunt(world: &mut World, player_id: OrganismId) -> Option<TurnEvent> {
    let target_id = predation_target(world, &player_id)?;
    let prey = world.organism(&target_id)?.clone();
    let player = world.organism_mut(&player_id)?;

    if !player.can_eat_organisms() {
        return Some(TurnEvent::CannotHunt {
            name: player.name.clone(),
            prey: prey.name,
        });
    }

    match player.eat_organism(&prey) {
        Ok(new_size) => {
            let predator = player.name.clone();
            world.remove_organism(&prey.id);
            tracing::debug!(%predator, prey = %prey.name, new_size, "Predation");
            Some(TurnEvent::Ate {
                predator,
                prey: prey.name,
                gained: prey.size,
                new_size,
            })
        }
        Err(reason) => Some(TurnEvent::HuntFailed {
            prey: prey.name,
            reason,
        }),
    }
}

fn forage<R: Rng + ?Sized>(world: &mut World, player_id: OrganismId, rng: &mut R) -> TurnEvent {
    let food = if rng.gen_bool(0.5) {
        FoodType::Plant
    } else {
        FoodType::Meat
    };
    let bonus = match food {
        FoodType::Plant => Some(rng.gen_range(PLANT_BONUS_RANGE)),
        FoodType::Meat => None,
    };

    let Some(player) = world.organism_mut(&player_id) else {
        return TurnEvent::NoPlayer;
    };

    if player.kind == OrganismKind::Herbivore && food == FoodType::Meat {
        return TurnEvent::ForageSkipped {
            name: player.name.clone(),
            food,
        };
    }

    if let Some(bonus) = bonus {
        player.size = player.size.saturating_add(bonus);
    }
    match player.eat_food(food) {
        Ok(new_size) => TurnEvent::Foraged {
            name: player.name.clone(),
            food,
            bonus,
            new_size,
        },
        Err(reason) => TurnEvent::DietRejected {
            food,
            bonus,
            reason,
        },
    }
}

fn migrate<R: Rng + ?Sized>(
    world: &mut World,
    player_id: OrganismId,
    rng: &mut R,
) -> Result<Vec<TurnEvent>> {
    let mut events = Vec::new();
    let current_power = world
        .cluster_of(&player_id)
        .map(|c| power(&c.name))
        .unwrap_or(0);

    let stronger = world
        .clusters
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.contains(&player_id))
        .map(|(idx, c)| (idx, power(&c.name)))
        .filter(|(_, p)| *p > current_power)
        .fold(None::<(usize, u64)>, |best, (idx, p)| match best {
            Some((_, best_power)) if best_power >= p => best,
            _ => Some((idx, p)),
        });

    let target = match stronger {
        Some((idx, _)) => idx,
        None => {
            let idx = spawn_cluster(world, rng)?;
            let cluster = &world.clusters[idx];
            events.push(TurnEvent::ClusterFormed {
                cluster: cluster.name.clone(),
                members: cluster.members.len(),
            });
            idx
        }
    };

    let left = world.cluster_of(&player_id).map(|c| c.name.clone());
    move_into(world, player_id, target)?;
    let cluster = &world.clusters[target];
    events.push(TurnEvent::JoinedCluster {
        name: player_name(world, &player_id),
        cluster: cluster.name.clone(),
        power: power(&cluster.name),
        left,
    });
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolve_data::Organism;

    #[test]
    fn test_select_action_bands() {
        assert_eq!(select_action(0.0), Some(TurnAction::Spawn));
        assert_eq!(select_action(0.29), Some(TurnAction::Spawn));
        assert_eq!(select_action(0.30), Some(TurnAction::Predation));
        assert_eq!(select_action(0.59), Some(TurnAction::Predation));
        assert_eq!(select_action(0.60), Some(TurnAction::Forage));
        assert_eq!(select_action(0.849), Some(TurnAction::Forage));
        assert_eq!(select_action(0.85), Some(TurnAction::Migrate));
        assert_eq!(select_action(0.999), Some(TurnAction::Migrate));
        assert_eq!(select_action(1.0), None);
        assert_eq!(select_action(f64::NAN), None);
    }

    #[test]
    fn test_predation_target_first_largest() {
        let mut world = World::new();
        let pid = world.create_initial_player(OrganismKind::Carnivore, "Bobby");
        world.organism_mut(&pid).unwrap().size = 6;
        let a = Organism::new("A", OrganismKind::Herbivore, 4);
        let b = Organism::new("B", OrganismKind::Herbivore, 5);
        let c = Organism::new("C", OrganismKind::Herbivore, 5);
        let d = Organism::new("D", OrganismKind::Herbivore, 6);
        let b_id = b.id;
        world.organisms.extend([a, b, c, d]);
        assert_eq!(predation_target(&world, &pid), Some(b_id));
    }

    #[test]
    fn test_event_display() {
        let event = TurnEvent::ForageSkipped {
            name: "Leaf".into(),
            food: FoodType::Meat,
        };
        assert_eq!(event.to_string(), "Leaf found meat but cannot eat that.");
    }
}
