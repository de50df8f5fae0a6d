use crate::app::command::Command;
use evolve_core::evolution::{can_evolve, try_evolve_player, EVOLUTION_MIN_POWER, EVOLUTION_MIN_SIZE};
use evolve_core::stats::WorldStats;
use evolve_core::turn::{advance_turn, TurnEvent};
use evolve_data::World;
use evolve_io::WorldStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub text: String,
    pub tone: Tone,
}

impl Narration {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Warning,
        }
    }
}

impl From<&TurnEvent> for Narration {
    fn from(event: &TurnEvent) -> Self {
        let tone = match event {
            TurnEvent::Evolved { .. } | TurnEvent::Ate { .. } | TurnEvent::Foraged { .. } => {
                Tone::Success
            }
            TurnEvent::NoPlayer
            | TurnEvent::CannotHunt { .. }
            | TurnEvent::HuntFailed { .. }
            | TurnEvent::ForageSkipped { .. }
            | TurnEvent::DietRejected { .. } => Tone::Warning,
            _ => Tone::Info,
        };
        Self {
            text: event.to_string(),
            tone,
        }
    }
}

/// One running game: the world, its random source and where it is saved.
///
/// Commands resolve one at a time; each returns the lines to show.
pub struct Session<S: WorldStore> {
    pub world: World,
    pub store: S,
    pub turn: u64,
    pub running: bool,
    rng: ChaCha8Rng,
}

impl<S: WorldStore> Session<S> {
    pub fn new(store: S, seed: Option<u64>) -> Self {
        Self::with_world(World::new(), store, seed)
    }

    pub fn with_world(world: World, store: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            world,
            store,
            turn: 0,
            running: true,
            rng,
        }
    }

    pub fn handle(&mut self, command: Command) -> Vec<Narration> {
        match command {
            Command::CreateInitialPlayer { kind, name } => self.create_player(kind, name),
            Command::AdvanceTurn => self.advance(),
            Command::ShowStats => self.stats(),
            Command::Evolve => self.evolve(),
            Command::SaveWorld => self.save(),
            Command::LoadWorld => self.load(),
            Command::Quit => {
                self.running = false;
                vec![Narration::info("Goodbye.")]
            }
        }
    }

    fn create_player(&mut self, kind: evolve_data::OrganismKind, name: String) -> Vec<Narration> {
        let name = name.trim();
        if name.is_empty() {
            return vec![Narration::warning("Your cell needs a name.")];
        }
        if self.world.player().is_some() {
            return vec![Narration::warning("A player cell already exists.")];
        }
        self.world.create_initial_player(kind, name);
        tracing::info!(%name, kind = kind.tag(), "Player created");
        vec![Narration::success(format!(
            "Created {kind}: '{name}'. Your cell starts at size {}.",
            evolve_data::organism::PLAYER_START_SIZE
        ))]
    }

    fn advance(&mut self) -> Vec<Narration> {
        match advance_turn(&mut self.world, &mut self.rng) {
            Ok(events) => {
                if !matches!(events.as_slice(), [TurnEvent::NoPlayer]) {
                    self.turn += 1;
                }
                events.iter().map(Narration::from).collect()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Turn aborted");
                vec![Narration::warning(format!("The turn could not be resolved: {e}"))]
            }
        }
    }

    fn stats(&self) -> Vec<Narration> {
        let mut lines = vec![Narration::info(format!("Turn: {}", self.turn))];
        lines.extend(
            WorldStats::collect(&self.world)
                .lines()
                .into_iter()
                .map(Narration::info),
        );
        lines
    }

    fn evolve(&mut self) -> Vec<Narration> {
        if self.world.has_evolved {
            return vec![Narration::warning(
                "Your cell has already evolved this session.",
            )];
        }
        let Some(player_id) = self.world.player else {
            return vec![Narration::from(&TurnEvent::NoPlayer)];
        };
        if !can_evolve(&self.world, &player_id) {
            return vec![Narration::warning(format!(
                "Cannot evolve yet. Reach size {EVOLUTION_MIN_SIZE} inside a cluster with power above {EVOLUTION_MIN_POWER}."
            ))];
        }
        match try_evolve_player(&mut self.world, &mut self.rng) {
            Some(evolved) => vec![Narration::from(&TurnEvent::Evolved {
                name: evolved.name,
                kind: evolved.kind,
                size: evolved.size,
            })],
            None => vec![Narration::warning("Evolution failed.")],
        }
    }

    /// The in-memory world is only read here, so a failed save leaves it as is.
    fn save(&mut self) -> Vec<Narration> {
        match self.store.save(&self.world) {
            Ok(()) => vec![Narration::success("World saved.")],
            Err(e) => {
                tracing::warn!(error = %e, "Save failed");
                vec![Narration::warning(format!("Save failed: {e}"))]
            }
        }
    }

    /// Replaces the world only with a complete, non-empty load result.
    fn load(&mut self) -> Vec<Narration> {
        let world = match self.store.load() {
            Ok(world) => world,
            Err(e) => {
                tracing::warn!(error = %e, "Load failed");
                return vec![Narration::warning(format!("Load failed: {e}"))];
            }
        };
        if world.organisms.is_empty() {
            return vec![Narration::warning(
                "No saved world found. Keeping the current one.",
            )];
        }

        self.world = world;
        let mut lines = vec![match self.store.saved_at() {
            Ok(Some(at)) => Narration::success(format!("World loaded (saved {at}).")),
            _ => Narration::success("World loaded."),
        }];
        match self.world.player() {
            Some(player) => lines.push(Narration::info(format!(
                "Player cell '{}' restored.",
                player.name
            ))),
            None => lines.push(Narration::warning("The saved world has no player cell.")),
        }
        lines
    }
}
