//! Versioned JSON snapshots.

use crate::error::{IoError, Result};
use crate::{fallback_player, WorldStore};
use evolve_data::World;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CURRENT_SAVE_VERSION: u32 = 1;

/// Borrowed view written on save, so the world is not cloned.
#[derive(Serialize)]
pub struct SaveStateRef<'a> {
    pub version: u32,
    pub saved_at: String,
    pub world: &'a World,
}

#[derive(Deserialize)]
pub struct SaveState {
    pub version: u32,
    #[serde(default)]
    pub saved_at: Option<String>,
    pub world: World,
}

/// Stores the world as one pretty-printed JSON file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<Option<SaveState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| IoError::from(e).with_context("Failed to read save file"))?;

        match serde_json::from_str::<SaveState>(&content) {
            Ok(state) if state.version > CURRENT_SAVE_VERSION => {
                Err(IoError::persistence(format!(
                    "Save file version {} is newer than supported version {}",
                    state.version, CURRENT_SAVE_VERSION
                )))
            }
            Ok(state) => Ok(Some(state)),
            Err(_) => {
                // Bare world without the version envelope.
                tracing::info!("Failed to load as versioned save, attempting legacy load...");
                let world: World = serde_json::from_str(&content).map_err(|e| {
                    IoError::from(e).with_context("Failed to deserialize save file")
                })?;
                Ok(Some(SaveState {
                    version: 0,
                    saved_at: None,
                    world,
                }))
            }
        }
    }
}

impl WorldStore for JsonStore {
    fn save(&mut self, world: &World) -> Result<()> {
        let state = SaveStateRef {
            version: CURRENT_SAVE_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            world,
        };
        let data = serde_json::to_string_pretty(&state)
            .map_err(|e| IoError::from(e).with_context("Failed to serialize save state"))?;

        // Write beside the target and rename, so a failed write keeps the old file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data)
            .map_err(|e| IoError::from(e).with_context("Failed to write save file"))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| IoError::from(e).with_context("Failed to replace save file"))?;

        tracing::info!(path = %self.path.display(), "World saved to snapshot");
        Ok(())
    }

    fn load(&mut self) -> Result<World> {
        let mut world = match self.read_state()? {
            Some(state) => state.world,
            None => World::default(),
        };
        match world.player {
            Some(id) if world.organism(&id).is_none() => {
                return Err(IoError::persistence(format!(
                    "player {id} is not among the saved cells"
                )));
            }
            Some(_) => {}
            None => world.player = fallback_player(&world.organisms),
        }
        tracing::info!(path = %self.path.display(), cells = world.organisms.len(), "World loaded from snapshot");
        Ok(world)
    }

    fn saved_at(&mut self) -> Result<Option<String>> {
        Ok(self.read_state()?.and_then(|s| s.saved_at))
    }
}
