//! SQLite store.
//!
//! Layout: `cells`, `clusters`, `cluster_members` and a small `save_meta`
//! key/value table. The player has no column of its own: its stored name
//! carries [`PLAYER_TAG`](crate::PLAYER_TAG), stripped again on load.

use crate::error::{IoError, Result};
use crate::{fallback_player, WorldStore, PLAYER_TAG};
use evolve_data::{Cluster, Organism, OrganismId, OrganismKind, World};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

/// Bumped whenever the table layout changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

pub struct SqliteStore {
    conn: Connection,
}

struct CellRow {
    id: Uuid,
    name: String,
    size: u32,
    kind: String,
    speed: Option<u32>,
    attack: Option<u32>,
}

impl CellRow {
    fn into_organism(self) -> Result<Organism> {
        let kind = OrganismKind::from_tag(&self.kind, self.speed, self.attack).ok_or_else(|| {
            IoError::persistence(format!(
                "unknown organism kind '{}' for cell {}",
                self.kind, self.id
            ))
        })?;
        if self.size == 0 {
            return Err(IoError::persistence(format!(
                "cell {} has size 0",
                self.id
            )));
        }
        Ok(Organism::with_id(self.id, self.name, kind, self.size))
    }
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            IoError::from(e).with_context(format!("opening {}", path.display()))
        })?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}

impl WorldStore for SqliteStore {
    fn save(&mut self, world: &World) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM cluster_members;
             DELETE FROM clusters;
             DELETE FROM cells;
             DELETE FROM save_meta;",
        )?;

        {
            let mut insert_cell = tx.prepare(
                "INSERT INTO cells (id, name, size, kind, speed, attack, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, organism) in world.organisms.iter().enumerate() {
                let name = if world.is_player(&organism.id) {
                    format!("{PLAYER_TAG}{}", organism.name)
                } else {
                    organism.name.clone()
                };
                let (speed, attack) = match organism.kind {
                    OrganismKind::AlienDidi { speed, attack } => (Some(speed), Some(attack)),
                    _ => (None, None),
                };
                insert_cell.execute(params![
                    organism.id,
                    name,
                    organism.size,
                    organism.kind.tag(),
                    speed,
                    attack,
                    position as i64
                ])?;
            }

            let mut insert_cluster =
                tx.prepare("INSERT INTO clusters (id, name, position) VALUES (?1, ?2, ?3)")?;
            let mut insert_member = tx.prepare(
                "INSERT INTO cluster_members (cluster_id, cell_id, position) VALUES (?1, ?2, ?3)",
            )?;
            for (position, cluster) in world.clusters.iter().enumerate() {
                insert_cluster.execute(params![cluster.id, cluster.name, position as i64])?;
                for (member_pos, member) in cluster.members.iter().enumerate() {
                    insert_member.execute(params![cluster.id, member, member_pos as i64])?;
                }
            }

            let mut insert_meta =
                tx.prepare("INSERT INTO save_meta (key, value) VALUES (?1, ?2)")?;
            insert_meta.execute(params!["format_version", FORMAT_VERSION.to_string()])?;
            insert_meta.execute(params!["saved_at", chrono::Utc::now().to_rfc3339()])?;
        }

        tx.commit()?;
        tracing::info!(
            cells = world.organisms.len(),
            clusters = world.clusters.len(),
            "World saved to database"
        );
        Ok(())
    }

    fn load(&mut self) -> Result<World> {
        if let Some(version) = self.meta("format_version")? {
            let version: u32 = version
                .parse()
                .map_err(|_| IoError::persistence(format!("bad format version '{version}'")))?;
            if version > FORMAT_VERSION {
                return Err(IoError::persistence(format!(
                    "save format {version} is newer than supported version {FORMAT_VERSION}"
                )));
            }
        }

        let mut organisms = {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, size, kind, speed, attack FROM cells ORDER BY position",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(CellRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    size: row.get(2)?,
                    kind: row.get(3)?,
                    speed: row.get(4)?,
                    attack: row.get(5)?,
                })
            })?;
            let mut organisms = Vec::new();
            for row in rows {
                organisms.push(row?.into_organism()?);
            }
            organisms
        };

        let player = untag_player(&mut organisms);

        let mut clusters = Vec::new();
        {
            let mut stmt = self
                .conn
                .prepare("SELECT id, name FROM clusters ORDER BY position")?;
            let mut members_stmt = self.conn.prepare(
                "SELECT cell_id FROM cluster_members WHERE cluster_id = ?1 ORDER BY position",
            )?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, Uuid>(0)?, row.get::<_, String>(1)?)))?;
            for row in rows {
                let (id, name) = row?;
                let members = members_stmt
                    .query_map(params![id], |row| row.get::<_, OrganismId>(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if let Some(missing) = members
                    .iter()
                    .find(|m| !organisms.iter().any(|o| &o.id == *m))
                {
                    return Err(IoError::persistence(format!(
                        "cluster {name} lists unknown cell {missing}"
                    )));
                }
                clusters.push(Cluster { id, name, members });
            }
        }

        let has_evolved = player
            .and_then(|id| organisms.iter().find(|o| o.id == id))
            .is_some_and(|o| o.kind.is_evolved());

        tracing::info!(
            cells = organisms.len(),
            clusters = clusters.len(),
            "World loaded from database"
        );
        Ok(World {
            organisms,
            clusters,
            player,
            has_evolved,
        })
    }

    fn saved_at(&mut self) -> Result<Option<String>> {
        self.meta("saved_at")
    }
}

impl SqliteStore {
    fn meta(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM save_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

/// Finds the tagged player, strips the tag and returns its id. Without a tag
/// the first cell becomes the player; an empty list has none.
pub(crate) fn untag_player(organisms: &mut [Organism]) -> Option<OrganismId> {
    if let Some(player) = organisms
        .iter_mut()
        .find(|o| o.name.starts_with(PLAYER_TAG))
    {
        player.name = player.name[PLAYER_TAG.len()..].to_string();
        tracing::info!(name = %player.name, "Player cell restored");
        return Some(player.id);
    }
    fallback_player(organisms)
}

fn init_db(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS cells (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            size INTEGER NOT NULL,
            kind TEXT NOT NULL,
            speed INTEGER,
            attack INTEGER,
            position INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS clusters (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            position INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cluster_members (
            cluster_id BLOB NOT NULL,
            cell_id BLOB NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (cluster_id, cell_id),
            FOREIGN KEY(cluster_id) REFERENCES clusters(id),
            FOREIGN KEY(cell_id) REFERENCES cells(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS save_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_members_cluster ON cluster_members(cluster_id)",
        [],
    )?;

    Ok(())
}
