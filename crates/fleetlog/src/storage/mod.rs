//! Storage layer for fleetlog.
//!
//! This module provides `SQLite`-backed key-value storage. The fleet is kept
//! in two named slots, each holding one whole collection as a JSON array;
//! every write replaces the slot in full.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A named slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The vehicle collection.
    Vehicles,
    /// The intervention collection.
    Interventions,
}

impl Slot {
    /// Every slot, in a stable order.
    pub const ALL: [Slot; 2] = [Slot::Vehicles, Slot::Interventions];

    /// The key the slot is stored under.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Interventions => "interventions",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Persistence seam for the fleet repository.
///
/// Implementors hold raw slot payloads. An absent slot is reported as
/// `None`, which callers treat exactly like an empty collection.
pub trait SlotStore {
    /// Read the raw payload of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn read_slot(&self, slot: Slot) -> Result<Option<String>>;

    /// Replace the payload of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn write_slot(&self, slot: Slot, payload: &str) -> Result<()>;

    /// Delete the given slots together, returning how many existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written. No slot
    /// is deleted in that case.
    fn clear_slots(&self, slots: &[Slot]) -> Result<usize>;
}

/// `SQLite` storage engine.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        debug!("Database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let mut slots = Vec::with_capacity(Slot::ALL.len());
        for slot in Slot::ALL {
            let row: Option<(i64, String)> = self
                .conn
                .query_row(
                    "SELECT length(CAST(value AS BLOB)), updated_at FROM slots WHERE key = ?1",
                    [slot.key()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            slots.push(match row {
                Some((bytes, updated_at)) => SlotStats {
                    slot,
                    present: true,
                    payload_bytes: u64::try_from(bytes).unwrap_or(0),
                    updated_at: DateTime::parse_from_rfc3339(&updated_at)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc)),
                },
                None => SlotStats {
                    slot,
                    present: false,
                    payload_bytes: 0,
                    updated_at: None,
                },
            });
        }

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            schema_version: migrations::get_schema_version(&self.conn)?,
            slots,
            db_size_bytes,
        })
    }
}

impl SlotStore for Storage {
    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                [slot.key()],
                |row| row.get(0),
            )
            .optional()?;
        debug!(
            "Read slot {} ({})",
            slot,
            if payload.is_some() { "present" } else { "absent" }
        );
        Ok(payload)
    }

    fn write_slot(&self, slot: Slot, payload: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![slot.key(), payload, Utc::now().to_rfc3339()],
        )?;
        debug!("Wrote slot {} ({} bytes)", slot, payload.len());
        Ok(())
    }

    fn clear_slots(&self, slots: &[Slot]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        for slot in slots {
            removed += tx.execute("DELETE FROM slots WHERE key = ?1", [slot.key()])?;
        }
        tx.commit()?;

        if removed > 0 {
            info!("Cleared {} slot(s)", removed);
        } else {
            debug!("Clear requested but no slots were stored");
        }
        Ok(removed)
    }
}

/// Statistics about a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStats {
    /// Which slot.
    pub slot: Slot,
    /// Whether the slot is stored at all.
    pub present: bool,
    /// Size of the stored payload in bytes.
    pub payload_bytes: u64,
    /// When the slot was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Schema version recorded in the database.
    pub schema_version: i32,
    /// Per-slot statistics, in [`Slot::ALL`] order.
    pub slots: Vec<SlotStats>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
