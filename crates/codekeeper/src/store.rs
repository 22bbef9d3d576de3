//! Persistence layer for codekeeper.
//!
//! This module provides `SQLite`-backed storage for the entry collection and
//! the display-mode preference. The database is used as a small key-value
//! store: one named slot holds the serialized entry collection, a second
//! holds the dark-mode flag. Writes are whole-slot replacements.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Slot holding the serialized entry collection.
const ENTRIES_SLOT: &str = "entries";

/// Slot holding the dark-mode preference.
const DARK_MODE_SLOT: &str = "dark_mode";

/// Key-value store backing the entry repository.
///
/// Each slot holds a JSON document; saving replaces the whole slot. There is
/// no migration versioning: a slot whose contents fail to parse is discarded
/// and treated as absent.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the slot table
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
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

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::init_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::init_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the entry collection.
    ///
    /// Returns an empty collection when no prior data exists. Malformed
    /// stored data is logged and discarded, never surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        let Some(raw) = self.read_slot(ENTRIES_SLOT)? else {
            debug!("No stored entries found");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => {
                debug!("Loaded {} entries", entries.len());
                Ok(entries)
            }
            Err(err) => {
                warn!("Discarding malformed entry data: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Save the full entry collection, replacing any prior snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.write_slot(ENTRIES_SLOT, &raw)?;
        debug!("Saved {} entries", entries.len());
        Ok(())
    }

    /// Load the dark-mode preference. Absent or malformed data reads as false.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read itself fails.
    pub fn load_dark_mode(&self) -> Result<bool> {
        let Some(raw) = self.read_slot(DARK_MODE_SLOT)? else {
            return Ok(false);
        };

        match serde_json::from_str::<bool>(&raw) {
            Ok(enabled) => Ok(enabled),
            Err(err) => {
                warn!("Discarding malformed dark-mode preference: {err}");
                Ok(false)
            }
        }
    }

    /// Save the dark-mode preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn save_dark_mode(&self, enabled: bool) -> Result<()> {
        self.write_slot(DARK_MODE_SLOT, if enabled { "true" } else { "false" })
    }

    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Overwrite a slot with raw text, bypassing serialization.
    ///
    /// Test helper for exercising malformed-data handling.
    #[cfg(test)]
    pub fn write_raw_slot(&self, key: &str, value: &str) -> Result<()> {
        self.write_slot(key, value)
    }
}
