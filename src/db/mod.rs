//! Note store backed by SQLite.
//!
//! The store holds a single collection, `notes`, inside the `hnote` database.
//! Records are addressed by their UUID and the only lookups are by id or a full scan.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

/// Name of the database file created in the data directory.
pub const DATABASE_NAME: &str = "hnote";

/// Name of the collection holding notes.
pub const COLLECTION_NAME: &str = "notes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("migration {version} failed: {source}")]
    Migration {
        version: &'static str,
        source: rusqlite::Error,
    },

    #[error("could not prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not determine data directory")]
    NoDataDir,

    #[error("database lock poisoned")]
    LockPoisoned,
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Location used when no database path is configured.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = directories::ProjectDirs::from("", "", DATABASE_NAME)
            .ok_or(StoreError::NoDataDir)?;
        Ok(dirs.data_dir().join(format!("{DATABASE_NAME}.db")))
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    // ============================================================
    // Note operations
    // ============================================================

    pub fn insert_note(&self, input: CreateNoteInput) -> Result<NoteRecord, StoreError> {
        let conn = self.lock()?;
        let now = Utc::now();
        let record = NoteRecord {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            create_date: now,
            last_edit_time: now,
        };

        conn.execute(
            "INSERT INTO notes (id, title, content, create_date, last_edit_time)
             VALUES (?, ?, ?, ?, ?)",
            (
                record.id.to_string(),
                &record.title,
                &record.content,
                format_datetime(record.create_date),
                format_datetime(record.last_edit_time),
            ),
        )?;

        Ok(record)
    }

    pub fn find_all_notes(&self) -> Result<Vec<NoteRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, content, create_date, last_edit_time
             FROM notes ORDER BY create_date, id",
        )?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn find_note(&self, id: Uuid) -> Result<NoteRecord, StoreError> {
        let conn = self.lock()?;
        find_note_locked(&conn, id)?.ok_or(StoreError::NotFound)
    }

    pub fn update_note(&self, id: Uuid, input: UpdateNoteInput) -> Result<NoteRecord, StoreError> {
        let conn = self.lock()?;
        let existing = find_note_locked(&conn, id)?.ok_or(StoreError::NotFound)?;

        // last_edit_time must strictly advance even if the clock has not ticked.
        let now = Utc::now().max(existing.last_edit_time + Duration::nanoseconds(1));
        let updated = NoteRecord {
            title: input.title.unwrap_or(existing.title),
            content: input.content.unwrap_or(existing.content),
            last_edit_time: now,
            ..existing
        };

        conn.execute(
            "UPDATE notes SET title = ?, content = ?, last_edit_time = ? WHERE id = ?",
            (
                &updated.title,
                &updated.content,
                format_datetime(updated.last_edit_time),
                id.to_string(),
            ),
        )?;

        Ok(updated)
    }

    pub fn delete_note(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn find_note_locked(conn: &Connection, id: Uuid) -> Result<Option<NoteRecord>, StoreError> {
    let note = conn
        .query_row(
            "SELECT id, title, content, create_date, last_edit_time
             FROM notes WHERE id = ?",
            [id.to_string()],
            note_from_row,
        )
        .optional()?;
    Ok(note)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<NoteRecord> {
    Ok(NoteRecord {
        id: parse_uuid(row, 0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        create_date: parse_datetime(row, 3)?,
        last_edit_time: parse_datetime(row, 4)?,
    })
}

fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let s: String = row.get(idx)?;
    Uuid::parse_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
