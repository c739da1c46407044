use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note as it is kept in the `notes` collection.
///
/// `id` and `create_date` never change once the record is inserted.
/// `last_edit_time` starts equal to `create_date` and moves forward on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub last_edit_time: DateTime<Utc>,
}

/// A note as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub create_date: DateTime<Utc>,
    pub last_edit_time: DateTime<Utc>,
    pub content: String,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            create_date: record.create_date,
            last_edit_time: record.last_edit_time,
            content: record.content,
        }
    }
}

/// Input for creating a note.
///
/// Clients may echo back a full [`Note`]; identifiers and timestamps in the
/// payload are ignored because the store always assigns them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Input for updating a note. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}
