use serde::{Deserialize, Serialize};

use super::Note;

/// Body returned when listing notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteListResponse {
    pub data: Vec<Note>,
}

/// Body returned when fetching a single note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub data: Note,
}

/// Body returned after a note is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub message: String,
    pub note_id: String,
}

/// Status message, optionally carrying the affected note or an error string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            err: None,
        }
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.data = Some(note);
        self
    }

    pub fn with_err(mut self, err: impl Into<String>) -> Self {
        self.err = Some(err.into());
        self
    }
}
