//! Domain models for hnote.
//!
//! - [`NoteRecord`]: a note as stored in the `notes` collection, keyed by a [`uuid::Uuid`].
//! - [`Note`]: the JSON shape returned to clients, with the id rendered as a string.
//! - [`CreateNoteInput`] / [`UpdateNoteInput`]: request payloads.
//! - Response bodies such as [`NoteListResponse`] and [`MessageResponse`].

mod note;
mod response;

pub use note::*;
pub use response::*;
