use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::ApiError;
use crate::db::Database;
use crate::models::*;

/// Parse a note id from the path. Ids that are not UUIDs cannot exist in the store.
fn parse_note_id(id: &str, message: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound {
        message,
        id: id.to_string(),
    })
}

// ============================================================
// Home
// ============================================================

pub async fn home() -> &'static str {
    "hello! this is hnote"
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(State(db): State<Database>) -> Result<Json<NoteListResponse>, ApiError> {
    let notes = db
        .find_all_notes()
        .map_err(ApiError::store("notes fetch failed"))?;

    Ok(Json(NoteListResponse {
        data: notes.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_note(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let id = parse_note_id(&id, "note fetch failed")?;
    let note = db.find_note(id).map_err(ApiError::store_note("note fetch failed", id))?;
    Ok(Json(NoteResponse { data: note.into() }))
}

pub async fn create_note(
    State(db): State<Database>,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateNoteResponse>), ApiError> {
    let Json(input) = payload?;

    let note = db
        .insert_note(input)
        .map_err(ApiError::store("failed to create note"))?;
    tracing::info!("Created note {}", note.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteResponse {
            message: "note create succeed".to_string(),
            note_id: note.id.to_string(),
        }),
    ))
}

pub async fn update_note(
    State(db): State<Database>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_note_id(&id, "failed to update note")?;
    let Json(input) = payload?;

    let note = db
        .update_note(id, input)
        .map_err(ApiError::store_note("failed to update note", id))?;
    tracing::info!("Updated note {}", id);

    Ok(Json(
        MessageResponse::new("note update succeed").with_note(note.into()),
    ))
}

pub async fn delete_note(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_note_id(&id, "failed to delete note")?;

    db.delete_note(id)
        .map_err(ApiError::store_note("failed to delete note", id))?;
    tracing::info!("Deleted note {}", id);

    Ok(Json(MessageResponse::new("note delete succeed")))
}
