use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::db::StoreError;
use crate::models::MessageResponse;

/// Errors surfaced by the note handlers.
///
/// Every variant is logged when it is turned into a response. Store failures
/// are logged in full; clients only see `message` plus a short generic `err` string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid note payload: {0}")]
    Decode(#[from] JsonRejection),

    #[error("{message}: note {id} not found")]
    NotFound { message: &'static str, id: String },

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Map a store error for a collection-wide operation described by `message`.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        Self::store_note(message, "*")
    }

    /// Map a store error for the operation described by `message` on note `id`.
    pub fn store_note(
        message: &'static str,
        id: impl ToString,
    ) -> impl FnOnce(StoreError) -> ApiError {
        let id = id.to_string();
        move |source| match source {
            StoreError::NotFound => ApiError::NotFound { message, id },
            source => ApiError::Store { message, source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Decode(rejection) => {
                tracing::warn!("Rejected note payload: {}", rejection.body_text());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    MessageResponse::new("invalid note payload").with_err(rejection.body_text()),
                )
            }
            ApiError::NotFound { message, id } => {
                tracing::warn!("{}: note {} not found", message, id);
                (
                    StatusCode::NOT_FOUND,
                    MessageResponse::new("note not found"),
                )
            }
            ApiError::Store { message, source } => {
                tracing::error!("{}: {}", message, source);
                (
                    StatusCode::BAD_REQUEST,
                    MessageResponse::new(message).with_err("store operation failed"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn store_not_found_keeps_operation_and_id() {
        let id = Uuid::new_v4();
        let err = ApiError::store_note("failed to update note", id)(StoreError::NotFound);

        match &err {
            ApiError::NotFound { message, id: missing } => {
                assert_eq!(*message, "failed to update note");
                assert_eq!(*missing, id.to_string());
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            format!("failed to update note: note {id} not found")
        );
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_bad_request() {
        let err = ApiError::store("notes fetch failed")(StoreError::LockPoisoned);
        assert!(matches!(
            err,
            ApiError::Store {
                message: "notes fetch failed",
                ..
            }
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
