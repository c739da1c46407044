mod error;
mod handlers;

pub use error::ApiError;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/note",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/note/",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/note/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}
