//! hnote: a minimal note-taking HTTP API over a SQLite-backed note collection.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod server;
