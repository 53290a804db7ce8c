//! SQLite-backed persistence for entity records and the move catalog.
//!
//! Async access goes through tokio-rusqlite, which runs every statement on a
//! dedicated background thread. It provides:
//!
//! - Append-only entity storage (no deduplication)
//! - Per-generation move catalog storage
//! - Automatic schema migrations
//! - WAL mode for concurrent readers

pub mod connection;
pub mod entities;
pub mod hash;
pub mod migrations;
pub mod moves;

pub use crate::Error;

pub use connection::DexDb;
pub use hash::page_digest;
