//! Core types and shared functionality for dexcrawl.
//!
//! This crate provides:
//! - Normalized record types (entities, movesets, move catalog)
//! - Record store with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use store::DexDb;
