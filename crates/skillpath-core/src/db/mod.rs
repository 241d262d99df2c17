//! SQLite persistence for client-side state.
//!
//! This module holds the synchronous side of the local store: the logged-in
//! user record, the saved-post map and the draft staged for the AI task
//! generator. [`crate::store::Store`] wraps it for async callers.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, StoreResultExt};

pub mod migrations;
pub mod saved_queries;
pub mod session_queries;
pub mod staging_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the store file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).store_context("Failed to open store")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
