//! Store schema initialization and versioning.

use crate::error::{ClientError, Result, StoreResultExt};

/// Schema version written to `PRAGMA user_version`.
const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .store_context("Failed to read store version")?;

        if version > SCHEMA_VERSION {
            return Err(ClientError::Configuration {
                message: format!(
                    "Store schema version {version} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize store schema")?;

        if version < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .store_context("Failed to record store version")?;
        }

        Ok(())
    }
}
