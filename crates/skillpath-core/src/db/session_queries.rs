//! Logged-in user record.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{ClientError, Result, StoreResultExt},
    models::User,
};

const UPSERT_SESSION_SQL: &str = "INSERT INTO session (slot, user_json, logged_in_at) VALUES (1, ?1, ?2) \
     ON CONFLICT(slot) DO UPDATE SET user_json = excluded.user_json, logged_in_at = excluded.logged_in_at";
const SELECT_SESSION_SQL: &str = "SELECT user_json FROM session WHERE slot = 1";
const DELETE_SESSION_SQL: &str = "DELETE FROM session";
const DELETE_SAVED_SQL: &str = "DELETE FROM saved_posts";
const DELETE_STAGED_SQL: &str = "DELETE FROM staged_drafts";

impl super::Database {
    /// Stores the user record, replacing any previous session.
    pub fn save_session(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.connection
            .execute(UPSERT_SESSION_SQL, params![json, Timestamp::now().to_string()])
            .store_context("Failed to save session")?;
        Ok(())
    }

    /// Loads the user record of the current session, if any.
    pub fn load_session(&self) -> Result<Option<User>> {
        let json: Option<String> = self
            .connection
            .query_row(SELECT_SESSION_SQL, [], |row| row.get(0))
            .optional()
            .store_context("Failed to load session")?;

        json.map(|raw| serde_json::from_str::<User>(&raw).map_err(ClientError::from))
            .transpose()
    }

    /// Removes the session together with everything tied to it.
    pub fn clear_session(&mut self) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        for sql in [DELETE_SESSION_SQL, DELETE_SAVED_SQL, DELETE_STAGED_SQL] {
            tx.execute(sql, []).store_context("Failed to clear session")?;
        }

        tx.commit().store_context("Failed to commit transaction")
    }
}
