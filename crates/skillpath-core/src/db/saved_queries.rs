//! Saved-post marks mirrored from the backend.

use jiff::Timestamp;
use rusqlite::params;

use crate::error::{Result, StoreResultExt};

const INSERT_SAVED_SQL: &str =
    "INSERT INTO saved_posts (post_id, saved_at) VALUES (?1, ?2) ON CONFLICT(post_id) DO NOTHING";
const DELETE_SAVED_SQL: &str = "DELETE FROM saved_posts WHERE post_id = ?1";
const CHECK_SAVED_SQL: &str = "SELECT EXISTS(SELECT 1 FROM saved_posts WHERE post_id = ?1)";
const LIST_SAVED_SQL: &str = "SELECT post_id FROM saved_posts ORDER BY saved_at, post_id";

impl super::Database {
    /// Marks or unmarks a post as saved.
    pub fn set_saved(&self, post_id: &str, saved: bool) -> Result<()> {
        if saved {
            self.connection
                .execute(INSERT_SAVED_SQL, params![post_id, Timestamp::now().to_string()])
                .store_context("Failed to mark post as saved")?;
        } else {
            self.connection
                .execute(DELETE_SAVED_SQL, params![post_id])
                .store_context("Failed to unmark saved post")?;
        }
        Ok(())
    }

    pub fn is_saved(&self, post_id: &str) -> Result<bool> {
        self.connection
            .query_row(CHECK_SAVED_SQL, params![post_id], |row| row.get(0))
            .store_context("Failed to check saved post")
    }

    /// Saved post ids, oldest first.
    pub fn saved_post_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SAVED_SQL)
            .store_context("Failed to prepare query")?;

        let ids = stmt
            .query_map([], |row| row.get(0))
            .store_context("Failed to query saved posts")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .store_context("Failed to read saved posts")?;
        Ok(ids)
    }
}
