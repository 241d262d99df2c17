//! Draft hand-off slot between the creation wizard and the AI generator.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{ClientError, Result, StoreResultExt},
    models::PlanDraft,
};

const UPSERT_STAGED_SQL: &str = "INSERT INTO staged_drafts (slot, draft_json, staged_at) VALUES (1, ?1, ?2) \
     ON CONFLICT(slot) DO UPDATE SET draft_json = excluded.draft_json, staged_at = excluded.staged_at";
const SELECT_STAGED_SQL: &str = "SELECT draft_json FROM staged_drafts WHERE slot = 1";
const DELETE_STAGED_SQL: &str = "DELETE FROM staged_drafts";

impl super::Database {
    /// Writes the draft to the staging slot, replacing any earlier one.
    pub fn stage_draft(&self, draft: &PlanDraft) -> Result<()> {
        let json = serde_json::to_string(draft)?;
        self.connection
            .execute(UPSERT_STAGED_SQL, params![json, Timestamp::now().to_string()])
            .store_context("Failed to stage draft")?;
        Ok(())
    }

    pub fn staged_draft(&self) -> Result<Option<PlanDraft>> {
        let json: Option<String> = self
            .connection
            .query_row(SELECT_STAGED_SQL, [], |row| row.get(0))
            .optional()
            .store_context("Failed to load staged draft")?;

        json.map(|raw| serde_json::from_str::<PlanDraft>(&raw).map_err(ClientError::from))
            .transpose()
    }

    pub fn clear_staged_draft(&self) -> Result<()> {
        self.connection
            .execute(DELETE_STAGED_SQL, [])
            .store_context("Failed to clear staged draft")?;
        Ok(())
    }
}
