//! Application store: typed, async access to client-side state.
//!
//! The store replaces ad hoc key/value browser storage with three explicit
//! slots, each with its own accessors and lifecycle:
//!
//! - the session user, written at login and removed at logout
//! - saved-post marks, mirrored from the backend after each toggle
//! - the staged draft handed from the creation wizard to the AI generator
//!
//! Logging out clears all three. Every call opens the SQLite file on a
//! blocking thread, so a `Store` is cheap to clone and share.

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{ClientError, Result},
    models::{PlanDraft, User},
};

/// Async handle on the local store file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the store, creating the file and schema when missing.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { path };
        store.with_db(|_| Ok(())).await?;
        Ok(store)
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| ClientError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Starts a session for `user`, replacing any previous one.
    pub async fn login(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.with_db(move |db| db.save_session(&user)).await
    }

    pub async fn current_user(&self) -> Result<Option<User>> {
        self.with_db(|db| db.load_session()).await
    }

    /// Like [`Store::current_user`] but fails with [`ClientError::NotLoggedIn`].
    pub async fn require_user(&self) -> Result<User> {
        self.current_user().await?.ok_or(ClientError::NotLoggedIn)
    }

    /// Ends the session and drops saved-post marks and any staged draft.
    pub async fn logout(&self) -> Result<()> {
        self.with_db(|db| db.clear_session()).await
    }

    pub async fn set_saved(&self, post_id: &str, saved: bool) -> Result<()> {
        let post_id = post_id.to_string();
        self.with_db(move |db| db.set_saved(&post_id, saved)).await
    }

    pub async fn is_saved(&self, post_id: &str) -> Result<bool> {
        let post_id = post_id.to_string();
        self.with_db(move |db| db.is_saved(&post_id)).await
    }

    pub async fn saved_post_ids(&self) -> Result<Vec<String>> {
        self.with_db(|db| db.saved_post_ids()).await
    }

    /// Stages a draft for the AI generator.
    pub async fn stage_draft(&self, draft: &PlanDraft) -> Result<()> {
        let draft = draft.clone();
        self.with_db(move |db| db.stage_draft(&draft)).await
    }

    pub async fn staged_draft(&self) -> Result<Option<PlanDraft>> {
        self.with_db(|db| db.staged_draft()).await
    }

    pub async fn clear_staged_draft(&self) -> Result<()> {
        self.with_db(|db| db.clear_staged_draft()).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn create_test_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(temp_dir.path().join("nested/store.db"))
            .await
            .expect("Failed to open store");
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (_temp_dir, store) = create_test_store().await;
        assert_eq!(store.current_user().await.unwrap(), None);
        assert!(matches!(
            store.require_user().await,
            Err(ClientError::NotLoggedIn)
        ));

        let user = User {
            id: "u1".to_string(),
            name: Some("Sam".to_string()),
            ..Default::default()
        };
        store.login(&user).await.unwrap();
        assert_eq!(store.require_user().await.unwrap(), user);

        store.logout().await.unwrap();
        assert_eq!(store.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_relogin_replaces_user() {
        let (_temp_dir, store) = create_test_store().await;
        store.login(&User::with_id("first")).await.unwrap();
        store.login(&User::with_id("second")).await.unwrap();

        assert_eq!(store.require_user().await.unwrap().id, "second");
    }

    #[tokio::test]
    async fn test_saved_posts_are_idempotent() {
        let (_temp_dir, store) = create_test_store().await;
        store.set_saved("post-1", true).await.unwrap();
        store.set_saved("post-1", true).await.unwrap();
        store.set_saved("post-2", true).await.unwrap();
        store.set_saved("post-2", false).await.unwrap();

        assert!(store.is_saved("post-1").await.unwrap());
        assert!(!store.is_saved("post-2").await.unwrap());
        assert_eq!(store.saved_post_ids().await.unwrap(), vec!["post-1"]);
    }

    #[tokio::test]
    async fn test_logout_clears_saved_posts_and_staged_draft() {
        let (_temp_dir, store) = create_test_store().await;
        store.login(&User::with_id("u1")).await.unwrap();
        store.set_saved("post-1", true).await.unwrap();
        store
            .stage_draft(&PlanDraft {
                skills: vec!["React".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        store.logout().await.unwrap();

        assert!(store.saved_post_ids().await.unwrap().is_empty());
        assert_eq!(store.staged_draft().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_staged_draft_round_trip_and_clear() {
        let (_temp_dir, store) = create_test_store().await;
        let draft = PlanDraft {
            title: "Hooks deep dive".to_string(),
            skills: vec!["React".to_string()],
            topics: vec!["Hooks".to_string()],
            start_date: Some(jiff::civil::date(2025, 6, 1)),
            ..Default::default()
        };

        store.stage_draft(&draft).await.unwrap();
        assert_eq!(store.staged_draft().await.unwrap(), Some(draft));

        store.clear_staged_draft().await.unwrap();
        assert_eq!(store.staged_draft().await.unwrap(), None);
    }
}
