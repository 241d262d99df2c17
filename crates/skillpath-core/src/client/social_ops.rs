//! Saved posts, the follow graph, feed posts and user search.

use std::sync::Arc;

use log::{debug, warn};

use super::Client;
use crate::{
    error::{ClientError, Result},
    events::{AppEvent, SaveAction},
    models::{FollowStats, Post, User},
    params::ToggleFollow,
    posts::{check_description, MediaFile, NewPost, EMPTY_DESCRIPTION_MESSAGE},
    search::UserSearch,
};

/// Result of toggling a saved post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: bool,
    pub count: u64,
}

/// Saved-post operations for the logged-in user.
#[derive(Debug, Clone, Copy)]
pub struct SavedPosts<'a> {
    client: &'a Client,
}

impl SavedPosts<'_> {
    /// Toggles the saved mark, mirrors it into the store and broadcasts the
    /// new count.
    pub async fn toggle(&self, post_id: &str) -> Result<SaveOutcome> {
        let user = self.client.require_user().await?;
        let backend = self.client.backend();

        let saved = backend.toggle_saved_post(&user.id, post_id).await?;
        self.client.store().set_saved(post_id, saved).await?;
        let count = backend.saved_post_count(&user.id).await?;

        self.client.events().publish(AppEvent::SavedPostsUpdated {
            count,
            action: SaveAction::from_saved(saved),
        });
        Ok(SaveOutcome { saved, count })
    }

    /// Asks the backend whether a post is saved and refreshes the local mark.
    pub async fn status(&self, post_id: &str) -> Result<bool> {
        let user = self.client.require_user().await?;
        let saved = self
            .client
            .backend()
            .saved_post_status(&user.id, post_id)
            .await?;
        self.client.store().set_saved(post_id, saved).await?;
        Ok(saved)
    }

    pub async fn count(&self) -> Result<u64> {
        let user = self.client.require_user().await?;
        self.client.backend().saved_post_count(&user.id).await
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        let user = self.client.require_user().await?;
        self.client.backend().saved_posts(&user.id).await
    }
}

/// Follow-graph operations for the logged-in user.
#[derive(Debug, Clone, Copy)]
pub struct Network<'a> {
    client: &'a Client,
}

/// State after a follow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowOutcome {
    pub following: bool,
    /// The target's refreshed counts; `None` when they could not be fetched
    pub stats: Option<FollowStats>,
}

impl Network<'_> {
    /// Unfollows when already following, follows otherwise, then refreshes
    /// the target's counts.
    pub async fn toggle_follow(&self, params: &ToggleFollow) -> Result<FollowOutcome> {
        let user = self.client.require_user().await?;
        if user.id == params.target_id {
            return Err(ClientError::invalid_input("target_id")
                .with_reason("You cannot follow yourself"));
        }

        let backend = self.client.backend();
        let currently_following = match params.currently_following {
            Some(known) => known,
            None => backend.is_following(&user.id, &params.target_id).await?,
        };

        if currently_following {
            backend.unfollow(&user.id, &params.target_id).await?;
        } else {
            backend.follow(&user.id, &params.target_id).await?;
        }

        // The toggle already happened; stale counts are not worth failing it.
        let stats = match backend.follow_stats(&params.target_id).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Could not refresh follow stats for {}: {e}", params.target_id);
                None
            }
        };
        Ok(FollowOutcome {
            following: !currently_following,
            stats,
        })
    }

    /// Whether the logged-in user follows `target_id`.
    pub async fn is_following(&self, target_id: &str) -> Result<bool> {
        let user = self.client.require_user().await?;
        self.client.backend().is_following(&user.id, target_id).await
    }

    pub async fn stats(&self, user_id: &str) -> Result<FollowStats> {
        self.client.backend().follow_stats(user_id).await
    }

    pub async fn followers(&self, user_id: &str) -> Result<Vec<User>> {
        self.client.backend().followers(user_id).await
    }

    pub async fn following(&self, user_id: &str) -> Result<Vec<User>> {
        self.client.backend().following(user_id).await
    }
}

/// Feed posts authored by the logged-in user.
#[derive(Debug, Clone, Copy)]
pub struct Feed<'a> {
    client: &'a Client,
}

impl Feed<'_> {
    /// Validates and uploads a new post. Nothing is sent when the
    /// description or media break the authoring rules.
    pub async fn create(&self, description: &str, media: Vec<MediaFile>) -> Result<()> {
        let user = self.client.require_user().await?;
        let post = NewPost::new(user.id, description.trim(), media)?;
        debug!("Creating post with {} file(s)", post.media().len());
        self.client.backend().create_post(&post).await
    }

    /// Posts of `user_id`, or of the logged-in user when `None`.
    pub async fn list(&self, user_id: Option<&str>) -> Result<Vec<Post>> {
        let user_id = match user_id {
            Some(id) => id.to_string(),
            None => self.client.require_user().await?.id,
        };
        self.client.backend().user_posts(&user_id).await
    }

    /// Replaces a post's description, applying the same word limit as
    /// creation.
    pub async fn edit(&self, post_id: &str, description: &str) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(
                ClientError::invalid_input("description").with_reason(EMPTY_DESCRIPTION_MESSAGE)
            );
        }
        check_description(description)?;
        self.client.require_user().await?;
        self.client.backend().update_post(post_id, description).await
    }

    pub async fn delete(&self, post_id: &str) -> Result<()> {
        self.client.require_user().await?;
        self.client.backend().delete_post(post_id).await
    }
}

impl Client {
    pub fn saved_posts(&self) -> SavedPosts<'_> {
        SavedPosts { client: self }
    }

    pub fn network(&self) -> Network<'_> {
        Network { client: self }
    }

    pub fn feed(&self) -> Feed<'_> {
        Feed { client: self }
    }

    /// Creates a debounced search that hides the logged-in user (if any)
    /// from its results.
    pub async fn user_search(&self) -> Result<UserSearch> {
        let current = self.store().current_user().await?;
        Ok(UserSearch::new(
            Arc::clone(&self.backend),
            current.map(|user| user.id),
        ))
    }
}
