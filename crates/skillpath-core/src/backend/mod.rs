//! The seam between the client core and the REST backend.
//!
//! Everything the core needs from the server goes through the [`Backend`]
//! trait. [`HttpBackend`] is the production implementation; tests substitute
//! an in-memory fake that records requests.
//!
//! | Operation          | Request                                  |
//! |--------------------|------------------------------------------|
//! | `create_plan`      | `POST /learningplans`                    |
//! | `plans_for_user`   | `GET /learningplans/user/{userId}`       |
//! | `get_plan`         | `GET /learningplans/{id}`                |
//! | `update_plan`      | `PUT /learningplans/{id}`                |
//! | `delete_plan`      | `DELETE /learningplans/{id}`             |
//! | `generate_tasks`   | `POST /ailearningplans/generate-tasks`   |
//! | `list_courses`     | `GET /dsrcourses`                        |
//! | `toggle_saved_post`| `POST /saved/toggle?userId=&postId=`     |
//! | `saved_post_status`| `GET /saved/status?userId=&postId=`      |
//! | `saved_post_count` | `GET /saved/count?userId=`               |
//! | `saved_posts`      | `GET /saved/posts?userId=`               |
//! | `search_users`     | `GET /user/search-v2?query=`             |
//! | `follow`           | `POST /follow/{userId}/{targetId}`       |
//! | `unfollow`         | `DELETE /follow/{userId}/{targetId}`     |
//! | `is_following`     | `GET /follow/check/{userId}/{targetId}`  |
//! | `follow_stats`     | `GET /follow/stats/{userId}`             |
//! | `followers`        | `GET /user/followers/{userId}`           |
//! | `following`        | `GET /user/following/{userId}`           |
//! | `create_post`      | `POST /media/post` (multipart)           |
//! | `user_posts`       | `GET /media/user/{userId}`               |
//! | `update_post`      | `PUT /media/update/{postId}` (text body) |
//! | `delete_post`      | `DELETE /media/delete/{postId}`          |
//!
//! Identifiers are always sent as single, percent-encoded path segments.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Course, FollowStats, GeneratedTask, LearningPlan, Post, User},
    posts::NewPost,
};

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpBackend;

/// Remote operations used by the client core.
///
/// Implementations map transport failures to [`crate::ClientError::Network`],
/// non-2xx answers to [`crate::ClientError::Status`] and undecodable bodies to
/// [`crate::ClientError::MalformedResponse`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Creates a plan from a complete plan object and returns the echo.
    async fn create_plan(&self, plan: &LearningPlan) -> Result<LearningPlan>;

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<LearningPlan>>;

    /// Fails with [`crate::ClientError::PlanNotFound`] for unknown ids.
    async fn get_plan(&self, id: &str) -> Result<LearningPlan>;

    /// Replaces the stored plan with `plan` (full object, last write wins).
    async fn update_plan(&self, id: &str, plan: &LearningPlan) -> Result<LearningPlan>;

    async fn delete_plan(&self, id: &str) -> Result<()>;

    /// Asks the AI generator for tasks matching a plan-shaped request.
    async fn generate_tasks(&self, request: &LearningPlan) -> Result<Vec<GeneratedTask>>;

    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// Toggles the saved mark and returns whether the post is now saved.
    async fn toggle_saved_post(&self, user_id: &str, post_id: &str) -> Result<bool>;

    async fn saved_post_status(&self, user_id: &str, post_id: &str) -> Result<bool>;

    async fn saved_post_count(&self, user_id: &str) -> Result<u64>;

    async fn saved_posts(&self, user_id: &str) -> Result<Vec<Post>>;

    async fn search_users(&self, query: &str) -> Result<Vec<User>>;

    async fn follow(&self, user_id: &str, target_id: &str) -> Result<()>;

    async fn unfollow(&self, user_id: &str, target_id: &str) -> Result<()>;

    async fn is_following(&self, user_id: &str, target_id: &str) -> Result<bool>;

    async fn follow_stats(&self, user_id: &str) -> Result<FollowStats>;

    async fn followers(&self, user_id: &str) -> Result<Vec<User>>;

    async fn following(&self, user_id: &str) -> Result<Vec<User>>;

    /// Uploads a validated post with its media files.
    async fn create_post(&self, post: &NewPost) -> Result<()>;

    async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>>;

    /// Replaces the description of an existing post.
    async fn update_post(&self, post_id: &str, description: &str) -> Result<()>;

    async fn delete_post(&self, post_id: &str) -> Result<()>;
}
