//! In-memory backend that records every request, for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::Backend;
use crate::{
    error::{ClientError, Result},
    models::{Course, FollowStats, GeneratedTask, LearningPlan, Post, User},
    posts::NewPost,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CreatePlan(LearningPlan),
    PlansForUser(String),
    GetPlan(String),
    UpdatePlan(String, LearningPlan),
    DeletePlan(String),
    GenerateTasks(LearningPlan),
    ListCourses,
    ToggleSaved(String, String),
    SavedStatus(String, String),
    SavedCount(String),
    SavedPosts(String),
    SearchUsers(String),
    Follow(String, String),
    Unfollow(String, String),
    IsFollowing(String, String),
    FollowStats(String),
    Followers(String),
    Following(String),
    CreatePost(NewPost),
    UserPosts(String),
    UpdatePost(String, String),
    DeletePost(String),
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    pub plans: Mutex<Vec<LearningPlan>>,
    /// `None` makes generation answer without a `tasks` array.
    pub generated: Mutex<Option<Vec<GeneratedTask>>>,
    pub courses: Mutex<Vec<Course>>,
    pub users: Mutex<Vec<User>>,
    pub saved: Mutex<Vec<String>>,
    /// `(follower, followed)` pairs
    pub follows: Mutex<Vec<(String, String)>>,
    pub posts: Mutex<Vec<Post>>,
    /// Runs once, right after the next plan is created.
    on_create: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    /// While set, every call is recorded and then fails with this error.
    pub failure: Mutex<Option<fn() -> ClientError>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            generated: Mutex::new(Some(Vec::new())),
            ..Default::default()
        }
    }

    pub fn with_plan(self, plan: LearningPlan) -> Self {
        self.plans.lock().unwrap().push(plan);
        self
    }

    pub fn with_generated(self, tasks: Vec<GeneratedTask>) -> Self {
        *self.generated.lock().unwrap() = Some(tasks);
        self
    }

    pub fn fail_with(&self, failure: fn() -> ClientError) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn on_create(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_create.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match *self.failure.lock().unwrap() {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn create_plan(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        self.record(Call::CreatePlan(plan.clone()))?;
        let mut plans = self.plans.lock().unwrap();
        let mut created = plan.clone();
        created.id = Some(format!("plan-{}", plans.len() + 1));
        plans.push(created.clone());
        drop(plans);

        let hook = self.on_create.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(created)
    }

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<LearningPlan>> {
        self.record(Call::PlansForUser(user_id.to_string()))?;
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|plan| plan.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn get_plan(&self, id: &str) -> Result<LearningPlan> {
        self.record(Call::GetPlan(id.to_string()))?;
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|plan| plan.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| ClientError::PlanNotFound { id: id.to_string() })
    }

    async fn update_plan(&self, id: &str, plan: &LearningPlan) -> Result<LearningPlan> {
        self.record(Call::UpdatePlan(id.to_string(), plan.clone()))?;
        let mut plans = self.plans.lock().unwrap();
        let slot = plans
            .iter_mut()
            .find(|stored| stored.id.as_deref() == Some(id))
            .ok_or_else(|| ClientError::PlanNotFound { id: id.to_string() })?;
        *slot = plan.clone();
        Ok(plan.clone())
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        self.record(Call::DeletePlan(id.to_string()))?;
        self.plans
            .lock()
            .unwrap()
            .retain(|plan| plan.id.as_deref() != Some(id));
        Ok(())
    }

    async fn generate_tasks(&self, request: &LearningPlan) -> Result<Vec<GeneratedTask>> {
        self.record(Call::GenerateTasks(request.clone()))?;
        self.generated
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::MalformedResponse {
                message: "response has no `tasks` array".to_string(),
            })
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.record(Call::ListCourses)?;
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn toggle_saved_post(&self, user_id: &str, post_id: &str) -> Result<bool> {
        self.record(Call::ToggleSaved(user_id.to_string(), post_id.to_string()))?;
        let mut saved = self.saved.lock().unwrap();
        if saved.iter().any(|id| id == post_id) {
            saved.retain(|id| id != post_id);
            Ok(false)
        } else {
            saved.push(post_id.to_string());
            Ok(true)
        }
    }

    async fn saved_post_status(&self, user_id: &str, post_id: &str) -> Result<bool> {
        self.record(Call::SavedStatus(user_id.to_string(), post_id.to_string()))?;
        Ok(self.saved.lock().unwrap().iter().any(|id| id == post_id))
    }

    async fn saved_post_count(&self, user_id: &str) -> Result<u64> {
        self.record(Call::SavedCount(user_id.to_string()))?;
        Ok(self.saved.lock().unwrap().len() as u64)
    }

    async fn saved_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.record(Call::SavedPosts(user_id.to_string()))?;
        Ok(self
            .saved
            .lock()
            .unwrap()
            .iter()
            .map(|id| Post {
                id: id.clone(),
                ..Default::default()
            })
            .collect())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.record(Call::SearchUsers(query.to_string()))?;
        let needle = query.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|user| user.display_name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn follow(&self, user_id: &str, target_id: &str) -> Result<()> {
        self.record(Call::Follow(user_id.to_string(), target_id.to_string()))?;
        self.follows
            .lock()
            .unwrap()
            .push((user_id.to_string(), target_id.to_string()));
        Ok(())
    }

    async fn unfollow(&self, user_id: &str, target_id: &str) -> Result<()> {
        self.record(Call::Unfollow(user_id.to_string(), target_id.to_string()))?;
        self.follows
            .lock()
            .unwrap()
            .retain(|(from, to)| !(from == user_id && to == target_id));
        Ok(())
    }

    async fn is_following(&self, user_id: &str, target_id: &str) -> Result<bool> {
        self.record(Call::IsFollowing(user_id.to_string(), target_id.to_string()))?;
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .any(|(from, to)| from == user_id && to == target_id))
    }

    async fn follow_stats(&self, user_id: &str) -> Result<FollowStats> {
        self.record(Call::FollowStats(user_id.to_string()))?;
        let follows = self.follows.lock().unwrap();
        Ok(FollowStats {
            followers: follows.iter().filter(|(_, to)| to == user_id).count() as u64,
            following: follows.iter().filter(|(from, _)| from == user_id).count() as u64,
        })
    }

    async fn followers(&self, user_id: &str) -> Result<Vec<User>> {
        self.record(Call::Followers(user_id.to_string()))?;
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, to)| to == user_id)
            .map(|(from, _)| User::with_id(from.clone()))
            .collect())
    }

    async fn following(&self, user_id: &str) -> Result<Vec<User>> {
        self.record(Call::Following(user_id.to_string()))?;
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(from, _)| from == user_id)
            .map(|(_, to)| User::with_id(to.clone()))
            .collect())
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        self.record(Call::CreatePost(post.clone()))?;
        let mut posts = self.posts.lock().unwrap();
        let id = format!("post-{}", posts.len() + 1);
        posts.push(Post {
            id,
            user_id: Some(post.user_id().to_string()),
            description: Some(post.description().to_string()),
            ..Default::default()
        });
        Ok(())
    }

    async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.record(Call::UserPosts(user_id.to_string()))?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|post| post.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn update_post(&self, post_id: &str, description: &str) -> Result<()> {
        self.record(Call::UpdatePost(post_id.to_string(), description.to_string()))?;
        if let Some(post) = self
            .posts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|post| post.id == post_id)
        {
            post.description = Some(description.to_string());
        }
        Ok(())
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.record(Call::DeletePost(post_id.to_string()))?;
        self.posts.lock().unwrap().retain(|post| post.id != post_id);
        Ok(())
    }
}

/// Builds a client over `backend` with a fresh store and `user` logged in.
pub(crate) async fn logged_in_client(
    backend: std::sync::Arc<FakeBackend>,
    user: &str,
) -> (tempfile::TempDir, crate::client::Client) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let client = crate::client::ClientBuilder::new()
        .with_store_path(Some(temp_dir.path().join("store.db")))
        .with_backend(backend)
        .build()
        .await
        .expect("Failed to build client");
    client
        .store()
        .login(&User::with_id(user))
        .await
        .expect("Failed to log in");
    (temp_dir, client)
}
