#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skillpath_core::{
    posts::NewPost, Backend, Client, ClientBuilder, ClientError, Course, FollowStats,
    GeneratedTask, LearningPlan, Post, Result, User,
};
use tempfile::TempDir;

/// Requests that change server state, in the order they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Create(LearningPlan),
    Update(String, LearningPlan),
    Delete(String),
}

/// Backend double that answers from memory and records writes.
#[derive(Default)]
pub struct RecordingBackend {
    pub plans: Mutex<Vec<LearningPlan>>,
    pub generated: Mutex<Vec<GeneratedTask>>,
    pub generation_requests: Mutex<Vec<LearningPlan>>,
    pub writes: Mutex<Vec<Write>>,
}

impl RecordingBackend {
    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn create_plan(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        self.writes.lock().unwrap().push(Write::Create(plan.clone()));
        let mut plans = self.plans.lock().unwrap();
        let mut created = plan.clone();
        created.id = Some(format!("created-{}", plans.len() + 1));
        plans.push(created.clone());
        Ok(created)
    }

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<LearningPlan>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn get_plan(&self, id: &str) -> Result<LearningPlan> {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| ClientError::PlanNotFound { id: id.to_string() })
    }

    async fn update_plan(&self, id: &str, plan: &LearningPlan) -> Result<LearningPlan> {
        self.writes
            .lock()
            .unwrap()
            .push(Write::Update(id.to_string(), plan.clone()));
        Ok(plan.clone())
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        self.writes.lock().unwrap().push(Write::Delete(id.to_string()));
        Ok(())
    }

    async fn generate_tasks(&self, request: &LearningPlan) -> Result<Vec<GeneratedTask>> {
        self.generation_requests.lock().unwrap().push(request.clone());
        Ok(self.generated.lock().unwrap().clone())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(Vec::new())
    }

    async fn toggle_saved_post(&self, _user_id: &str, _post_id: &str) -> Result<bool> {
        Ok(true)
    }

    async fn saved_post_status(&self, _user_id: &str, _post_id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn saved_post_count(&self, _user_id: &str) -> Result<u64> {
        Ok(0)
    }

    async fn saved_posts(&self, _user_id: &str) -> Result<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn search_users(&self, _query: &str) -> Result<Vec<User>> {
        Ok(Vec::new())
    }

    async fn follow(&self, _user_id: &str, _target_id: &str) -> Result<()> {
        Ok(())
    }

    async fn unfollow(&self, _user_id: &str, _target_id: &str) -> Result<()> {
        Ok(())
    }

    async fn is_following(&self, _user_id: &str, _target_id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn follow_stats(&self, _user_id: &str) -> Result<FollowStats> {
        Ok(FollowStats::default())
    }

    async fn followers(&self, _user_id: &str) -> Result<Vec<User>> {
        Ok(Vec::new())
    }

    async fn following(&self, _user_id: &str) -> Result<Vec<User>> {
        Ok(Vec::new())
    }

    async fn create_post(&self, _post: &NewPost) -> Result<()> {
        Ok(())
    }

    async fn user_posts(&self, _user_id: &str) -> Result<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn update_post(&self, _post_id: &str, _description: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_post(&self, _post_id: &str) -> Result<()> {
        Ok(())
    }
}

/// Helper function to create a client logged in as `user_id`
pub async fn create_test_client(
    backend: Arc<RecordingBackend>,
    user_id: &str,
) -> (TempDir, Client) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let client = ClientBuilder::new()
        .with_store_path(Some(temp_dir.path().join("store.db")))
        .with_backend(backend)
        .build()
        .await
        .expect("Failed to create client");
    client
        .store()
        .login(&User::with_id(user_id))
        .await
        .expect("Failed to log in");
    (temp_dir, client)
}
