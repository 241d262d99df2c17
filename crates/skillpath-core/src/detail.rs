//! Plan detail and plan list views.

use std::{cmp::Ordering, fmt};

use log::{debug, warn};

use crate::{
    client::Client,
    display::PlanSummaries,
    error::{ClientError, Result},
    models::LearningPlan,
    params::Id,
};

/// Completed versus total tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(plan: &LearningPlan) -> Self {
        Self {
            completed: plan.completed_tasks(),
            total: plan.tasks.len(),
        }
    }

    /// Rounded percentage; a plan without tasks is at 0%.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.completed, self.total, self.percent())
    }
}

/// A single plan with task check-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetail {
    plan: LearningPlan,
}

impl PlanDetail {
    pub fn new(plan: LearningPlan) -> Self {
        Self { plan }
    }

    pub async fn load(client: &Client, params: &Id) -> Result<Self> {
        client.get_plan(params).await.map(Self::new)
    }

    pub fn plan(&self) -> &LearningPlan {
        &self.plan
    }

    pub fn progress(&self) -> Progress {
        Progress::of(&self.plan)
    }

    /// Flips one task locally, then saves the whole plan.
    ///
    /// If the save fails only that flip is reverted and the error returned.
    /// Returns the task's new completion state.
    pub async fn toggle_task(&mut self, client: &Client, index: usize) -> Result<bool> {
        let total = self.plan.tasks.len();
        let completed = {
            let task = self.plan.tasks.get_mut(index).ok_or_else(|| {
                ClientError::invalid_input("task")
                    .with_reason(format!("No task at position {index} (plan has {total})"))
            })?;
            task.completed = !task.completed;
            task.completed
        };

        match client.update_plan(&self.plan).await {
            Ok(_) => {
                debug!("Task {index} of plan {:?} is now {completed}", self.plan.id);
                Ok(completed)
            }
            Err(e) => {
                warn!("Reverting task {index} after failed save: {e}");
                if let Some(task) = self.plan.tasks.get_mut(index) {
                    task.completed = !completed;
                }
                Err(e)
            }
        }
    }
}

/// Newest start date first; undated plans go last in their original order.
pub fn sort_newest_first(plans: &mut [LearningPlan]) {
    plans.sort_by(|a, b| match (a.start_date, b.start_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// The logged-in user's plans, as shown by the plan list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanBook {
    user_id: String,
    plans: Vec<LearningPlan>,
}

impl PlanBook {
    pub async fn load(client: &Client) -> Result<Self> {
        let user = client.require_user().await?;
        let mut book = Self {
            user_id: user.id,
            plans: Vec::new(),
        };
        book.refresh(client).await?;
        Ok(book)
    }

    pub fn plans(&self) -> &[LearningPlan] {
        &self.plans
    }

    pub fn summaries(&self) -> PlanSummaries {
        PlanSummaries(self.plans.iter().map(Into::into).collect())
    }

    /// Re-fetches the whole collection.
    pub async fn refresh(&mut self, client: &Client) -> Result<()> {
        let mut plans = client.plans_for_user(&self.user_id).await?;
        sort_newest_first(&mut plans);
        self.plans = plans;
        Ok(())
    }

    /// Deletes a plan and re-fetches the list.
    pub async fn delete(&mut self, client: &Client, params: &Id) -> Result<()> {
        client.delete_plan(params).await?;
        self.refresh(client).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::{date, Date};

    use super::*;
    use crate::{
        backend::fake::{logged_in_client, Call, FakeBackend},
        models::Task,
    };

    fn plan(id: &str, start: Option<Date>) -> LearningPlan {
        LearningPlan {
            id: Some(id.to_string()),
            user_id: Some("u-1".to_string()),
            title: id.to_uppercase(),
            start_date: start,
            tasks: vec![
                Task::new("One", ""),
                Task::new("Two", ""),
                Task::new("Three", ""),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_rounds_percent() {
        let mut p = plan("a", None);
        p.tasks[0].completed = true;
        let progress = Progress::of(&p);
        assert_eq!(progress.percent(), 33);
        assert_eq!(progress.to_string(), "1/3 (33%)");

        p.tasks[1].completed = true;
        assert_eq!(Progress::of(&p).percent(), 67);
        assert_eq!(Progress::default().percent(), 0);
    }

    #[test]
    fn test_sort_newest_first_puts_undated_last() {
        let mut plans = vec![
            plan("undated", None),
            plan("old", Some(date(2024, 1, 1))),
            plan("new", Some(date(2025, 3, 1))),
        ];
        sort_newest_first(&mut plans);
        let ids: Vec<_> = plans.iter().filter_map(|p| p.id.as_deref()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[tokio::test]
    async fn test_toggle_task_saves_whole_plan() {
        let backend = Arc::new(FakeBackend::new().with_plan(plan("p-1", None)));
        let (_temp_dir, client) = logged_in_client(backend.clone(), "u-1").await;

        let mut detail = PlanDetail::load(&client, &Id::from("p-1")).await.unwrap();
        assert!(detail.toggle_task(&client, 2).await.unwrap());
        assert_eq!(detail.progress().completed, 1);

        let Some(Call::UpdatePlan(_, sent)) = backend.calls().pop() else {
            panic!("expected a PUT");
        };
        assert!(sent.tasks[2].completed);
        assert!(!sent.tasks[0].completed);
    }

    #[tokio::test]
    async fn test_failed_toggle_is_reverted() {
        let backend = Arc::new(FakeBackend::new());
        let (_temp_dir, client) = logged_in_client(backend.clone(), "u-1").await;
        backend.fail_with(|| ClientError::Network {
            message: "offline".to_string(),
        });

        let mut detail = PlanDetail::new(plan("p-1", None));
        let before = detail.clone();
        assert!(detail.toggle_task(&client, 0).await.is_err());
        assert_eq!(detail, before);
        assert!(detail.toggle_task(&client, 7).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_plan_book_delete_refetches() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_plan(plan("p-1", Some(date(2024, 1, 1))))
                .with_plan(plan("p-2", Some(date(2025, 1, 1)))),
        );
        let (_temp_dir, client) = logged_in_client(backend.clone(), "u-1").await;

        let mut book = PlanBook::load(&client).await.unwrap();
        assert_eq!(book.plans()[0].id.as_deref(), Some("p-2"));

        book.delete(&client, &Id::from("p-2")).await.unwrap();
        assert_eq!(book.plans().len(), 1);
        assert_eq!(book.summaries().len(), 1);

        let calls = backend.calls();
        assert_eq!(
            &calls[calls.len() - 2..],
            &[
                Call::DeletePlan("p-2".to_string()),
                Call::PlansForUser("u-1".to_string())
            ]
        );
    }
}
