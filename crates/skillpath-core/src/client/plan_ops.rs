//! Plan operations for the Client.

use log::debug;

use super::Client;
use crate::{
    detail::sort_newest_first,
    display::{Courses, PlanSummaries},
    error::Result,
    events::AppEvent,
    models::{Course, LearningPlan, PlanSummary},
    params::Id,
};

impl Client {
    /// Creates a plan from a complete plan object. The backend receives the
    /// whole object in one request.
    pub async fn create_plan(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        let created = self.backend.create_plan(plan).await?;
        debug!("Created learning plan {:?}", created.id);
        self.events.publish(AppEvent::PlanCreated {
            plan_id: created.id.clone(),
        });
        Ok(created)
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<LearningPlan> {
        self.backend.get_plan(&params.id).await
    }

    /// Fetches every plan owned by `user_id`, in backend order.
    pub async fn plans_for_user(&self, user_id: &str) -> Result<Vec<LearningPlan>> {
        self.backend.plans_for_user(user_id).await
    }

    /// Fetches the logged-in user's plans, newest start date first.
    pub async fn my_plans(&self) -> Result<Vec<LearningPlan>> {
        let user = self.require_user().await?;
        let mut plans = self.plans_for_user(&user.id).await?;
        sort_newest_first(&mut plans);
        Ok(plans)
    }

    /// Replaces the stored plan with `plan`. Last write wins.
    pub async fn update_plan(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        let id = plan.require_id()?.to_string();
        let updated = self.backend.update_plan(&id, plan).await?;
        self.events.publish(AppEvent::PlanUpdated { plan_id: id });
        Ok(updated)
    }

    pub async fn delete_plan(&self, params: &Id) -> Result<()> {
        self.backend.delete_plan(&params.id).await?;
        self.events.publish(AppEvent::PlanDeleted {
            plan_id: params.id.clone(),
        });
        Ok(())
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        self.backend.list_courses().await
    }

    /// Summaries of the logged-in user's plans, ready for display.
    pub async fn list_plans_summary(&self) -> Result<PlanSummaries> {
        let plans = self.my_plans().await?;
        let summaries: Vec<PlanSummary> = plans.iter().map(Into::into).collect();
        Ok(PlanSummaries(summaries))
    }

    pub async fn list_courses_display(&self) -> Result<Courses> {
        self.list_courses().await.map(Courses)
    }
}
