//! Plan summary types for list views.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::LearningPlan;

/// Summary information about a plan with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID, absent for drafts
    pub id: Option<String>,
    /// Title of the plan
    pub title: String,
    /// Scope line shown under the title
    pub scope: String,
    /// First day of the plan
    pub start_date: Option<Date>,
    /// Last day of the plan
    pub end_date: Option<Date>,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
}

impl From<&LearningPlan> for PlanSummary {
    fn from(plan: &LearningPlan) -> Self {
        Self {
            id: plan.id.clone(),
            title: plan.title.clone(),
            scope: plan.scope.clone(),
            start_date: plan.start_date,
            end_date: plan.end_date,
            total_tasks: plan.tasks.len() as u32,
            completed_tasks: plan.completed_tasks() as u32,
        }
    }
}
