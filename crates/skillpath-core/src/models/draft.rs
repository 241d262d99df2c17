//! The in-memory learning plan draft built up by the creation wizard.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{dates, LearningPlan, Task};

/// A learning plan that has not been persisted yet.
///
/// Drafts are also what gets staged in the local store when the user hands
/// off to the AI task generator, so they serialize with the same keys as
/// [`LearningPlan`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub related_course_ids: Vec<String>,
    #[serde(default, with = "dates::optional")]
    pub start_date: Option<Date>,
    #[serde(default, with = "dates::optional")]
    pub end_date: Option<Date>,
}

impl PlanDraft {
    /// Names of the basic text fields that are blank after trimming.
    pub fn missing_basics(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("background", &self.background),
            ("scope", &self.scope),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }

    /// Builds the complete plan object sent on creation.
    pub fn to_plan(&self, user_id: Option<String>) -> LearningPlan {
        LearningPlan {
            id: None,
            user_id,
            title: self.title.clone(),
            background: self.background.clone(),
            scope: self.scope.clone(),
            skills: self.skills.clone(),
            topics: self.topics.clone(),
            tasks: self.tasks.clone(),
            related_course_ids: self.related_course_ids.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
