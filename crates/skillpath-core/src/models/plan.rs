//! Learning plan model definition.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use super::{dates, Task};

/// A learning plan as stored by the backend.
///
/// Every save sends the complete object; the backend never receives partial
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    /// Backend identifier, absent until the plan has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Owner of the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub background: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub scope: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Identifiers from the course catalogue, never checked against enrollment
    #[serde(default)]
    pub related_course_ids: Vec<String>,

    #[serde(default, with = "dates::optional")]
    pub start_date: Option<Date>,

    #[serde(default, with = "dates::optional")]
    pub end_date: Option<Date>,
}

impl LearningPlan {
    /// Number of tasks ticked off.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Returns the identifier or a validation error for unsaved plans.
    pub fn require_id(&self) -> crate::Result<&str> {
        self.id.as_deref().ok_or_else(|| {
            crate::ClientError::invalid_input("id")
                .with_reason("The learning plan has not been saved yet")
        })
    }
}

/// Older plans may carry `null` text fields; they read as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
