//! Task model and the AI-suggested task shape.

use serde::{Deserialize, Serialize};

/// A single task inside a learning plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Short name of the task
    pub task_name: String,

    /// Free-text description, empty when none was given
    #[serde(default)]
    pub task_description: String,

    /// Whether the learner has ticked the task off
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_name: name.into(),
            task_description: description.into(),
            completed: false,
        }
    }

    /// Checkbox marker used in markdown output.
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// A task suggested by the backend's AI generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTask {
    pub task_name: String,

    #[serde(default)]
    pub task_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_resources: Vec<String>,
}

impl From<GeneratedTask> for Task {
    fn from(task: GeneratedTask) -> Self {
        Task::new(task.task_name, task.task_description)
    }
}

impl From<&GeneratedTask> for Task {
    fn from(task: &GeneratedTask) -> Self {
        Task::new(task.task_name.clone(), task.task_description.clone())
    }
}

/// Response body of the task generation endpoint.
///
/// `tasks` stays optional so that a body without it can be reported as a
/// malformed response instead of an empty suggestion list.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTasksResponse {
    pub tasks: Option<Vec<GeneratedTask>>,
}
