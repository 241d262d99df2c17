//! Parameter structures shared by the library and its front ends.
//!
//! These types carry no framework derives. The CLI defines its own clap
//! structs and converts them with `From` impls, so the core stays free of
//! interface concerns.

use jiff::civil::Date;

/// Identifies a learning plan on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    pub id: String,
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Addresses one task of a plan by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPosition {
    pub plan_id: String,
    pub index: usize,
}

/// Input for an AI task generation round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateTasks {
    pub skills: Vec<String>,
    pub topics: Vec<String>,
    pub prompt: Option<String>,
}

/// Follow or unfollow another user.
///
/// When the caller does not know the current state, it is read from the
/// backend before toggling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFollow {
    pub target_id: String,
    pub currently_following: Option<bool>,
}

/// A single change applied by the plan editor.
///
/// Indexes refer to positions in the plan as it stands when the edit is
/// applied; out-of-range indexes are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEdit {
    SetTitle(String),
    SetBackground(String),
    SetScope(String),
    AddSkill(String),
    RemoveSkill(usize),
    AddTopic(String),
    RemoveTopic(usize),
    AddTask { name: String, description: String },
    RenameTask { index: usize, name: String },
    DescribeTask { index: usize, description: String },
    ToggleTask(usize),
    DeleteTask(usize),
    SetStartDate(Option<Date>),
    SetEndDate(Option<Date>),
    AddCourse(String),
    RemoveCourse(String),
}
