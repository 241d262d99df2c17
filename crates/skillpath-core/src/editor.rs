//! Tabbed editor for an existing learning plan.
//!
//! Unlike the creation wizard, no tab is guarded: any tab can be selected at
//! any time and edits are applied to a local copy. Saving sends the whole
//! plan in one `PUT`, with no conflict detection against other sessions.

use std::fmt;

use crate::{
    client::Client,
    display::UpdateResult,
    error::{ClientError, Result},
    models::{LearningPlan, Task},
    params::{Id, PlanEdit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorTab {
    #[default]
    Basic,
    SkillsTopics,
    Tasks,
    Timeline,
}

impl EditorTab {
    pub const ALL: [EditorTab; 4] = [
        EditorTab::Basic,
        EditorTab::SkillsTopics,
        EditorTab::Tasks,
        EditorTab::Timeline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorTab::Basic => "Basic",
            EditorTab::SkillsTopics => "Skills & Topics",
            EditorTab::Tasks => "Tasks",
            EditorTab::Timeline => "Timeline",
        }
    }
}

impl fmt::Display for EditorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Local working copy of a plan plus the edits made since the last save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEditor {
    plan: LearningPlan,
    tab: EditorTab,
    changes: Vec<String>,
}

impl PlanEditor {
    pub fn new(plan: LearningPlan) -> Self {
        Self {
            plan,
            tab: EditorTab::default(),
            changes: Vec::new(),
        }
    }

    /// Fetches the plan and opens it on the first tab.
    pub async fn open(client: &Client, params: &Id) -> Result<Self> {
        client.get_plan(params).await.map(Self::new)
    }

    pub fn plan(&self) -> &LearningPlan {
        &self.plan
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Descriptions of the edits applied since the last save.
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Applies one edit to the working copy.
    ///
    /// Returns `Ok(None)` when the edit was ignored (blank input) and an
    /// error when an index is out of range.
    pub fn apply(&mut self, edit: PlanEdit) -> Result<Option<String>> {
        let plan = &mut self.plan;
        let change = match edit {
            PlanEdit::SetTitle(title) => {
                plan.title = title;
                Some(format!("Title set to '{}'", plan.title))
            }
            PlanEdit::SetBackground(background) => {
                plan.background = background;
                Some("Background updated".to_string())
            }
            PlanEdit::SetScope(scope) => {
                plan.scope = scope;
                Some("Scope updated".to_string())
            }
            PlanEdit::AddSkill(skill) => {
                push_trimmed(&mut plan.skills, &skill).map(|s| format!("Added skill '{s}'"))
            }
            PlanEdit::RemoveSkill(index) => {
                let skill = take(&mut plan.skills, index, "skill")?;
                Some(format!("Removed skill '{skill}'"))
            }
            PlanEdit::AddTopic(topic) => {
                push_trimmed(&mut plan.topics, &topic).map(|t| format!("Added topic '{t}'"))
            }
            PlanEdit::RemoveTopic(index) => {
                let topic = take(&mut plan.topics, index, "topic")?;
                Some(format!("Removed topic '{topic}'"))
            }
            PlanEdit::AddTask { name, description } => {
                let name = name.trim();
                if name.is_empty() {
                    None
                } else {
                    plan.tasks.push(Task::new(name, description.trim()));
                    Some(format!("Added task '{name}'"))
                }
            }
            PlanEdit::RenameTask { index, name } => {
                let task = task_mut(&mut plan.tasks, index)?;
                let name = name.trim();
                if name.is_empty() {
                    None
                } else {
                    let change = format!("Renamed task '{}' to '{name}'", task.task_name);
                    task.task_name = name.to_string();
                    Some(change)
                }
            }
            PlanEdit::DescribeTask { index, description } => {
                let task = task_mut(&mut plan.tasks, index)?;
                task.task_description = description;
                Some(format!("Updated description of '{}'", task.task_name))
            }
            PlanEdit::ToggleTask(index) => {
                let task = task_mut(&mut plan.tasks, index)?;
                task.completed = !task.completed;
                let state = if task.completed { "complete" } else { "incomplete" };
                Some(format!("Marked '{}' {state}", task.task_name))
            }
            PlanEdit::DeleteTask(index) => {
                let task = take(&mut plan.tasks, index, "task")?;
                Some(format!("Deleted task '{}'", task.task_name))
            }
            PlanEdit::SetStartDate(date) => {
                plan.start_date = date;
                Some(describe_date("Start date", date))
            }
            PlanEdit::SetEndDate(date) => {
                plan.end_date = date;
                Some(describe_date("End date", date))
            }
            PlanEdit::AddCourse(course_id) => {
                let course_id = course_id.trim();
                if course_id.is_empty() || plan.related_course_ids.iter().any(|c| c == course_id)
                {
                    None
                } else {
                    plan.related_course_ids.push(course_id.to_string());
                    Some(format!("Linked course {course_id}"))
                }
            }
            PlanEdit::RemoveCourse(course_id) => {
                let before = plan.related_course_ids.len();
                plan.related_course_ids.retain(|c| *c != course_id);
                (plan.related_course_ids.len() != before)
                    .then(|| format!("Unlinked course {course_id}"))
            }
        };

        if let Some(change) = &change {
            self.changes.push(change.clone());
        }
        Ok(change)
    }

    /// Sends the complete working copy to the backend.
    ///
    /// On success the pending change list is reset; on failure the working
    /// copy is kept so the save can be retried.
    pub async fn save(&mut self, client: &Client) -> Result<UpdateResult<LearningPlan>> {
        let saved = client.update_plan(&self.plan).await?;
        let changes = std::mem::take(&mut self.changes);
        Ok(UpdateResult::with_changes(saved, changes))
    }
}

fn push_trimmed(list: &mut Vec<String>, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    list.push(value.to_string());
    Some(value.to_string())
}

fn out_of_range(what: &str, index: usize, len: usize) -> ClientError {
    ClientError::invalid_input(what)
        .with_reason(format!("No {what} at position {index} (plan has {len})"))
}

fn take<T>(list: &mut Vec<T>, index: usize, what: &str) -> Result<T> {
    if index >= list.len() {
        return Err(out_of_range(what, index, list.len()));
    }
    Ok(list.remove(index))
}

fn task_mut(tasks: &mut [Task], index: usize) -> Result<&mut Task> {
    let len = tasks.len();
    tasks.get_mut(index).ok_or_else(|| out_of_range("task", index, len))
}

fn describe_date(field: &str, date: Option<jiff::civil::Date>) -> String {
    match date {
        Some(date) => format!("{field} set to {date}"),
        None => format!("{field} cleared"),
    }
}
