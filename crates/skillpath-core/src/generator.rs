//! AI task generation round trip.
//!
//! A [`TaskGenerator`] collects skills and topics (optionally resumed from a
//! draft staged by the wizard), asks the backend for suggestions, tracks the
//! user's selection and finally creates one learning plan from it.
//!
//! Selection is keyed by task name. Two suggestions sharing a name are
//! indistinguishable: toggling one toggles both.

use jiff::civil::Date;
use log::{debug, info, warn};

use crate::{
    backend::Backend,
    client::Client,
    error::{ClientError, Result},
    models::{GeneratedTask, LearningPlan, PlanDraft, Task},
    params::GenerateTasks,
    store::Store,
    wizard::default_window,
};

pub const NO_INPUT_MESSAGE: &str = "Please add at least one skill or topic to generate tasks.";
pub const EMPTY_RESULT_NOTICE: &str =
    "No tasks were generated. Try adding more specific skills or topics.";
pub const NOTHING_SELECTED_MESSAGE: &str = "Please select at least one task to add.";

/// Fallback for server errors without a message of their own.
pub const GENERATION_FAILURE: &str = "Failed to generate tasks";
pub const COMMIT_FAILURE: &str = "Failed to create learning plan. Please try again.";

const REQUEST_TITLE: &str = "Temporary Plan";
const REQUEST_BACKGROUND: &str = "Generated using AI";
const PLAN_TITLE: &str = "AI Generated Learning Plan";
const PLAN_BACKGROUND: &str = "Generated using AI assistant";
const PLAN_SCOPE: &str = "AI Generated Tasks";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGenerator {
    skills: Vec<String>,
    topics: Vec<String>,
    prompt: Option<String>,
    staged: Option<PlanDraft>,
    suggestions: Vec<GeneratedTask>,
    selected: Vec<GeneratedTask>,
    notice: Option<&'static str>,
}

impl TaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a staged draft's skills and topics; the draft's other
    /// fields are used when committing.
    pub fn from_draft(draft: PlanDraft) -> Self {
        Self {
            skills: draft.skills.clone(),
            topics: draft.topics.clone(),
            staged: Some(draft),
            ..Self::default()
        }
    }

    /// Picks up whatever the wizard staged, or starts empty.
    pub async fn resume(store: &Store) -> Result<Self> {
        Ok(match store.staged_draft().await? {
            Some(draft) => {
                debug!("Resuming AI generation from staged draft '{}'", draft.title);
                Self::from_draft(draft)
            }
            None => Self::new(),
        })
    }

    /// Adds the skills, topics and prompt of `params` to the generator.
    pub fn apply(&mut self, params: &GenerateTasks) {
        for skill in &params.skills {
            self.add_skill(skill);
        }
        for topic in &params.topics {
            self.add_topic(topic);
        }
        if let Some(prompt) = &params.prompt {
            self.set_prompt(prompt);
        }
    }

    pub fn add_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        if !skill.is_empty() {
            self.skills.push(skill.to_string());
        }
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|existing| existing != skill);
    }

    pub fn add_topic(&mut self, topic: &str) {
        let topic = topic.trim();
        if !topic.is_empty() {
            self.topics.push(topic.to_string());
        }
    }

    pub fn remove_topic(&mut self, topic: &str) {
        self.topics.retain(|existing| existing != topic);
    }

    /// Free-text instructions. Blank text clears the prompt.
    pub fn set_prompt(&mut self, prompt: &str) {
        let prompt = prompt.trim();
        self.prompt = (!prompt.is_empty()).then(|| prompt.to_string());
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn staged(&self) -> Option<&PlanDraft> {
        self.staged.as_ref()
    }

    pub fn suggestions(&self) -> &[GeneratedTask] {
        &self.suggestions
    }

    pub fn selected(&self) -> &[GeneratedTask] {
        &self.selected
    }

    /// Soft failure from the last generation, such as an empty result.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Fails fast when there is nothing to generate from.
    pub fn validate(&self) -> Result<()> {
        if self.skills.is_empty() && self.topics.is_empty() {
            return Err(ClientError::invalid_input("skills").with_reason(NO_INPUT_MESSAGE));
        }
        Ok(())
    }

    /// The plan-shaped payload sent to the generator.
    pub fn generation_request(&self, today: Date) -> LearningPlan {
        let (start, end) = default_window(today);
        LearningPlan {
            title: REQUEST_TITLE.to_string(),
            background: self
                .prompt
                .clone()
                .unwrap_or_else(|| REQUEST_BACKGROUND.to_string()),
            skills: self.skills.clone(),
            topics: self.topics.clone(),
            tasks: Vec::new(),
            start_date: Some(start),
            end_date: Some(end),
            ..LearningPlan::default()
        }
    }

    /// Requests suggestions. Validation failures never reach the backend.
    ///
    /// An empty answer is not an error: it sets [`Self::notice`] instead.
    /// On failure the previous suggestions are kept.
    pub async fn generate(&mut self, backend: &dyn Backend, today: Date) -> Result<&[GeneratedTask]> {
        self.validate()?;
        self.notice = None;

        let request = self.generation_request(today);
        debug!(
            "Requesting AI tasks for {} skills and {} topics",
            request.skills.len(),
            request.topics.len()
        );
        let tasks = backend.generate_tasks(&request).await?;

        if tasks.is_empty() {
            self.notice = Some(EMPTY_RESULT_NOTICE);
        }
        info!("Received {} generated tasks", tasks.len());
        self.suggestions = tasks;
        Ok(&self.suggestions)
    }

    /// Flips selection of `task`. Returns whether it is now selected.
    pub fn toggle(&mut self, task: &GeneratedTask) -> bool {
        if self.is_selected(&task.task_name) {
            self.selected.retain(|t| t.task_name != task.task_name);
            false
        } else {
            self.selected.push(task.clone());
            true
        }
    }

    /// Toggles the suggestion named `name`.
    pub fn toggle_by_name(&mut self, name: &str) -> Result<bool> {
        let task = self
            .suggestions
            .iter()
            .find(|t| t.task_name == name)
            .cloned()
            .ok_or_else(|| {
                ClientError::invalid_input("task")
                    .with_reason(format!("No generated task named '{name}'"))
            })?;
        Ok(self.toggle(&task))
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|t| t.task_name == name)
    }

    /// Builds the plan that [`Self::commit`] would create.
    pub fn plan_for_commit(&self, user_id: Option<String>, today: Date) -> Result<LearningPlan> {
        if self.selected.is_empty() {
            return Err(ClientError::invalid_input("tasks").with_reason(NOTHING_SELECTED_MESSAGE));
        }

        let (default_start, default_end) = default_window(today);
        let staged = self.staged.as_ref();
        let pick = |value: Option<&String>, fallback: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        Ok(LearningPlan {
            id: None,
            user_id,
            title: pick(staged.map(|d| &d.title), PLAN_TITLE),
            background: pick(self.prompt.as_ref(), PLAN_BACKGROUND),
            scope: pick(staged.map(|d| &d.scope), PLAN_SCOPE),
            skills: self.skills.clone(),
            topics: self.topics.clone(),
            tasks: self.selected.iter().map(Task::from).collect(),
            related_course_ids: staged
                .map(|d| d.related_course_ids.clone())
                .unwrap_or_default(),
            start_date: staged.and_then(|d| d.start_date).or(Some(default_start)),
            end_date: staged.and_then(|d| d.end_date).or(Some(default_end)),
        })
    }

    /// Creates one plan from the selection and clears the staging slot.
    ///
    /// The slot is only cleared after the backend accepted the plan. Once
    /// it has, the commit succeeds even if clearing the slot fails, since a
    /// retry would create the plan twice.
    pub async fn commit(&mut self, client: &Client, today: Date) -> Result<LearningPlan> {
        let user = client.require_user().await?;
        let plan = self.plan_for_commit(Some(user.id), today)?;
        let created = client.create_plan(&plan).await?;

        if let Err(e) = client.store().clear_staged_draft().await {
            warn!("Plan created but the staged draft could not be cleared: {e}");
        }
        self.staged = None;
        Ok(created)
    }
}
