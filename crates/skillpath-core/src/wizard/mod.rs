//! The four-step "create learning plan" wizard.
//!
//! The current step is an explicit [`WizardStep`] and moving forward goes
//! through [`check_transition`], a pure function that either yields the next
//! step or a [`StepRejection`] naming the guard that failed:
//!
//! ```text
//! Basics ──title, background, scope──▶ SkillsTopics ──≥1 skill──▶ Timeline ──start ≤ end──▶ Tasks ──submit──▶ POST /learningplans
//! ```
//!
//! Going back is never guarded. The draft lives only in memory until it is
//! either submitted whole or staged in the [`Store`] for the AI generator.

use std::fmt;

use jiff::civil::Date;
use log::debug;

use crate::{
    client::Client,
    error::{ClientError, Result},
    models::{LearningPlan, PlanDraft, Task},
    store::Store,
};

pub mod timeline;


pub use timeline::{default_window, today, validate_end, validate_start, DateEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Basics,
    SkillsTopics,
    Timeline,
    Tasks,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basics,
        WizardStep::SkillsTopics,
        WizardStep::Timeline,
        WizardStep::Tasks,
    ];

    /// One-based position, as shown in "Step 2 of 4".
    pub fn number(self) -> usize {
        match self {
            WizardStep::Basics => 1,
            WizardStep::SkillsTopics => 2,
            WizardStep::Timeline => 3,
            WizardStep::Tasks => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basic Information",
            WizardStep::SkillsTopics => "Skills & Topics",
            WizardStep::Timeline => "Timeline",
            WizardStep::Tasks => "Tasks",
        }
    }

    /// The following step, clamped at `Tasks`.
    pub fn next(self) -> Self {
        match self {
            WizardStep::Basics => WizardStep::SkillsTopics,
            WizardStep::SkillsTopics => WizardStep::Timeline,
            WizardStep::Timeline | WizardStep::Tasks => WizardStep::Tasks,
        }
    }

    /// The preceding step, clamped at `Basics`.
    pub fn previous(self) -> Self {
        match self {
            WizardStep::Basics | WizardStep::SkillsTopics => WizardStep::Basics,
            WizardStep::Timeline => WizardStep::SkillsTopics,
            WizardStep::Tasks => WizardStep::Timeline,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {}: {}",
            self.number(),
            Self::ALL.len(),
            self.label()
        )
    }
}

/// Why the wizard refused to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepRejection {
    /// Required basics that are blank after trimming, in form order
    MissingBasics { fields: Vec<&'static str> },
    NoSkills,
    /// Both dates are set and the end comes first
    EndBeforeStart,
}

impl fmt::Display for StepRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRejection::MissingBasics { fields } => {
                write!(f, "Please fill in all required fields: {}", fields.join(", "))
            }
            StepRejection::NoSkills => write!(f, "Please add at least one skill"),
            StepRejection::EndBeforeStart => f.write_str(timeline::END_BEFORE_START_ALERT),
        }
    }
}

impl std::error::Error for StepRejection {}

impl From<StepRejection> for ClientError {
    fn from(rejection: StepRejection) -> Self {
        let field = match &rejection {
            StepRejection::MissingBasics { fields } => fields.join(", "),
            StepRejection::NoSkills => "skills".to_string(),
            StepRejection::EndBeforeStart => "end_date".to_string(),
        };
        ClientError::invalid_input(field).with_reason(rejection.to_string())
    }
}

/// Decides whether `draft` may leave `step`.
pub fn check_transition(
    step: WizardStep,
    draft: &PlanDraft,
) -> std::result::Result<WizardStep, StepRejection> {
    match step {
        WizardStep::Basics => {
            let fields = draft.missing_basics();
            if !fields.is_empty() {
                return Err(StepRejection::MissingBasics { fields });
            }
        }
        WizardStep::SkillsTopics => {
            if !draft.has_skills() {
                return Err(StepRejection::NoSkills);
            }
        }
        WizardStep::Timeline => {
            if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
                if end < start {
                    return Err(StepRejection::EndBeforeStart);
                }
            }
        }
        WizardStep::Tasks => {}
    }
    Ok(step.next())
}

/// A draft plan and the step it is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: PlanDraft,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reopens the wizard on the first step with an existing draft.
    pub fn from_draft(draft: PlanDraft) -> Self {
        Self {
            step: WizardStep::Basics,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &PlanDraft {
        &self.draft
    }

    pub fn into_draft(self) -> PlanDraft {
        self.draft
    }

    /// Moves one step forward if the current step's guard holds.
    pub fn advance(&mut self) -> std::result::Result<WizardStep, StepRejection> {
        let next = check_transition(self.step, &self.draft)?;
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        self.draft.background = background.into();
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.draft.scope = scope.into();
    }

    /// Appends a skill. Blank input is ignored; duplicates are allowed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        push_trimmed(&mut self.draft.skills, skill)
    }

    /// Removes every skill equal to `skill`.
    pub fn remove_skill(&mut self, skill: &str) {
        self.draft.skills.retain(|existing| existing != skill);
    }

    pub fn add_topic(&mut self, topic: &str) -> bool {
        push_trimmed(&mut self.draft.topics, topic)
    }

    pub fn remove_topic(&mut self, index: usize) -> Option<String> {
        (index < self.draft.topics.len()).then(|| self.draft.topics.remove(index))
    }

    /// Appends an uncompleted task unless the name is blank.
    pub fn add_task(&mut self, name: &str, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.draft.tasks.push(Task::new(name, description.trim()));
        true
    }

    pub fn remove_task(&mut self, index: usize) -> Option<Task> {
        (index < self.draft.tasks.len()).then(|| self.draft.tasks.remove(index))
    }

    pub fn add_course(&mut self, course_id: &str) -> bool {
        let course_id = course_id.trim();
        if course_id.is_empty() || self.draft.related_course_ids.iter().any(|c| c == course_id) {
            return false;
        }
        self.draft.related_course_ids.push(course_id.to_string());
        true
    }

    pub fn remove_course(&mut self, course_id: &str) {
        self.draft.related_course_ids.retain(|c| c != course_id);
    }

    /// Validates and stores a start date. An end date that would now come
    /// before the start is moved up to it.
    pub fn set_start_date(&mut self, candidate: Date, today: Date) -> DateEdit {
        let edit = validate_start(candidate, today);
        let start = edit.value();
        self.draft.start_date = Some(start);
        if self.draft.end_date.is_some_and(|end| end < start) {
            debug!("End date moved up to the new start {start}");
            self.draft.end_date = Some(start);
        }
        edit
    }

    pub fn set_end_date(&mut self, candidate: Date, today: Date) -> DateEdit {
        let edit = validate_end(candidate, self.draft.start_date, today);
        self.draft.end_date = Some(edit.value());
        edit
    }

    /// Creates the plan from the whole draft on behalf of the logged-in user.
    ///
    /// Only allowed on the last step. Every guard is checked again so a
    /// draft emptied after advancing is never sent. On failure the wizard is
    /// untouched and the caller may retry.
    pub async fn submit(&self, client: &Client) -> Result<LearningPlan> {
        if self.step != WizardStep::Tasks {
            return Err(ClientError::invalid_input("step").with_reason(format!(
                "Finish the remaining steps before creating the plan ({})",
                self.step
            )));
        }
        check_transition(WizardStep::Basics, &self.draft)?;
        check_transition(WizardStep::SkillsTopics, &self.draft)?;
        check_transition(WizardStep::Timeline, &self.draft)?;

        let user = client.require_user().await?;
        let plan = self.draft.to_plan(Some(user.id));
        debug!(
            "Submitting learning plan '{}' with {} tasks",
            plan.title,
            plan.tasks.len()
        );
        client.create_plan(&plan).await
    }

    /// Hands the draft to the AI task generator through the store.
    pub async fn stage_for_ai(&self, store: &Store) -> Result<()> {
        store.stage_draft(&self.draft).await
    }
}

fn push_trimmed(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}
