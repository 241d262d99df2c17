//! Command-line argument structures.
//!
//! Each clap struct converts into the core parameter types with `From`
//! impls (or an `into_*` method when one command expands into several core
//! values), keeping clap out of the core crate.
//!
//! Task, skill and topic positions are 1-based on the command line, matching
//! the numbered lists the CLI prints, and 0-based in the core.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use jiff::civil::Date;
use skillpath_core::{
    models::User, GenerateTasks, Id, PlanEdit, TaskPosition, ToggleFollow,
};

/// Log in by storing a user record
#[derive(Args)]
pub struct LoginArgs {
    #[arg(help = "Identifier of the user on the platform")]
    pub user_id: String,
    #[arg(long, help = "Display name")]
    pub name: Option<String>,
    #[arg(long, help = "Email address")]
    pub email: Option<String>,
}

impl From<LoginArgs> for User {
    fn from(val: LoginArgs) -> Self {
        User {
            name: val.name,
            email: val.email,
            ..User::with_id(val.user_id)
        }
    }
}

/// Refer to a plan by its identifier
#[derive(Args)]
pub struct PlanIdArgs {
    #[arg(help = "Identifier of the learning plan")]
    pub id: String,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Toggle completion of one task
#[derive(Args)]
pub struct CheckTaskArgs {
    #[arg(help = "Identifier of the learning plan")]
    pub id: String,
    #[arg(
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Position of the task as listed by `plan show` (1 = first)"
    )]
    pub index: u64,
}

impl From<CheckTaskArgs> for TaskPosition {
    fn from(val: CheckTaskArgs) -> Self {
        TaskPosition {
            plan_id: val.id,
            index: to_offset(val.index),
        }
    }
}

/// Create a learning plan through the four wizard steps
///
/// Basics (title, background, scope) and at least one skill are required.
/// Dates are validated like the interactive form: a past start date becomes
/// today and an end date before the start becomes the start date.
#[derive(Args)]
pub struct CreatePlanArgs {
    #[arg(long, default_value = "", help = "Title of the plan")]
    pub title: String,
    #[arg(long, default_value = "", help = "Your current background")]
    pub background: String,
    #[arg(long, default_value = "", help = "What the plan should cover")]
    pub scope: String,
    #[arg(long = "skill", help = "Skill to learn (repeatable)")]
    pub skills: Vec<String>,
    #[arg(long = "topic", help = "Topic to cover (repeatable)")]
    pub topics: Vec<String>,
    #[arg(long, help = "Start date (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(long, help = "End date (YYYY-MM-DD)")]
    pub end: Option<Date>,
    #[arg(
        long = "task",
        value_name = "NAME[:DESCRIPTION]",
        help = "Task to add (repeatable)"
    )]
    pub tasks: Vec<String>,
    #[arg(long = "course", help = "Related course identifier (repeatable)")]
    pub courses: Vec<String>,
    #[arg(
        long,
        help = "Stage the draft for `ai generate` instead of creating the plan"
    )]
    pub stage: bool,
}

/// Splits `NAME[:DESCRIPTION]`.
pub fn split_task(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((name, description)) => (name.trim(), description.trim()),
        None => (raw.trim(), ""),
    }
}

/// Edit an existing learning plan
///
/// All edits are applied locally and saved with a single update. Removals
/// are applied from the highest position down so the positions given all
/// refer to the plan as it was before editing.
#[derive(Args)]
pub struct EditPlanArgs {
    #[arg(help = "Identifier of the learning plan")]
    pub id: String,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(long, help = "New background")]
    pub background: Option<String>,
    #[arg(long, help = "New scope")]
    pub scope: Option<String>,
    #[arg(long = "add-skill", help = "Skill to add (repeatable)")]
    pub add_skills: Vec<String>,
    #[arg(long = "remove-skill", value_parser = clap::value_parser!(u64).range(1..), help = "Position of a skill to remove")]
    pub remove_skills: Vec<u64>,
    #[arg(long = "add-topic", help = "Topic to add (repeatable)")]
    pub add_topics: Vec<String>,
    #[arg(long = "remove-topic", value_parser = clap::value_parser!(u64).range(1..), help = "Position of a topic to remove")]
    pub remove_topics: Vec<u64>,
    #[arg(long = "add-task", value_name = "NAME[:DESCRIPTION]", help = "Task to add (repeatable)")]
    pub add_tasks: Vec<String>,
    #[arg(long = "toggle-task", value_parser = clap::value_parser!(u64).range(1..), help = "Position of a task to mark done/undone")]
    pub toggle_tasks: Vec<u64>,
    #[arg(long = "delete-task", value_parser = clap::value_parser!(u64).range(1..), help = "Position of a task to delete")]
    pub delete_tasks: Vec<u64>,
    #[arg(long, help = "New start date (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(long, help = "New end date (YYYY-MM-DD)")]
    pub end: Option<Date>,
    #[arg(long = "add-course", help = "Related course to link (repeatable)")]
    pub add_courses: Vec<String>,
    #[arg(long = "remove-course", help = "Related course to unlink (repeatable)")]
    pub remove_courses: Vec<String>,
}

impl EditPlanArgs {
    /// Converts the flags into the plan id and an ordered list of edits.
    pub fn into_edits(self) -> (Id, Vec<PlanEdit>) {
        let mut edits = Vec::new();

        edits.extend(self.title.map(PlanEdit::SetTitle));
        edits.extend(self.background.map(PlanEdit::SetBackground));
        edits.extend(self.scope.map(PlanEdit::SetScope));

        edits.extend(descending(self.remove_skills).map(PlanEdit::RemoveSkill));
        edits.extend(self.add_skills.into_iter().map(PlanEdit::AddSkill));
        edits.extend(descending(self.remove_topics).map(PlanEdit::RemoveTopic));
        edits.extend(self.add_topics.into_iter().map(PlanEdit::AddTopic));

        edits.extend(self.toggle_tasks.into_iter().map(|i| PlanEdit::ToggleTask(to_offset(i))));
        edits.extend(descending(self.delete_tasks).map(PlanEdit::DeleteTask));
        edits.extend(self.add_tasks.iter().map(|raw| {
            let (name, description) = split_task(raw);
            PlanEdit::AddTask {
                name: name.to_string(),
                description: description.to_string(),
            }
        }));

        if let Some(start) = self.start {
            edits.push(PlanEdit::SetStartDate(Some(start)));
        }
        if let Some(end) = self.end {
            edits.push(PlanEdit::SetEndDate(Some(end)));
        }

        edits.extend(self.remove_courses.into_iter().map(PlanEdit::RemoveCourse));
        edits.extend(self.add_courses.into_iter().map(PlanEdit::AddCourse));

        (Id { id: self.id }, edits)
    }
}

fn to_offset(position: u64) -> usize {
    usize::try_from(position.saturating_sub(1)).unwrap_or(usize::MAX)
}

/// 1-based positions as distinct 0-based offsets, highest first.
fn descending(positions: Vec<u64>) -> impl Iterator<Item = usize> {
    let mut offsets: Vec<usize> = positions.into_iter().map(to_offset).collect();
    offsets.sort_unstable_by(|a, b| b.cmp(a));
    offsets.dedup();
    offsets.into_iter()
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List your learning plans, newest first
    #[command(alias = "l")]
    List,
    /// Show a learning plan with its tasks
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Create a learning plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Edit a learning plan
    #[command(alias = "e")]
    Edit(EditPlanArgs),
    /// Mark a task done or not done
    Check(CheckTaskArgs),
    /// Delete a learning plan
    #[command(alias = "d")]
    Delete(PlanIdArgs),
}

/// Generate tasks from skills and topics
///
/// Skills and topics staged with `plan create --stage` are used as a
/// starting point; flags add to them.
#[derive(Args)]
pub struct GenerateArgs {
    #[arg(long = "skill", help = "Skill to generate tasks for (repeatable)")]
    pub skills: Vec<String>,
    #[arg(long = "topic", help = "Topic to generate tasks for (repeatable)")]
    pub topics: Vec<String>,
    #[arg(long, help = "Extra instructions for the AI assistant")]
    pub prompt: Option<String>,
    #[arg(
        long = "select",
        value_name = "TASK NAME",
        help = "Select a generated task by name (repeatable)"
    )]
    pub select: Vec<String>,
    #[arg(long, help = "Create a learning plan from the selected tasks")]
    pub commit: bool,
}

impl From<&GenerateArgs> for GenerateTasks {
    fn from(val: &GenerateArgs) -> Self {
        GenerateTasks {
            skills: val.skills.clone(),
            topics: val.topics.clone(),
            prompt: val.prompt.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum AiCommands {
    /// Ask the AI assistant for tasks
    #[command(alias = "g")]
    Generate(GenerateArgs),
}

#[derive(Subcommand)]
pub enum CourseCommands {
    /// List all courses
    List,
}

#[derive(Args)]
pub struct PostIdArgs {
    #[arg(help = "Identifier of the post")]
    pub post_id: String,
}

#[derive(Subcommand)]
pub enum SavedCommands {
    /// Save or unsave a post
    Toggle(PostIdArgs),
    /// List saved posts
    List,
    /// Show how many posts are saved
    Count,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(help = "Name or email fragment")]
    pub query: String,
}

/// Toggle a follow. Without `--unfollow` the current state is read from the
/// server first, so following someone already followed unfollows them.
#[derive(Args)]
pub struct FollowArgs {
    #[arg(help = "Identifier of the user to follow")]
    pub target_id: String,
    #[arg(long, help = "Unfollow without checking the current state")]
    pub unfollow: bool,
}

impl From<FollowArgs> for ToggleFollow {
    fn from(val: FollowArgs) -> Self {
        ToggleFollow {
            target_id: val.target_id,
            currently_following: val.unfollow.then_some(true),
        }
    }
}

/// Refer to a user, defaulting to the logged-in one
#[derive(Args)]
pub struct UserRefArgs {
    #[arg(help = "Identifier of the user (defaults to you)")]
    pub user_id: Option<String>,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Search for users
    Search(SearchArgs),
    /// Follow a user, or unfollow one you already follow
    Follow(FollowArgs),
    /// Show follower and following counts
    Stats(UserRefArgs),
    /// List a user's followers
    Followers(UserRefArgs),
    /// List the users someone follows
    Following(UserRefArgs),
}

/// Publish a post with up to three images or one video
#[derive(Args)]
pub struct CreatePostArgs {
    #[arg(long, short, default_value = "", help = "Description (at most 50 words)")]
    pub description: String,
    #[arg(long = "media", short, value_name = "PATH", help = "Image or video file (repeatable)")]
    pub media: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ListPostsArgs {
    #[arg(long, help = "Show another user's posts")]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct EditPostArgs {
    #[arg(help = "Identifier of the post")]
    pub post_id: String,
    #[arg(long, short, help = "New description (at most 50 words)")]
    pub description: String,
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a new post
    Create(CreatePostArgs),
    /// List your posts, or another user's
    List(ListPostsArgs),
    /// Change a post's description
    Edit(EditPostArgs),
    /// Delete one of your posts
    Delete(PostIdArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_args(id: &str) -> EditPlanArgs {
        EditPlanArgs {
            id: id.to_string(),
            title: None,
            background: None,
            scope: None,
            add_skills: vec![],
            remove_skills: vec![],
            add_topics: vec![],
            remove_topics: vec![],
            add_tasks: vec![],
            toggle_tasks: vec![],
            delete_tasks: vec![],
            start: None,
            end: None,
            add_courses: vec![],
            remove_courses: vec![],
        }
    }

    #[test]
    fn test_split_task() {
        assert_eq!(split_task("Read: chapter 4"), ("Read", "chapter 4"));
        assert_eq!(split_task("Just a name"), ("Just a name", ""));
        assert_eq!(split_task("a:b:c"), ("a", "b:c"));
    }

    #[test]
    fn test_removals_run_highest_first() {
        let mut args = edit_args("p-1");
        args.delete_tasks = vec![1, 3, 3];
        args.toggle_tasks = vec![2];

        let (id, edits) = args.into_edits();
        assert_eq!(id.id, "p-1");
        assert_eq!(
            edits,
            vec![
                PlanEdit::ToggleTask(1),
                PlanEdit::DeleteTask(2),
                PlanEdit::DeleteTask(0),
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let position: TaskPosition = CheckTaskArgs {
            id: "p".to_string(),
            index: 1,
        }
        .into();
        assert_eq!(position.index, 0);
    }

    #[test]
    fn test_follow_state_is_only_assumed_with_unfollow_flag() {
        let params: ToggleFollow = FollowArgs {
            target_id: "u-2".to_string(),
            unfollow: true,
        }
        .into();
        assert_eq!(params.currently_following, Some(true));

        let params: ToggleFollow = FollowArgs {
            target_id: "u-2".to_string(),
            unfollow: false,
        }
        .into();
        assert_eq!(params.currently_following, None);
    }
}
