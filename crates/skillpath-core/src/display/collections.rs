//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a one-line message so callers
//! never print a blank screen.

use std::{fmt, ops::Index};

use crate::models::{Course, GeneratedTask, PlanSummary, Post, User};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use skillpath_core::{display::PlanSummaries, models::{LearningPlan, PlanSummary}};
///
/// let plan = LearningPlan {
///     id: Some("p1".to_string()),
///     title: "My Plan".to_string(),
///     ..Default::default()
/// };
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// assert!(summaries.to_string().contains("## My Plan (ID: p1)"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No learning plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for the course catalogue.
pub struct Courses(pub Vec<Course>);

impl fmt::Display for Courses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No courses found.");
        }
        for course in &self.0 {
            write!(f, "{course}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for user search results.
pub struct Users(pub Vec<User>);

impl fmt::Display for Users {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No users found.");
        }
        for user in &self.0 {
            write!(f, "{user}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for a list of posts (saved or authored).
pub struct Posts(pub Vec<Post>);

impl fmt::Display for Posts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No posts yet.");
        }
        for post in &self.0 {
            write!(f, "{post}")?;
        }
        Ok(())
    }
}

/// AI-suggested tasks together with the current selection.
///
/// Selection is matched by task name, the same key the generator uses.
pub struct Suggestions<'a> {
    pub tasks: &'a [GeneratedTask],
    pub selected: &'a [GeneratedTask],
}

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return writeln!(f, "No generated tasks.");
        }
        writeln!(f, "## Generated Tasks")?;
        writeln!(f)?;
        for (index, task) in self.tasks.iter().enumerate() {
            let picked = self
                .selected
                .iter()
                .any(|chosen| chosen.task_name == task.task_name);
            write!(f, "{}. {} {task}", index + 1, if picked { "[x]" } else { "[ ]" })?;
            writeln!(f)?;
        }
        Ok(())
    }
}
