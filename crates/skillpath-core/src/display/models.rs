//! Display implementations for domain models.
//!
//! All output is markdown so the CLI renderer can style it; plain terminals
//! still get readable text.

use std::fmt;

use super::datetime::Timeline;
use crate::models::{
    Course, FollowStats, GeneratedTask, LearningPlan, PlanSummary, Post, Task, User,
};

impl fmt::Display for LearningPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        if let Some(id) = &self.id {
            writeln!(f, "- ID: {id}")?;
        }
        if !self.scope.is_empty() {
            writeln!(f, "- Scope: {}", self.scope)?;
        }
        writeln!(f, "- Timeline: {}", Timeline(self.start_date, self.end_date))?;
        writeln!(
            f,
            "- Progress: {}/{} tasks",
            self.completed_tasks(),
            self.tasks.len()
        )?;

        if !self.background.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.background)?;
        }

        write_list(f, "Skills", &self.skills)?;
        write_list(f, "Topics", &self.topics)?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks added yet.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for (index, task) in self.tasks.iter().enumerate() {
                write!(f, "{}. {task}", index + 1)?;
            }
        }

        write_list(f, "Related Courses", &self.related_course_ids)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n## {heading}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.task_description.is_empty() {
            writeln!(f, "{} {}", self.checkbox(), self.task_name)
        } else {
            writeln!(
                f,
                "{} {}: {}",
                self.checkbox(),
                self.task_name,
                self.task_description
            )
        }
    }
}

impl fmt::Display for GeneratedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}**", self.task_name)?;
        if !self.task_description.is_empty() {
            writeln!(f, "{}", self.task_description)?;
        }
        if let Some(objective) = &self.objective {
            writeln!(f, "- Objective: {objective}")?;
        }
        if let Some(time) = &self.estimated_time {
            writeln!(f, "- Estimated time: {time}")?;
        }
        if !self.suggested_resources.is_empty() {
            writeln!(f, "- Resources:")?;
            for resource in &self.suggested_resources {
                writeln!(f, "  - {resource}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.completed_tasks, self.total_tasks)
        } else {
            String::new()
        };

        match &self.id {
            Some(id) => writeln!(f, "## {} (ID: {id}){progress}", self.title)?,
            None => writeln!(f, "## {}{progress}", self.title)?,
        }
        writeln!(f)?;

        if !self.scope.is_empty() {
            writeln!(f, "- **Scope**: {}", self.scope)?;
        }
        writeln!(
            f,
            "- **Timeline**: {}",
            Timeline(self.start_date, self.end_date)
        )?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (ID: {})", self.display_name(), self.id)?;
        if let Some(category) = &self.category {
            write!(f, " [{category}]")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (ID: {})", self.display_name(), self.id)?;
        if let Some(email) = &self.email {
            write!(f, " <{email}>")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- Post {}", self.id)?;
        if let Some(author) = &self.user_id {
            write!(f, " by {author}")?;
        }
        if let Some(text) = self.description.as_deref().filter(|t| !t.is_empty()) {
            write!(f, ": {text}")?;
        }
        if self.video_url.is_some() {
            write!(f, " _(video)_")?;
        } else if !self.image_urls.is_empty() {
            write!(f, " _({} image(s))_", self.image_urls.len())?;
        }
        writeln!(f)
    }
}

impl fmt::Display for FollowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "**Followers**: {} | **Following**: {}",
            self.followers, self.following
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_line_mentions_media() {
        let post = Post {
            id: "post-1".to_string(),
            user_id: Some("u-1".to_string()),
            description: Some("Hello".to_string()),
            image_urls: vec!["https://a".to_string(), "https://b".to_string()],
            ..Default::default()
        };
        assert_eq!(post.to_string(), "- Post post-1 by u-1: Hello _(2 image(s))_\n");
    }

    #[test]
    fn test_follow_stats_line() {
        let stats = FollowStats {
            followers: 2,
            following: 7,
        };
        assert_eq!(stats.to_string(), "**Followers**: 2 | **Following**: 7\n");
    }
}
