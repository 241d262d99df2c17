//! Data models for learning plans and the surrounding social features.
//!
//! These are wire types: they mirror the JSON documents exchanged with the
//! REST backend (camelCase keys) and are also what the local store persists.
//! Display implementations live in [`crate::display::models`] so that the
//! data structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use skillpath_core::models::{LearningPlan, Task};
//!
//! let plan: LearningPlan = serde_json::from_str(
//!     r#"{"id":"p1","title":"Rust","skills":["ownership"],
//!         "tasks":[{"taskName":"Read the book"}],"startDate":""}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(plan.tasks, vec![Task::new("Read the book", "")]);
//! assert!(plan.start_date.is_none());
//! ```

pub mod course;
pub mod dates;
pub mod draft;
pub mod plan;
pub mod post;
pub mod summary;
pub mod task;
pub mod user;


pub use course::Course;
pub use draft::PlanDraft;
pub use plan::LearningPlan;
pub use post::{Post, SavedPostCount, SavedPostState};
pub use summary::PlanSummary;
pub use task::{GenerateTasksResponse, GeneratedTask, Task};
pub use user::{FollowStats, User};
