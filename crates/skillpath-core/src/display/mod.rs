//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and for the outcome of
//! create/update/delete operations, so the CLI and any other front end print
//! the same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (LearningPlan,  │───▶│ Result Types    │───▶│    Output       │
//! │  Task, Course)  │    │                 │    │  (Terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Courses, ...)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Timeline formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use skillpath_core::{display::CreateResult, models::LearningPlan};
//!
//! let plan = LearningPlan {
//!     id: Some("p1".to_string()),
//!     title: "Rust".to_string(),
//!     ..Default::default()
//! };
//!
//! let output = CreateResult::new(plan).to_string();
//! assert!(output.contains("Learning Plan successfully created!"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Courses, PlanSummaries, Posts, Suggestions, Users};
pub use datetime::Timeline;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
