//! Core library for the skillpath learning-plan client.
//!
//! This crate holds everything a front end needs to work with learning plans
//! on the platform's REST backend: wire models, the [`Backend`] seam and its
//! HTTP implementation, the creation [`Wizard`], the AI [`TaskGenerator`],
//! the tabbed [`PlanEditor`], plan detail and list views, and the local
//! application [`Store`] that keeps the session, saved-post marks and the
//! draft staged for AI generation.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] as
//!   markdown
//! - **Display Wrappers** ([`display`]): Collections and operation results
//! - **Terminal Rendering**: The CLI renders the markdown with termimad
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use skillpath_core::{ClientBuilder, User, Wizard};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .with_store_path(Some("skillpath.db"))
//!     .build()
//!     .await?;
//! client.store().login(&User::with_id("u-1")).await?;
//!
//! let mut wizard = Wizard::new();
//! wizard.set_title("Frontend");
//! wizard.set_background("Some JavaScript");
//! wizard.set_scope("React fundamentals");
//! wizard.advance()?;
//! wizard.add_skill("React");
//! wizard.advance()?;
//! wizard.advance()?;
//!
//! let plan = wizard.submit(&client).await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod db;
pub mod detail;
pub mod display;
pub mod editor;
pub mod error;
pub mod events;
pub mod generator;
pub mod models;
pub mod params;
pub mod posts;
pub mod scope;
pub mod search;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use backend::{Backend, HttpBackend};
pub use client::{Client, ClientBuilder, Feed, FollowOutcome, Network, SaveOutcome, SavedPosts};
pub use detail::{PlanBook, PlanDetail, Progress};
pub use display::{
    Courses, CreateResult, DeleteResult, OperationStatus, PlanSummaries, Posts, Suggestions,
    Timeline, UpdateResult, Users,
};
pub use editor::{EditorTab, PlanEditor};
pub use error::{ClientError, Result};
pub use events::{AppEvent, EventBus, SaveAction};
pub use generator::TaskGenerator;
pub use models::{
    Course, FollowStats, GeneratedTask, LearningPlan, PlanDraft, PlanSummary, Post, Task, User,
};
pub use params::{GenerateTasks, Id, PlanEdit, TaskPosition, ToggleFollow};
pub use posts::{MediaFile, NewPost};
pub use scope::Scope;
pub use search::UserSearch;
pub use store::Store;
pub use wizard::{DateEdit, StepRejection, Wizard, WizardStep};
