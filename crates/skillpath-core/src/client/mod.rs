//! High-level client API tying the backend, the local store and the event
//! bus together.
//!
//! ```text
//! ┌──────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Wizard, editor,  │    │     Client      │───▶│ Backend (HTTP)  │
//! │ generator, views │───▶│ (plan_ops,      │    └─────────────────┘
//! └──────────────────┘    │  social_ops)    │───▶│ Store (SQLite)  │
//!                         └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use skillpath_core::{ClientBuilder, User};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .with_base_url(Some("http://localhost:8070/api"))
//!     .build()
//!     .await?;
//!
//! client.store().login(&User::with_id("u-1")).await?;
//! for plan in client.my_plans().await? {
//!     println!("{}", plan.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod builder;
pub mod plan_ops;
pub mod social_ops;


pub use builder::ClientBuilder;
pub use social_ops::{Feed, FollowOutcome, Network, SaveOutcome, SavedPosts};

use crate::{backend::Backend, error::Result, events::EventBus, models::User, store::Store};

/// Main entry point for plan and social operations.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend>,
    store: Store,
    events: EventBus,
}

impl Client {
    pub(crate) fn new(backend: Arc<dyn Backend>, store: Store, events: EventBus) -> Self {
        Self {
            backend,
            store,
            events,
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the logged-in user or [`crate::ClientError::NotLoggedIn`].
    pub async fn require_user(&self) -> Result<User> {
        self.store.require_user().await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
