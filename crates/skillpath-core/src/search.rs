//! Debounced, latest-wins user search.
//!
//! Every call to [`UserSearch::search`] takes a ticket. A call whose ticket
//! has been superseded by a newer one resolves to `None` instead of results,
//! so a slow response for "al" can never overwrite the answer for "alice".

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use log::debug;

use crate::{backend::Backend, error::Result, models::User};

/// Quiet period before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Search-as-you-type over `GET /user/search-v2`. Clones share the ticket
/// counter, so a query typed through any clone supersedes the others.
#[derive(Clone)]
pub struct UserSearch {
    backend: Arc<dyn Backend>,
    exclude: Option<String>,
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl UserSearch {
    /// `exclude` is the current user's id, hidden from results.
    pub fn new(backend: Arc<dyn Backend>, exclude: Option<String>) -> Self {
        Self {
            backend,
            exclude,
            delay: DEFAULT_DEBOUNCE,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs `query` after the debounce delay.
    ///
    /// Returns `Ok(None)` when a newer query arrived in the meantime. A blank
    /// query resolves to an empty list without contacting the backend.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<User>>> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.delay).await;
        if self.is_superseded(ticket) {
            debug!("Dropping superseded search for '{query}' before sending");
            return Ok(None);
        }

        let response = self.backend.search_users(query).await;
        if self.is_superseded(ticket) {
            debug!("Discarding stale results for '{query}'");
            return Ok(None);
        }

        let users = response?
            .into_iter()
            .filter(|user| Some(&user.id) != self.exclude.as_ref())
            .collect();
        Ok(Some(users))
    }

    fn is_superseded(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) != ticket
    }
}

impl std::fmt::Debug for UserSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSearch")
            .field("exclude", &self.exclude)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
