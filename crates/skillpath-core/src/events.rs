//! Typed publish/subscribe channel for cross-view notifications.
//!
//! Views that need to react to changes made elsewhere (a saved-post counter,
//! a plan list that must re-fetch) subscribe to the [`EventBus`] instead of
//! listening for stringly-typed events.

use tokio::sync::broadcast;

/// Events buffered per subscriber before the slowest one starts lagging.
const DEFAULT_CAPACITY: usize = 64;

/// Whether a saved-post toggle saved or unsaved the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Save,
    Unsave,
}

impl SaveAction {
    pub fn from_saved(saved: bool) -> Self {
        if saved {
            SaveAction::Save
        } else {
            SaveAction::Unsave
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The user's saved-post count changed
    SavedPostsUpdated { count: u64, action: SaveAction },
    /// A learning plan was created; lists should re-fetch
    PlanCreated { plan_id: Option<String> },
    PlanUpdated { plan_id: String },
    PlanDeleted { plan_id: String },
}

/// Process-wide broadcast of [`AppEvent`]s. Clones share the channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event and returns how many subscribers received it.
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        log::debug!("Publishing {event:?}");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
