//! Cancellation scopes tied to a view's lifetime.
//!
//! A view creates a [`Scope`] when it opens and runs its requests through
//! it. Closing the view (dropping the scope, or calling
//! [`Scope::cancel`]) makes any in-flight request resolve to
//! [`ClientError::Cancelled`], so its response is never applied to state
//! that no longer exists.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, Result};

#[derive(Debug, Default)]
pub struct Scope {
    token: CancellationToken,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A nested scope, cancelled together with this one.
    pub fn child(&self) -> Scope {
        Scope {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `fut` unless the scope is cancelled first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ClientError::Cancelled),
            result = fut => result,
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
