use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

/// Reasons a [`RequestContext`] stops a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context.cancelled")]
    Cancelled,
    #[error("context.deadline_exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline token for a single request.
///
/// Passed as the first parameter of every use case and gateway call. Clones
/// share the same cancellation state, so cancelling any clone cancels them all.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    deadline: Option<Instant>,
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl RequestContext {
    /// A context with no deadline that is only cancelled explicitly.
    pub fn background() -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
            cancel_tx: Arc::new(cancel_tx),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().and_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self::background().and_deadline(deadline)
    }

    /// Returns a context sharing this one's cancellation state with a new deadline.
    /// An earlier existing deadline is kept.
    pub fn and_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }

    /// Fails fast if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drives `future` to completion unless the context is cancelled or its
    /// deadline passes first.
    pub async fn run<F, T>(&self, future: F) -> Result<T, ContextError>
    where
        F: Future<Output = T>,
    {
        self.check()?;

        let mut cancel_rx = self.cancel_tx.subscribe();
        let cancelled = async move {
            // The sender lives in `self`, so `wait_for` only returns once cancelled.
            let _ = cancel_rx.wait_for(|cancelled| *cancelled).await;
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                output = future => Ok(output),
                _ = cancelled => Err(ContextError::Cancelled),
                _ = tokio::time::sleep_until(deadline) => Err(ContextError::DeadlineExceeded),
            },
            None => tokio::select! {
                output = future => Ok(output),
                _ = cancelled => Err(ContextError::Cancelled),
            },
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
