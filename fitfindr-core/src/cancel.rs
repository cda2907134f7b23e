//! Cooperative cancellation for in-flight API calls.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::api::RequestError;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared flag that aborts the request it is attached to.
///
/// Clones observe the same state: cancelling one cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Run `request` unless `token` fires first.
pub async fn with_cancel<T, F>(token: &CancellationToken, request: F) -> Result<T, RequestError>
where
    F: Future<Output = Result<T, RequestError>>,
{
    if token.is_cancelled() {
        return Err(RequestError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(RequestError::Cancelled),
        res = request => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_when_not_cancelled() {
        let token = CancellationToken::new();
        let res = with_cancel(&token, async { Ok::<_, RequestError>(7) }).await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn already_cancelled_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let res = with_cancel(&token, async { Ok::<_, RequestError>(7) }).await;
        assert!(matches!(res, Err(RequestError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_wakes_pending_request() {
        let token = CancellationToken::new();
        let remote = token.clone();

        let pending = std::future::pending::<Result<(), RequestError>>();
        let handle = tokio::spawn({
            let token = token.clone();
            async move { with_cancel(&token, pending).await }
        });

        tokio::task::yield_now().await;
        remote.cancel();

        let res = handle.await.unwrap();
        assert!(matches!(res, Err(RequestError::Cancelled)));
        assert!(token.is_cancelled());
    }
}
