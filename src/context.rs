//! Per-call cancellation context.
//!
//! Every API operation takes a [`Context`]. Cancelling it, or letting its
//! deadline pass, aborts the in-flight request with a
//! [`TransportError`](crate::TransportError).

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// Cancellation and deadline carried through a single API call.
///
/// Cloning a context shares its cancellation token; use [`Context::child`]
/// for a context that can be cancelled on its own.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use intelowl::{Context, IntelOwlClient};
///
/// # async fn example(client: IntelOwlClient) -> intelowl::Result<()> {
/// let ctx = Context::background().with_timeout(Duration::from_secs(5));
/// let tags = client.tags.list(&ctx).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Bound this context to `timeout` from now.
    ///
    /// An earlier existing deadline is kept. A timeout too large to
    /// represent leaves the context unchanged.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Bound this context to an absolute deadline.
    ///
    /// An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A child context, cancelled whenever this one is.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and all its children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once [`Context::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drive `fut` to completion unless the context is cancelled or expires
    /// first, in which case `fut` is dropped.
    pub(crate) async fn run<F: Future>(&self, fut: F) -> Result<F::Output, TransportError> {
        if self.token.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.deadline.is_some_and(|at| at <= Instant::now()) {
            return Err(TransportError::DeadlineExceeded);
        }

        let expired = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(TransportError::Cancelled),
            () = expired => Err(TransportError::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_completes_on_background_context() {
        let ctx = Context::background();
        let out = tokio_test::block_on(ctx.run(async { 42 }));
        assert_eq!(out.unwrap(), 42);
    }

    #[test]
    fn test_pre_cancelled_context_never_polls_future() {
        let ctx = Context::background();
        ctx.cancel();

        let polled = std::sync::atomic::AtomicBool::new(false);
        let out = tokio_test::block_on(ctx.run(async {
            polled.store(true, std::sync::atomic::Ordering::SeqCst);
        }));
        assert!(matches!(out, Err(TransportError::Cancelled)));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_child_follows_parent_cancellation() {
        let parent = Context::background();
        let child = parent.child();
        let sibling = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        parent.cancel();
        assert!(sibling.is_cancelled());
    }

    #[tokio::test]
    async fn test_deadline_aborts_pending_future() {
        let ctx = Context::background().with_timeout(Duration::from_millis(20));
        let out = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(out, Err(TransportError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_future() {
        let ctx = Context::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let out = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(out, Err(TransportError::Cancelled)));
    }

    #[test]
    fn test_unrepresentable_timeout_is_ignored() {
        let ctx = Context::background().with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());

        let bounded = Context::background()
            .with_timeout(Duration::from_secs(5))
            .with_timeout(Duration::MAX);
        assert!(bounded.deadline().is_some());
    }

    #[tokio::test]
    async fn test_earlier_deadline_wins() {
        let ctx = Context::background()
            .with_timeout(Duration::from_secs(1))
            .with_timeout(Duration::from_secs(60));
        let remaining = ctx.deadline().unwrap() - Instant::now();
        assert!(remaining <= Duration::from_secs(1));
    }
}
