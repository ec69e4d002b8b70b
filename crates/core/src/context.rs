//! Per-request deadline and cancellation.
//!
//! Every store operation runs inside a [`RequestContext`]. Cancellation and
//! deadline expiry surface as [`CoreError::Cancelled`] and
//! [`CoreError::Timeout`] rather than as generic store failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// A context cancelled through `cancel` and without a deadline.
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            deadline: None,
            cancel,
        }
    }

    /// A detached context, for startup checks and tests.
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    /// Set the deadline to `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` until it completes, the token is cancelled, or the
    /// deadline passes, whichever comes first. The losing future is dropped.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = deadline => Err(CoreError::Timeout),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn completes_when_nothing_fires() {
        let ctx = RequestContext::background().with_timeout(Duration::from_secs(5));
        let value = ctx.run(async { Ok::<_, CoreError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn pre_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::new(token);
        let result = ctx.run(async { Ok::<_, CoreError>(()) }).await;
        assert_matches!(result, Err(CoreError::Cancelled));
    }

    #[tokio::test]
    async fn cancellation_interrupts_pending_work() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let result = ctx
            .run(std::future::pending::<Result<(), CoreError>>())
            .await;
        assert_matches!(result, Err(CoreError::Cancelled));
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn deadline_expiry_is_timeout() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(10));
        let result = ctx
            .run(std::future::pending::<Result<(), CoreError>>())
            .await;
        assert_matches!(result, Err(CoreError::Timeout));
    }

    #[tokio::test]
    async fn inner_error_passes_through() {
        let ctx = RequestContext::background();
        let result = ctx
            .run(async { Err::<(), _>(CoreError::InvalidIdentifier("x".into())) })
            .await;
        assert_matches!(result, Err(CoreError::InvalidIdentifier(_)));
    }
}
