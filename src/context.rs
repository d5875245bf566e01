//! Deadline and cancellation for remote calls
//!
//! A [`CallContext`] is created by the caller and threaded through an
//! operation. Every remote round trip runs under it: the call is dropped
//! (aborting the request) as soon as the token is cancelled or the
//! deadline passes.

use crate::client::ListStep;
use crate::error::RemoteError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct CallContext {
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    cancellation_token: CancellationToken,
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CallContext {
    /// Deadline is measured from now and covers every call made under this context
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            deadline: timeout.map(|t| Instant::now() + t),
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Run one remote call under this context
    pub async fn call<F, T>(&self, call: F) -> Result<T, RemoteError>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        self.guard(call).await?
    }

    /// Fetch one cursor step under this context
    pub async fn step<F, T>(&self, step: F) -> ListStep<T>
    where
        F: Future<Output = ListStep<T>>,
    {
        match self.guard(step).await {
            Ok(step) => step,
            Err(e) => ListStep::Failed(e),
        }
    }

    async fn guard<F>(&self, fut: F) -> Result<F::Output, RemoteError>
    where
        F: Future,
    {
        // Cancellation is checked first so an already-cancelled context
        // never starts the call.
        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => Err(RemoteError::Cancelled),
            result = Self::bounded(self.deadline, self.timeout, fut) => result,
        }
    }

    async fn bounded<F>(
        deadline: Option<Instant>,
        timeout: Option<Duration>,
        fut: F,
    ) -> Result<F::Output, RemoteError>
    where
        F: Future,
    {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| RemoteError::DeadlineExceeded(timeout.unwrap_or_default())),
            None => Ok(fut.await),
        }
    }
}
