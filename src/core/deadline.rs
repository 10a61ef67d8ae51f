//! Call contexts and the per-call deadline policy
//!
//! A [`CallContext`] is the cancellation signal and optional deadline a
//! resolver inherits from its caller. Before each backend call the resolver
//! opens a [`CallScope`] from the [`DeadlinePolicy`]: a child context whose
//! deadline is `min(inherited deadline, now + timeout)` and whose token is a
//! child of the caller's. Cancelling the caller cancels the scope; dropping
//! the scope releases it on every exit path.

use crate::core::error::BackendError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation signal and deadline inherited from the caller
#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline that is cancelled only explicitly
    pub fn root() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Wrap an existing cancellation token (e.g. one owned by the transport)
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Bound this context by an absolute deadline; an earlier deadline wins
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(earliest(self.deadline, deadline));
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::root()
    }
}

fn earliest(current: Option<Instant>, candidate: Instant) -> Instant {
    match current {
        Some(current) if current < candidate => current,
        _ => candidate,
    }
}

/// Uniform timeout applied to every outbound backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    timeout: Duration,
}

impl DeadlinePolicy {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open the scope for one backend call, starting the clock now
    pub fn scope(&self, parent: &CallContext) -> CallScope {
        let deadline = earliest(parent.deadline, Instant::now() + self.timeout);
        CallScope {
            context: CallContext {
                token: parent.token.child_token(),
                deadline: Some(deadline),
            },
            deadline,
            timeout: self.timeout,
        }
    }
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

/// Scope of a single backend call
///
/// Cancels its child token when dropped, so anything the backend client
/// spawned against [`CallScope::context`] is released on every exit path.
#[derive(Debug)]
pub struct CallScope {
    context: CallContext,
    deadline: Instant,
    timeout: Duration,
}

impl CallScope {
    /// Context to hand to the backend client
    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Drive `call` to completion, its deadline, or cancellation, whichever comes first
    ///
    /// A scope that is already cancelled never polls `call`.
    pub async fn run<T, F>(
        &self,
        service: &'static str,
        method: &'static str,
        call: F,
    ) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        if self.context.is_cancelled() {
            tracing::warn!(service, method, "call cancelled before it was issued");
            return Err(BackendError::cancelled(service, method));
        }

        let started = Instant::now();
        if started >= self.deadline {
            tracing::warn!(service, method, "deadline passed before the call was issued");
            return Err(BackendError::deadline_exceeded(service, method, Duration::ZERO));
        }

        tracing::debug!(
            service,
            method,
            timeout_ms = self.timeout.as_millis() as u64,
            "calling backend"
        );

        let result = tokio::select! {
            biased;
            _ = self.context.token.cancelled() => {
                tracing::warn!(service, method, "call cancelled by caller");
                Err(BackendError::cancelled(service, method))
            }
            outcome = tokio::time::timeout_at(self.deadline, call) => match outcome {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        service,
                        method,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "backend call exceeded its deadline"
                    );
                    Err(BackendError::deadline_exceeded(
                        service,
                        method,
                        self.deadline.saturating_duration_since(started),
                    ))
                }
            },
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(service, method, elapsed_ms, "backend call completed"),
            Err(err) if !err.status.is_abandoned() => {
                tracing::warn!(
                    service,
                    method,
                    elapsed_ms,
                    status = %err.status,
                    error = %err.message,
                    "backend call failed"
                )
            }
            Err(_) => {}
        }
        result
    }
}

impl Drop for CallScope {
    fn drop(&mut self) {
        self.context.token.cancel();
    }
}
