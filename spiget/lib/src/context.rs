//! Per-call cancellation and deadlines.
//!
//! A [`RequestContext`] travels with every endpoint call. The executor races
//! the in-flight send against the context's cancellation token and deadline,
//! so a cancelled call returns [`ClientError::Cancelled`] and never reaches
//! the decoding step.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

/// Cancellation token plus optional deadline for one or more calls.
///
/// Cloning shares the token: cancelling any clone cancels them all. Use
/// [`child`](Self::child) for a context that can be cancelled on its own but
/// still follows its parent.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use spiget_lib::RequestContext;
///
/// let ctx = RequestContext::background().with_timeout(Duration::from_secs(5));
/// let child = ctx.child();
///
/// ctx.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Deadline>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_token(CancellationToken::new())
    }
}

impl RequestContext {
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

    /// Adds a deadline `timeout` from now.
    ///
    /// An earlier existing deadline is kept. A timeout too large to represent
    /// as an instant adds no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let Some(at) = Instant::now().checked_add(timeout) else {
            return self;
        };
        let candidate = Deadline { at, timeout };
        self.deadline = match self.deadline {
            Some(existing) if existing.at <= candidate.at => Some(existing),
            _ => Some(candidate),
        };
        self
    }

    /// A context cancelled together with this one, but cancellable separately.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this context and every child.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns the underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Time left before the deadline, if one is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.at.saturating_duration_since(Instant::now()))
    }

    /// Runs `fut` until it completes, the context is cancelled, or the
    /// deadline passes, whichever comes first.
    pub(crate) async fn run<T, Fut>(&self, fut: Fut) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let guarded = async {
            tokio::select! {
                biased;
                () = self.token.cancelled() => Err(ClientError::Cancelled),
                result = fut => result,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline.at, guarded)
                .await
                .unwrap_or_else(|_| {
                    Err(ClientError::Timeout {
                        duration_ms: u64::try_from(deadline.timeout.as_millis())
                            .unwrap_or(u64::MAX),
                    })
                }),
            None => guarded.await,
        }
    }
}
