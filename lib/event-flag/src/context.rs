// SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Cancellation input required by every wait.
//!
//! A [`WaitContext`] always carries at least one way to give up: a
//! [`CancellationToken`], a deadline, or both. There is no way to construct
//! a context that can never fire, so an unbounded wait is not expressible.

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Roughly 30 years from now; used when a timeout overflows `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Errors raised while assembling a [`WaitContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaitContextError {
    /// Neither a cancellation token nor a deadline was supplied.
    #[error("wait requires a cancellation token or a deadline")]
    MissingCancellation,
}

/// How a wait on an [`Event`](crate::Event) may end without the event being set.
#[derive(Debug, Clone)]
pub struct WaitContext {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl WaitContext {
    /// Give up once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(deadline_after(timeout))
    }

    /// Give up at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: None,
            deadline: Some(deadline),
        }
    }

    /// Give up when `token` is cancelled.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token: Some(token),
            deadline: None,
        }
    }

    pub fn builder() -> WaitContextBuilder {
        WaitContextBuilder::default()
    }

    /// Assemble a context from optional parts.
    ///
    /// # Panics
    ///
    /// Panics with [`WaitContextError::MissingCancellation`] if both parts are
    /// `None`. Waiting without any way to give up is a programming error.
    pub fn from_parts(token: Option<CancellationToken>, deadline: Option<Instant>) -> Self {
        Self::try_from_parts(token, deadline).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_from_parts(
        token: Option<CancellationToken>,
        deadline: Option<Instant>,
    ) -> Result<Self, WaitContextError> {
        if token.is_none() && deadline.is_none() {
            return Err(WaitContextError::MissingCancellation);
        }
        Ok(Self { token, deadline })
    }

    pub fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if the token is cancelled or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_cancelled())
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves when the token is cancelled; never resolves without a token.
    /// The deadline is handled by the caller's timer.
    pub(crate) async fn cancelled(&self) {
        match &self.token {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    }
}

/// Builder combining a token and a deadline into a [`WaitContext`].
#[derive(Debug, Default)]
pub struct WaitContextBuilder {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl WaitContextBuilder {
    pub fn token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline to `timeout` from now.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(deadline_after(timeout))
    }

    pub fn try_build(self) -> Result<WaitContext, WaitContextError> {
        WaitContext::try_from_parts(self.token, self.deadline)
    }

    /// # Panics
    ///
    /// Panics if neither a token nor a deadline was set.
    pub fn build(self) -> WaitContext {
        WaitContext::from_parts(self.token, self.deadline)
    }
}

impl From<CancellationToken> for WaitContext {
    fn from(token: CancellationToken) -> Self {
        Self::with_token(token)
    }
}

impl From<Duration> for WaitContext {
    fn from(timeout: Duration) -> Self {
        Self::with_timeout(timeout)
    }
}

impl From<Instant> for WaitContext {
    fn from(deadline: Instant) -> Self {
        Self::with_deadline(deadline)
    }
}

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}
