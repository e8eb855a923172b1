// SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The manual-reset [`Event`].

use parking_lot::Mutex as ParkingMutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use crate::context::WaitContext;
use crate::signal::{Listener, Signal};
use crate::status::EventState;

/// A boolean flag that threads and tasks can wait on.
///
/// [`set`](Event::set) releases every current waiter and lets all later
/// waiters through until [`clear`](Event::clear) is called. Share it by
/// reference, through an `Arc`, or as a `static`.
///
/// Internally the slot holds the signal for the current cleared generation,
/// or `None` while the event is set. Waiters capture the signal under the
/// slot lock and block on it after releasing the lock, so a concurrent
/// `set` either happens before the capture or fires the captured signal.
pub struct Event {
    slot: ParkingMutex<Option<Arc<Signal>>>,
}

impl Event {
    /// Create a cleared event.
    pub fn new() -> Self {
        Self::with_state(EventState::Cleared)
    }

    pub fn with_state(state: EventState) -> Self {
        let slot = match state {
            EventState::Cleared => Some(Arc::new(Signal::new())),
            EventState::Signaled => None,
        };
        Self {
            slot: ParkingMutex::new(slot),
        }
    }

    pub fn is_set(&self) -> bool {
        self.slot.lock().is_none()
    }

    pub fn state(&self) -> EventState {
        if self.is_set() {
            EventState::Signaled
        } else {
            EventState::Cleared
        }
    }

    /// Set the flag, releasing every waiter of the current generation.
    ///
    /// Setting an already set event has no effect.
    pub fn set(&self) {
        let signal = self.slot.lock().take();
        if let Some(signal) = signal {
            let woken = signal.fire();
            trace!(woken, "event set");
        }
    }

    /// Clear the flag so that later waits block until the next [`set`](Event::set).
    ///
    /// Waiters already released by an earlier `set` are not affected.
    pub fn clear(&self) {
        let mut slot = self.slot.lock();
        if slot.is_none() {
            *slot = Some(Arc::new(Signal::new()));
            trace!("event cleared");
        }
    }

    /// Subscribe to the current generation without blocking.
    ///
    /// The returned [`Listener`] resolves once this generation is set. If the
    /// event is already set, it is ready immediately.
    pub fn listen(&self) -> Listener {
        match &*self.slot.lock() {
            Some(signal) => Listener::pending(Arc::clone(signal)),
            None => Listener::ready(),
        }
    }

    /// Block until the event is set or `ctx` fires.
    ///
    /// Returns `true` if the event was set (including when it already was),
    /// `false` if the token was cancelled or the deadline passed first.
    pub fn wait(&self, ctx: &WaitContext) -> bool {
        self.listen().wait(ctx)
    }

    /// Block until the event is set or `timeout` elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.wait(&WaitContext::with_timeout(timeout))
    }

    /// Async counterpart of [`wait`](Event::wait); the deadline is driven by
    /// the tokio timer.
    pub async fn wait_async(&self, ctx: &WaitContext) -> bool {
        let listener = self.listen();
        if listener.is_ready() {
            return true;
        }

        let expired = async {
            match ctx.deadline() {
                Some(deadline) => {
                    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = listener => true,
            _ = ctx.cancelled() => false,
            _ = expired => false,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("state", &self.state())
            .finish()
    }
}
