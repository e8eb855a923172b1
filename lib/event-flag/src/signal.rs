// SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! One-shot broadcast signal backing a single generation of an [`Event`](crate::Event).
//!
//! A [`Signal`] starts unfired and can be fired exactly once; firing wakes
//! every registered waiter and the signal stays fired forever. An event that
//! is cleared again never reuses a fired signal, it installs a fresh one.
//!
//! Completion status and waker registration share a single `parking_lot::Mutex`
//! so that "check fired" and "register waker" can never interleave with a
//! concurrent [`Signal::fire`].

use parking_lot::Mutex as ParkingMutex;
use std::future::Future;
use std::pin::{Pin, pin};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use tracing::debug;

use futures::future::{self, Either};

use crate::context::WaitContext;
use crate::park;

type WaiterKey = u64;

pub(crate) struct Signal {
    inner: ParkingMutex<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    fired: bool,
    next_key: WaiterKey,
    wakers: Vec<(WaiterKey, Waker)>,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            inner: ParkingMutex::new(SignalInner::default()),
        }
    }

    /// Fire the signal, returning how many registered waiters were woken.
    ///
    /// Firing an already fired signal is a no-op and returns zero.
    pub(crate) fn fire(&self) -> usize {
        let wakers = {
            let mut inner = self.inner.lock();
            if inner.fired {
                return 0;
            }
            inner.fired = true;
            std::mem::take(&mut inner.wakers)
        };

        let woken = wakers.len();
        for (_, waker) in wakers {
            waker.wake();
        }
        woken
    }

    pub(crate) fn is_fired(&self) -> bool {
        self.inner.lock().fired
    }

    fn poll_fired(&self, key: &mut Option<WaiterKey>, cx: &mut Context<'_>) -> Poll<()> {
        let mut inner = self.inner.lock();
        if inner.fired {
            *key = None;
            return Poll::Ready(());
        }

        let waker = cx.waker();
        let registered = key.and_then(|k| inner.wakers.iter().position(|(id, _)| *id == k));
        match registered {
            Some(pos) => {
                // Update the registration in case the waiter moved to another thread
                let existing = &mut inner.wakers[pos].1;
                if !existing.will_wake(waker) {
                    existing.clone_from(waker);
                }
            }
            None => {
                let next = inner.next_key;
                inner.next_key += 1;
                inner.wakers.push((next, waker.clone()));
                *key = Some(next);
            }
        }

        Poll::Pending
    }

    fn deregister(&self, key: WaiterKey) {
        let mut inner = self.inner.lock();
        if let Some(pos) = inner.wakers.iter().position(|(id, _)| *id == key) {
            inner.wakers.swap_remove(pos);
        }
    }

    #[cfg(test)]
    fn waiter_count(&self) -> usize {
        self.inner.lock().wakers.len()
    }
}

/// Subscription to the generation of an [`Event`](crate::Event) that was
/// current when the listener was created.
///
/// A listener resolves once that generation is set, even if the event has
/// been cleared again in the meantime. It can be awaited (it is `Unpin` and
/// works inside `tokio::select!`) or waited on from a plain thread with
/// [`Listener::wait`]. Dropping a listener withdraws its registration.
#[must_use = "a listener does nothing unless awaited or waited on"]
pub struct Listener {
    signal: Option<Arc<Signal>>,
    key: Option<WaiterKey>,
}

impl Listener {
    /// A listener for an event that was already set.
    pub(crate) fn ready() -> Self {
        Self {
            signal: None,
            key: None,
        }
    }

    pub(crate) fn pending(signal: Arc<Signal>) -> Self {
        Self {
            signal: Some(signal),
            key: None,
        }
    }

    /// Returns `true` if the observed generation has been set.
    pub fn is_ready(&self) -> bool {
        self.signal.as_ref().is_none_or(|signal| signal.is_fired())
    }

    /// Block the calling thread until the observed generation is set or `ctx`
    /// fires.
    ///
    /// Returns `true` if the generation was set, `false` on cancellation or
    /// deadline. If both are ready at once, the generation wins.
    pub fn wait(mut self, ctx: &WaitContext) -> bool {
        if self.signal.is_none() {
            return true;
        }

        let cancelled = pin!(ctx.cancelled());
        match park::block_until(future::select(&mut self, cancelled), ctx.deadline()) {
            Some(Either::Left(_)) => true,
            Some(Either::Right(_)) | None => {
                debug!(
                    token_cancelled = ctx.token().is_some_and(|t| t.is_cancelled()),
                    "wait gave up before the event was set"
                );
                false
            }
        }
    }
}

impl Future for Listener {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        match &this.signal {
            None => Poll::Ready(()),
            Some(signal) => signal.poll_fired(&mut this.key, cx),
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let (Some(signal), Some(key)) = (&self.signal, self.key) {
            signal.deregister(key);
        }
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}
