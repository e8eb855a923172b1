// SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Manual-reset event flag for coordinating threads and async tasks.
//!
//! # Overview
//!
//! - [`Event`] — a boolean flag with `set`, `clear`, `is_set` and a
//!   cancellable `wait`
//! - [`WaitContext`] — the mandatory cancellation input of every wait: a
//!   [`CancellationToken`], a deadline, or both
//! - [`Listener`] — a subscription to the current generation of an event,
//!   awaitable or waitable from a plain thread
//!
//! Each cleared period of an event is backed by its own one-shot broadcast
//! signal. `set` fires it and `clear` installs a fresh one, so a waiter is
//! released by exactly the `set` that ends the generation it subscribed to.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use event_flag::{Event, WaitContext};
//!
//! let event = Arc::new(Event::new());
//! let waiter = {
//!     let event = Arc::clone(&event);
//!     std::thread::spawn(move || event.wait(&WaitContext::with_timeout(Duration::from_secs(5))))
//! };
//!
//! event.set();
//! assert!(waiter.join().unwrap());
//! ```

mod context;
mod event;
mod park;
mod signal;
mod status;

// ── Re-exports ───────────────────────────────────────────────────────

pub use context::{WaitContext, WaitContextBuilder, WaitContextError};
pub use event::Event;
pub use signal::Listener;
pub use status::EventState;
pub use tokio_util::sync::CancellationToken;
