// SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};

/// The two states of an [`Event`](crate::Event).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EventState {
    /// Waits block until the next `set`.
    #[default]
    Cleared,
    /// Waits return immediately.
    Signaled,
}

impl Display for EventState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EventState::Cleared => write!(f, "cleared"),
            EventState::Signaled => write!(f, "signaled"),
        }
    }
}
