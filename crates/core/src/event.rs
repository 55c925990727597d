// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observable scheduler events
//!
//! The scheduler records one event per lifecycle decision; callers drain
//! them with [`crate::Scheduler::drain_events`] for telemetry or tests.

use crate::command::ResourceId;
use crate::id::CommandId;
use serde::{Deserialize, Serialize};

/// Events emitted by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A command was accepted and initialized.
    Scheduled { id: CommandId },
    /// A command lost a resource conflict to a `CancelIncoming` owner and
    /// was never initialized.
    Rejected { id: CommandId, blocker: CommandId },
    /// A command finished naturally.
    Finished { id: CommandId },
    /// A command was ended with `interrupted = true` (explicit cancellation,
    /// conflict eviction, or shutdown).
    Interrupted { id: CommandId },
    /// A resource lost its owner and its default command was rescheduled.
    DefaultResumed { resource: ResourceId, id: CommandId },
}

impl Event {
    /// Event name for pattern matching and logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::Scheduled { .. } => "command:scheduled",
            Event::Rejected { .. } => "command:rejected",
            Event::Finished { .. } => "command:finished",
            Event::Interrupted { .. } => "command:interrupted",
            Event::DefaultResumed { .. } => "resource:default-resumed",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
