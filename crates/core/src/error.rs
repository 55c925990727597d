// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the command framework
//!
//! Resource conflicts are deliberately not represented here: losing a
//! conflict to a `CancelIncoming` owner is a normal scheduling outcome
//! (`ScheduleOutcome::Rejected`), not a fault.

use crate::command::ResourceId;
use crate::id::CommandId;
use thiserror::Error;

/// Structural and configuration failures raised by commands themselves
#[derive(Debug, Error)]
pub enum CommandError {
    /// A `Select` command's selector produced a key with no mapped command.
    #[error("selector produced key {key} with no mapped command")]
    UnknownSelection { key: String },
    /// Two members of a parallel-style group require the same resource.
    #[error("resource {0} is required by more than one member of a parallel group")]
    SharedRequirement(ResourceId),
    /// A proxy's inner command was already handed to the scheduler by an
    /// earlier scheduling cycle.
    #[error("proxied command was consumed by an earlier scheduling cycle")]
    ProxyConsumed,
}

/// Failures surfaced by the scheduler to the driving control loop
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("command {id} failed to initialize: {source}")]
    InitializeFailed {
        id: CommandId,
        source: CommandError,
    },
    #[error("command {id} failed during execution: {source}")]
    ExecuteFailed {
        id: CommandId,
        source: CommandError,
    },
    #[error("default command for {0} does not require it")]
    DefaultMissingRequirement(ResourceId),
}
