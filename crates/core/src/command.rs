// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command contract
//!
//! A command is a small cooperative state machine with a declared set of
//! required resources. The scheduler polls every scheduled command once per
//! tick; composition groups poll their children recursively. Long-running
//! behavior is expressed by returning `false` from [`Command::is_finished`]
//! across many ticks, never by blocking inside a tick.

use crate::error::CommandError;
use crate::scheduler::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable handle for an exclusively-ownable unit of robot state or hardware
/// (a "subsystem").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId(s.to_string())
    }
}

/// The set of resources a command requires. Ordered for deterministic
/// iteration during conflict resolution.
pub type ResourceSet = BTreeSet<ResourceId>;

/// Who yields when a newly scheduled command conflicts with a running one
/// over a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptionBehavior {
    /// The running command is ended with `interrupted = true` and evicted.
    #[default]
    CancelSelf,
    /// The incoming command is rejected and never initialized.
    CancelIncoming,
}

/// Lifecycle of one scheduling cycle.
///
/// `Idle` → `Initialized` on schedule, `Initialized`/`Running` → `Running`
/// each tick, → `Ended` on natural finish or interruption. A command object
/// returns to `Idle` semantics if rescheduled after ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Initialized,
    Running,
    Ended,
}

/// The base polymorphic unit of schedulable work.
///
/// Contract, regardless of variant:
/// - `initialize` runs exactly once per scheduling cycle, before anything
///   else, and must reset any state left over from a previous cycle;
/// - `execute` runs zero or more times, strictly after `initialize`;
/// - `is_finished` is queried once per tick after `execute`;
/// - `end` runs exactly once per cycle, always; `interrupted` is `true` when
///   the command was cancelled or evicted rather than finishing naturally.
///
/// `initialize` and `execute` are fallible so structural configuration
/// errors (a selector key with no mapped command, conflicting requirements
/// inside a parallel group) can abort the offending command and propagate to
/// the driving tick caller.
pub trait Command {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError>;

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError>;

    fn is_finished(&mut self, ctx: &mut Context) -> bool;

    fn end(&mut self, interrupted: bool, ctx: &mut Context);

    /// The resources this command needs exclusive ownership of while
    /// scheduled. Must be stable across the command's lifetime.
    fn requirements(&self) -> &ResourceSet;

    fn interruption_behavior(&self) -> InterruptionBehavior {
        InterruptionBehavior::CancelSelf
    }
}
