//! cadence-core: cooperative tick-driven command scheduling
//!
//! This crate provides:
//! - The command contract: a small state machine with a declared resource
//!   requirement set and an interruption policy
//! - Leaf action commands wrapping plain closures, plus selector,
//!   decorator, and composition-group commands
//! - The scheduler: polls every scheduled command once per tick, enforces
//!   exclusive resource ownership, and resumes default commands
//! - A factory surface of pure constructors for assembling command trees

pub mod clock;
pub mod id;

pub mod actions;
pub mod command;
pub mod commands;
pub mod error;
pub mod event;
pub mod group;
pub mod scheduler;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{Command, InterruptionBehavior, LifecycleState, ResourceId, ResourceSet};
pub use error::{CommandError, SchedulerError};
pub use event::Event;
pub use id::{CommandId, IdGen, SequentialIdGen, UuidIdGen};
pub use scheduler::{Context, Resource, ScheduleOutcome, Scheduler};
