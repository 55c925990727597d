// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-defined command constructors
//!
//! Pure factory functions that assemble leaves, selectors, and groups into
//! boxed commands: running actions once, repeatedly, with start and end
//! actions, handling time delays, printing messages, and composing all of
//! it sequentially or in parallel.

use crate::actions::{
    FunctionalCommand, InstantCommand, PrintCommand, RunCommand, StartEndCommand, WaitCommand,
    WaitUntilCommand,
};
use crate::command::{Command, InterruptionBehavior, ResourceId, ResourceSet};
use crate::error::CommandError;
use crate::group::{DeadlineGroup, ParallelGroup, RaceGroup, RepeatCommand, SequentialGroup};
use crate::scheduler::Context;
use crate::selector::{ConditionalCommand, DeferredCommand, ProxyCommand, SelectCommand};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

fn collect(requirements: impl IntoIterator<Item = ResourceId>) -> ResourceSet {
    requirements.into_iter().collect()
}

/// A command that does nothing, finishing immediately.
pub fn none() -> Box<dyn Command> {
    Box::new(InstantCommand::noop())
}

/// A command that does nothing until interrupted, holding the given
/// resources the whole time.
pub fn idle(requirements: impl IntoIterator<Item = ResourceId>) -> Box<dyn Command> {
    run(|| {}, requirements)
}

/// Runs an action once and finishes.
pub fn run_once(
    action: impl FnMut() + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(InstantCommand::new(action, collect(requirements)))
}

/// Runs an action every tick until interrupted.
pub fn run(
    action: impl FnMut() + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(RunCommand::new(action, collect(requirements)))
}

/// Runs an action once, then another action when the command ends.
pub fn start_end(
    start: impl FnMut() + 'static,
    end: impl FnMut() + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(StartEndCommand::new(start, end, collect(requirements)))
}

/// Runs an action every tick until interrupted, then a second action.
pub fn run_end(
    run: impl FnMut() + 'static,
    mut end: impl FnMut() + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(FunctionalCommand::new(
        || {},
        run,
        move |_interrupted| end(),
        || false,
        collect(requirements),
    ))
}

/// Runs an action once, then another action every tick until interrupted.
pub fn start_run(
    start: impl FnMut() + 'static,
    run: impl FnMut() + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(FunctionalCommand::new(
        start,
        run,
        |_interrupted| {},
        || false,
        collect(requirements),
    ))
}

/// Prints a message and finishes.
pub fn print(message: impl Into<String>) -> Box<dyn Command> {
    Box::new(PrintCommand::new(message))
}

/// Does nothing, finishing after the given number of milliseconds.
pub fn wait_millis(millis: u64) -> Box<dyn Command> {
    Box::new(WaitCommand::new(Duration::from_millis(millis)))
}

/// Does nothing, finishing once a condition becomes true.
pub fn wait_until(condition: impl FnMut() -> bool + 'static) -> Box<dyn Command> {
    Box::new(WaitUntilCommand::new(condition))
}

/// Runs one of two commands, chosen by the selector at initialize time.
pub fn either(
    on_true: Box<dyn Command>,
    on_false: Box<dyn Command>,
    selector: impl FnMut() -> bool + 'static,
) -> Box<dyn Command> {
    Box::new(ConditionalCommand::new(on_true, on_false, selector))
}

/// Runs one of several commands, keyed by the selector's value.
pub fn select<K: Eq + Hash + Debug + 'static>(
    commands: HashMap<K, Box<dyn Command>>,
    selector: impl FnMut() -> K + 'static,
) -> Box<dyn Command> {
    Box::new(SelectCommand::new(commands, selector))
}

/// Runs the command supplied at initialize time, under the declared
/// requirements.
pub fn defer(
    supplier: impl FnMut() -> Box<dyn Command> + 'static,
    requirements: impl IntoIterator<Item = ResourceId>,
) -> Box<dyn Command> {
    Box::new(DeferredCommand::new(supplier, collect(requirements)))
}

/// Schedules the supplied command independently when initialized and ends
/// once it is no longer scheduled. The supplier runs at initialize time.
pub fn deferred_proxy(
    mut supplier: impl FnMut() -> Box<dyn Command> + 'static,
) -> Box<dyn Command> {
    defer(move || proxy(supplier()), ResourceSet::new())
}

/// Detaches a command's scheduling lifetime from its syntactic parent.
pub fn proxy(command: Box<dyn Command>) -> Box<dyn Command> {
    Box::new(ProxyCommand::new(command))
}

/// Runs commands in series, one after the other.
pub fn sequence(commands: Vec<Box<dyn Command>>) -> Box<dyn Command> {
    Box::new(SequentialGroup::new(commands))
}

/// Runs commands in series; once the last ends, the sequence restarts and
/// runs perpetually until interrupted.
pub fn perpetuating_sequence(commands: Vec<Box<dyn Command>>) -> Box<dyn Command> {
    repeat(sequence(commands))
}

/// Restarts a command whenever it finishes naturally.
pub fn repeat(command: Box<dyn Command>) -> Box<dyn Command> {
    Box::new(RepeatCommand::new(command))
}

/// Runs commands at the same time; ends once all of them finish.
pub fn parallel(commands: Vec<Box<dyn Command>>) -> Box<dyn Command> {
    Box::new(ParallelGroup::new(commands))
}

/// Runs commands at the same time; ends once any of them finishes and
/// cancels the rest.
pub fn race(commands: Vec<Box<dyn Command>>) -> Box<dyn Command> {
    Box::new(RaceGroup::new(commands))
}

/// Runs commands at the same time; ends once the deadline command finishes
/// and cancels the rest.
pub fn deadline(
    deadline: Box<dyn Command>,
    others: Vec<Box<dyn Command>>,
) -> Box<dyn Command> {
    Box::new(DeadlineGroup::new(deadline, others))
}

/// Overrides what happens when a scheduled command loses a resource
/// conflict: yield (`CancelSelf`) or refuse the incoming command
/// (`CancelIncoming`).
pub fn with_interruption_behavior(
    command: Box<dyn Command>,
    behavior: InterruptionBehavior,
) -> Box<dyn Command> {
    Box::new(InterruptionOverride { command, behavior })
}

struct InterruptionOverride {
    command: Box<dyn Command>,
    behavior: InterruptionBehavior,
}

impl Command for InterruptionOverride {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.command.initialize(ctx)
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.command.execute(ctx)
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        self.command.is_finished(ctx)
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        self.command.end(interrupted, ctx);
    }

    fn requirements(&self) -> &ResourceSet {
        self.command.requirements()
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
