// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential composition
//!
//! Runs exactly one child at a time, in declaration order. The requirement
//! set is the union across all steps, so a resource may be required by
//! step 1 and step 3 without conflict: only one step is ever active.

use super::{aggregate_behavior, union_requirements};
use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

pub struct SequentialGroup {
    commands: Vec<Box<dyn Command>>,
    current: usize,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl SequentialGroup {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        let requirements = union_requirements(commands.iter());
        let behavior = aggregate_behavior(commands.iter());
        Self {
            commands,
            current: 0,
            requirements,
            behavior,
        }
    }
}

impl Command for SequentialGroup {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.current = 0;
        if let Some(first) = self.commands.first_mut() {
            first.initialize(ctx)?;
        }
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        let Some(command) = self.commands.get_mut(self.current) else {
            return Ok(());
        };
        command.execute(ctx)?;
        if command.is_finished(ctx) {
            // A finished child never wastes a tick: end it and initialize
            // its successor within the same tick.
            command.end(false, ctx);
            self.current += 1;
            if let Some(next) = self.commands.get_mut(self.current) {
                if let Err(source) = next.initialize(ctx) {
                    // The failed step never started; skip past it so an
                    // interrupting `end` has nothing left to notify.
                    self.current = self.commands.len();
                    return Err(source);
                }
            }
        }
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.current >= self.commands.len()
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        // Only the currently-running child is notified; earlier children
        // already ended when they finished.
        if interrupted {
            if let Some(command) = self.commands.get_mut(self.current) {
                command.end(true, ctx);
            }
        }
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}

#[cfg(test)]
#[path = "sequential_tests.rs"]
mod tests;
