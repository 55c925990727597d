// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeat decorator
//!
//! Restarts its inner command whenever it finishes naturally; terminates
//! only through external interruption. `perpetuating_sequence` is a
//! sequential group wrapped in this.

use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

pub struct RepeatCommand {
    command: Box<dyn Command>,
    /// False between a natural finish and the restart's `initialize`, so a
    /// failed restart does not end the child twice.
    running: bool,
}

impl RepeatCommand {
    pub fn new(command: Box<dyn Command>) -> Self {
        Self {
            command,
            running: false,
        }
    }
}

impl Command for RepeatCommand {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.command.initialize(ctx)?;
        self.running = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.command.execute(ctx)?;
        if self.command.is_finished(ctx) {
            self.command.end(false, ctx);
            self.running = false;
            self.command.initialize(ctx)?;
            self.running = true;
        }
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        false
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        if self.running {
            self.command.end(interrupted, ctx);
            self.running = false;
        }
    }

    fn requirements(&self) -> &ResourceSet {
        self.command.requirements()
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.command.interruption_behavior()
    }
}

#[cfg(test)]
#[path = "repeat_tests.rs"]
mod tests;
