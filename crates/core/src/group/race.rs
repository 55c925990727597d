// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Race composition
//!
//! Same child-driving mechanics as parallel, but the group finishes the
//! instant any child finishes. Every child that finished naturally on the
//! deciding tick is ended with `interrupted = false`, everyone else with
//! `interrupted = true`, all in the same tick.

use super::{aggregate_behavior, check_disjoint, union_requirements};
use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

pub struct RaceGroup {
    commands: Vec<Box<dyn Command>>,
    /// Which children finished naturally on the deciding tick.
    finished: Vec<bool>,
    decided: bool,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl RaceGroup {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        let requirements = union_requirements(commands.iter());
        let behavior = aggregate_behavior(commands.iter());
        let finished = vec![false; commands.len()];
        Self {
            commands,
            finished,
            decided: false,
            requirements,
            behavior,
        }
    }
}

impl Command for RaceGroup {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        check_disjoint(self.commands.iter())?;
        self.decided = false;
        for flag in &mut self.finished {
            *flag = false;
        }
        for idx in 0..self.commands.len() {
            if let Err(source) = self.commands[idx].initialize(ctx) {
                // The failed child never started, but the ones before it
                // did and must still be ended.
                for command in &mut self.commands[..idx] {
                    command.end(true, ctx);
                }
                return Err(source);
            }
        }
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        if self.decided {
            return Ok(());
        }
        for (idx, command) in self.commands.iter_mut().enumerate() {
            command.execute(ctx)?;
            if command.is_finished(ctx) {
                self.finished[idx] = true;
                self.decided = true;
            }
        }
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.decided || self.commands.is_empty()
    }

    fn end(&mut self, _interrupted: bool, ctx: &mut Context) {
        for (idx, command) in self.commands.iter_mut().enumerate() {
            command.end(!self.finished[idx], ctx);
        }
        self.decided = false;
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}

#[cfg(test)]
#[path = "race_tests.rs"]
mod tests;
