// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel composition
//!
//! All children are initialized together and polled every tick. A child
//! that finishes is ended immediately and excluded from further polling,
//! but the group keeps holding its resources until the whole group ends.
//! The group finishes when every child has finished.

use super::{aggregate_behavior, check_disjoint, union_requirements};
use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

struct Member {
    command: Box<dyn Command>,
    running: bool,
}

pub struct ParallelGroup {
    members: Vec<Member>,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl ParallelGroup {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        let requirements = union_requirements(commands.iter());
        let behavior = aggregate_behavior(commands.iter());
        Self {
            members: commands
                .into_iter()
                .map(|command| Member {
                    command,
                    running: false,
                })
                .collect(),
            requirements,
            behavior,
        }
    }
}

impl Command for ParallelGroup {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        check_disjoint(self.members.iter().map(|m| &m.command))?;
        for idx in 0..self.members.len() {
            if let Err(source) = self.members[idx].command.initialize(ctx) {
                // The failed child never started, but the ones before it
                // did and must still be ended.
                for member in &mut self.members[..idx] {
                    member.command.end(true, ctx);
                    member.running = false;
                }
                return Err(source);
            }
            self.members[idx].running = true;
        }
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        for member in &mut self.members {
            if !member.running {
                continue;
            }
            member.command.execute(ctx)?;
            if member.command.is_finished(ctx) {
                member.command.end(false, ctx);
                member.running = false;
            }
        }
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.members.iter().all(|m| !m.running)
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        if interrupted {
            for member in &mut self.members {
                if member.running {
                    member.command.end(true, ctx);
                    member.running = false;
                }
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
#[path = "parallel_tests.rs"]
mod tests;
