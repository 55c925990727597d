// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline composition
//!
//! One designated deadline command governs the group's completion. Other
//! commands run alongside it; those that finish early are ended naturally
//! and excluded, and any still running when the deadline finishes are
//! interrupted at that instant.

use super::{aggregate_behavior, check_disjoint, union_requirements};
use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

struct Member {
    command: Box<dyn Command>,
    running: bool,
}

pub struct DeadlineGroup {
    deadline: Box<dyn Command>,
    deadline_running: bool,
    others: Vec<Member>,
    finished: bool,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl DeadlineGroup {
    pub fn new(deadline: Box<dyn Command>, others: Vec<Box<dyn Command>>) -> Self {
        let mut requirements = union_requirements(others.iter());
        requirements.extend(deadline.requirements().iter().cloned());
        let mut behavior = aggregate_behavior(others.iter());
        if deadline.interruption_behavior() == InterruptionBehavior::CancelIncoming {
            behavior = InterruptionBehavior::CancelIncoming;
        }
        Self {
            deadline,
            deadline_running: false,
            others: others
                .into_iter()
                .map(|command| Member {
                    command,
                    running: false,
                })
                .collect(),
            finished: false,
            requirements,
            behavior,
        }
    }
}

impl Command for DeadlineGroup {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        check_disjoint(
            std::iter::once(&self.deadline).chain(self.others.iter().map(|m| &m.command)),
        )?;
        self.finished = false;
        self.deadline.initialize(ctx)?;
        self.deadline_running = true;
        for idx in 0..self.others.len() {
            if let Err(source) = self.others[idx].command.initialize(ctx) {
                // The failed member never started; everything already
                // initialized is ended before the error propagates.
                for member in &mut self.others[..idx] {
                    member.command.end(true, ctx);
                    member.running = false;
                }
                self.deadline.end(true, ctx);
                self.deadline_running = false;
                return Err(source);
            }
            self.others[idx].running = true;
        }
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        if self.finished {
            return Ok(());
        }
        for member in &mut self.others {
            if !member.running {
                continue;
            }
            member.command.execute(ctx)?;
            if member.command.is_finished(ctx) {
                member.command.end(false, ctx);
                member.running = false;
            }
        }
        self.deadline.execute(ctx)?;
        if self.deadline.is_finished(ctx) {
            self.deadline.end(false, ctx);
            self.deadline_running = false;
            self.finished = true;
        }
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.finished
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        // Others still running are interrupted whether the group ended
        // naturally (deadline fired) or was itself interrupted.
        for member in &mut self.others {
            if member.running {
                member.command.end(true, ctx);
                member.running = false;
            }
        }
        if self.deadline_running {
            self.deadline.end(interrupted, ctx);
            self.deadline_running = false;
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
#[path = "deadline_tests.rs"]
mod tests;
