// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test doubles for command and scheduler tests

use crate::command::{Command, InterruptionBehavior, ResourceId, ResourceSet};
use crate::error::CommandError;
use crate::id::SequentialIdGen;
use crate::scheduler::{Context, TickShared};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared lifecycle log written by [`TrackedCommand`]s
pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Stand-alone tick harness for driving commands without a scheduler
pub(crate) struct TestTick {
    shared: TickShared,
    pub now: Instant,
}

impl TestTick {
    pub fn new() -> Self {
        Self {
            shared: TickShared::new(Box::new(SequentialIdGen::new("cmd"))),
            now: Instant::now(),
        }
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    pub fn ctx(&mut self) -> Context<'_> {
        Context::new(self.now, &mut self.shared)
    }
}

/// A command that records every lifecycle call into a shared log and
/// finishes after a configurable number of executes.
pub(crate) struct TrackedCommand {
    name: &'static str,
    log: Log,
    finish_after: Option<u32>,
    executed: u32,
    fail_init_after: Option<u32>,
    inits: u32,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl TrackedCommand {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            finish_after: None,
            executed: 0,
            fail_init_after: None,
            inits: 0,
            requirements: ResourceSet::new(),
            behavior: InterruptionBehavior::CancelSelf,
        }
    }

    /// Finish naturally once `count` executes have run.
    pub fn finish_after(mut self, count: u32) -> Self {
        self.finish_after = Some(count);
        self
    }

    /// Fail `initialize` after `successes` successful initializations.
    /// `fail_initialize_after(0)` fails the very first one.
    pub fn fail_initialize_after(mut self, successes: u32) -> Self {
        self.fail_init_after = Some(successes);
        self
    }

    pub fn requires(mut self, requirements: impl IntoIterator<Item = ResourceId>) -> Self {
        self.requirements = requirements.into_iter().collect();
        self
    }

    pub fn with_behavior(mut self, behavior: InterruptionBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }

    fn record(&self, call: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, call));
    }
}

impl Command for TrackedCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        if self.fail_init_after.map_or(false, |n| self.inits >= n) {
            return Err(CommandError::UnknownSelection {
                key: self.name.to_string(),
            });
        }
        self.inits += 1;
        self.executed = 0;
        self.record("init");
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        self.executed += 1;
        self.record("exec");
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.finish_after
            .map_or(false, |count| self.executed >= count)
    }

    fn end(&mut self, interrupted: bool, _ctx: &mut Context) {
        if interrupted {
            self.record("end(interrupted)");
        } else {
            self.record("end(finished)");
        }
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}
