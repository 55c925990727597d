// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Leaf action commands
//!
//! The seven leaves that wrap plain closures into the command contract:
//! instant, run, start/end, functional, print, wait, and wait-until.
//! Everything else in the framework is composed from these plus the groups
//! and selectors.

use crate::command::{Command, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;
use std::time::{Duration, Instant};

/// Runs an action once at initialize and finishes immediately.
pub struct InstantCommand {
    action: Option<Box<dyn FnMut()>>,
    requirements: ResourceSet,
}

impl InstantCommand {
    pub fn new(action: impl FnMut() + 'static, requirements: ResourceSet) -> Self {
        Self {
            action: Some(Box::new(action)),
            requirements,
        }
    }

    /// No action, no requirements, no side effects; finishes immediately.
    pub fn noop() -> Self {
        Self {
            action: None,
            requirements: ResourceSet::new(),
        }
    }
}

impl Command for InstantCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        if let Some(action) = &mut self.action {
            action();
        }
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        true
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {}

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Runs an action every tick and never finishes on its own.
pub struct RunCommand {
    action: Box<dyn FnMut()>,
    requirements: ResourceSet,
}

impl RunCommand {
    pub fn new(action: impl FnMut() + 'static, requirements: ResourceSet) -> Self {
        Self {
            action: Box::new(action),
            requirements,
        }
    }
}

impl Command for RunCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        (self.action)();
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        false
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {}

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Runs one action when scheduled and another when ended.
pub struct StartEndCommand {
    start: Box<dyn FnMut()>,
    stop: Box<dyn FnMut()>,
    requirements: ResourceSet,
}

impl StartEndCommand {
    pub fn new(
        start: impl FnMut() + 'static,
        stop: impl FnMut() + 'static,
        requirements: ResourceSet,
    ) -> Self {
        Self {
            start: Box::new(start),
            stop: Box::new(stop),
            requirements,
        }
    }
}

impl Command for StartEndCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        (self.start)();
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        false
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {
        (self.stop)();
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Fully closure-driven command: init, execute, end, and finish predicate
/// are all supplied by the caller.
pub struct FunctionalCommand {
    on_init: Box<dyn FnMut()>,
    on_execute: Box<dyn FnMut()>,
    on_end: Box<dyn FnMut(bool)>,
    finished: Box<dyn FnMut() -> bool>,
    requirements: ResourceSet,
}

impl FunctionalCommand {
    pub fn new(
        on_init: impl FnMut() + 'static,
        on_execute: impl FnMut() + 'static,
        on_end: impl FnMut(bool) + 'static,
        finished: impl FnMut() -> bool + 'static,
        requirements: ResourceSet,
    ) -> Self {
        Self {
            on_init: Box::new(on_init),
            on_execute: Box::new(on_execute),
            on_end: Box::new(on_end),
            finished: Box::new(finished),
            requirements,
        }
    }
}

impl Command for FunctionalCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        (self.on_init)();
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        (self.on_execute)();
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        (self.finished)()
    }

    fn end(&mut self, interrupted: bool, _ctx: &mut Context) {
        (self.on_end)(interrupted);
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Prints a message and finishes immediately. Requires nothing.
pub struct PrintCommand {
    message: String,
    requirements: ResourceSet,
}

impl PrintCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            requirements: ResourceSet::new(),
        }
    }
}

impl Command for PrintCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        println!("{}", self.message);
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        true
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {}

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Does nothing until the configured duration has elapsed on the scheduler
/// clock. Requires nothing.
pub struct WaitCommand {
    duration: Duration,
    started: Option<Instant>,
    requirements: ResourceSet,
}

impl WaitCommand {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
            requirements: ResourceSet::new(),
        }
    }
}

impl Command for WaitCommand {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.started = Some(ctx.now());
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        match self.started {
            Some(started) => ctx.now().duration_since(started) >= self.duration,
            None => false,
        }
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {
        self.started = None;
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

/// Does nothing until a predicate becomes true. Requires nothing.
pub struct WaitUntilCommand {
    predicate: Box<dyn FnMut() -> bool>,
    requirements: ResourceSet,
}

impl WaitUntilCommand {
    pub fn new(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            requirements: ResourceSet::new(),
        }
    }
}

impl Command for WaitUntilCommand {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        (self.predicate)()
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {}

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
