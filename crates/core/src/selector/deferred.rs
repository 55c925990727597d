// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred construction
//!
//! Declares its requirement set up front but does not construct the
//! concrete command until initialize time, calling the supplier exactly
//! once per scheduling cycle. This enables behaviors whose shape depends on
//! state only known when scheduled.

use crate::command::{Command, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

pub struct DeferredCommand {
    supplier: Box<dyn FnMut() -> Box<dyn Command>>,
    command: Option<Box<dyn Command>>,
    requirements: ResourceSet,
}

impl DeferredCommand {
    /// `requirements` is the caller's declaration; the supplied command's
    /// own requirement set is not consulted.
    pub fn new(
        supplier: impl FnMut() -> Box<dyn Command> + 'static,
        requirements: ResourceSet,
    ) -> Self {
        Self {
            supplier: Box::new(supplier),
            command: None,
            requirements,
        }
    }
}

impl Command for DeferredCommand {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        let mut command = (self.supplier)();
        command.initialize(ctx)?;
        self.command = Some(command);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        match &mut self.command {
            Some(command) => command.execute(ctx),
            None => Ok(()),
        }
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        match &mut self.command {
            Some(command) => command.is_finished(ctx),
            None => true,
        }
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        // Drop the constructed command; the next cycle builds a fresh one.
        if let Some(mut command) = self.command.take() {
            command.end(interrupted, ctx);
        }
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

#[cfg(test)]
#[path = "deferred_tests.rs"]
mod tests;
