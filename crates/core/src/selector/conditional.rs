// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary selector
//!
//! Evaluates its selector exactly once at initialize time and runs one of
//! two branches. Both branches' resources are reserved up front even though
//! only one runs, so there is no window between condition evaluation and
//! branch execution in which another command could claim them.

use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;

pub struct ConditionalCommand {
    on_true: Box<dyn Command>,
    on_false: Box<dyn Command>,
    selector: Box<dyn FnMut() -> bool>,
    selection: Option<bool>,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl ConditionalCommand {
    pub fn new(
        on_true: Box<dyn Command>,
        on_false: Box<dyn Command>,
        selector: impl FnMut() -> bool + 'static,
    ) -> Self {
        let mut requirements = on_true.requirements().clone();
        requirements.extend(on_false.requirements().iter().cloned());
        let behavior = if on_true.interruption_behavior() == InterruptionBehavior::CancelIncoming
            || on_false.interruption_behavior() == InterruptionBehavior::CancelIncoming
        {
            InterruptionBehavior::CancelIncoming
        } else {
            InterruptionBehavior::CancelSelf
        };
        Self {
            on_true,
            on_false,
            selector: Box::new(selector),
            selection: None,
            requirements,
            behavior,
        }
    }

    fn active(&mut self) -> Option<&mut Box<dyn Command>> {
        match self.selection {
            Some(true) => Some(&mut self.on_true),
            Some(false) => Some(&mut self.on_false),
            None => None,
        }
    }
}

impl Command for ConditionalCommand {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        self.selection = Some((self.selector)());
        match self.active() {
            Some(branch) => branch.initialize(ctx),
            None => Ok(()),
        }
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        match self.active() {
            Some(branch) => branch.execute(ctx),
            None => Ok(()),
        }
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        match self.active() {
            Some(branch) => branch.is_finished(ctx),
            None => true,
        }
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        if let Some(branch) = self.active() {
            branch.end(interrupted, ctx);
        }
        self.selection = None;
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}

#[cfg(test)]
#[path = "conditional_tests.rs"]
mod tests;
