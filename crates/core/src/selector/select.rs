// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyed selector
//!
//! Evaluates its selector once at initialize time and runs the command
//! mapped to the produced key. A key with no mapped command is a fatal
//! configuration error, never silently ignored. Like the binary
//! conditional, the requirement set is the union across every mapped
//! command.

use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use crate::scheduler::Context;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub struct SelectCommand<K> {
    commands: HashMap<K, Box<dyn Command>>,
    selector: Box<dyn FnMut() -> K>,
    active: Option<K>,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl<K: Eq + Hash + Debug> SelectCommand<K> {
    pub fn new(
        commands: HashMap<K, Box<dyn Command>>,
        selector: impl FnMut() -> K + 'static,
    ) -> Self {
        let mut requirements = ResourceSet::new();
        let mut behavior = InterruptionBehavior::CancelSelf;
        for command in commands.values() {
            requirements.extend(command.requirements().iter().cloned());
            if command.interruption_behavior() == InterruptionBehavior::CancelIncoming {
                behavior = InterruptionBehavior::CancelIncoming;
            }
        }
        Self {
            commands,
            selector: Box::new(selector),
            active: None,
            requirements,
            behavior,
        }
    }

    fn active(&mut self) -> Option<&mut Box<dyn Command>> {
        let key = self.active.as_ref()?;
        self.commands.get_mut(key)
    }
}

impl<K: Eq + Hash + Debug> Command for SelectCommand<K> {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        let key = (self.selector)();
        let Some(command) = self.commands.get_mut(&key) else {
            return Err(CommandError::UnknownSelection {
                key: format!("{key:?}"),
            });
        };
        command.initialize(ctx)?;
        self.active = Some(key);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        match self.active() {
            Some(command) => command.execute(ctx),
            None => Ok(()),
        }
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        match self.active() {
            Some(command) => command.is_finished(ctx),
            None => true,
        }
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        if let Some(command) = self.active() {
            command.end(interrupted, ctx);
        }
        self.active = None;
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }

    fn interruption_behavior(&self) -> InterruptionBehavior {
        self.behavior
    }
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
