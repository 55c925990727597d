// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proxy decorator
//!
//! Detaches a command's scheduling lifetime from its syntactic parent: when
//! the proxy initializes, the wrapped command is handed to the top-level
//! scheduler instead of being ticked inline, so a composing group does not
//! inherit its requirements. The proxy finishes once the proxied command is
//! no longer registered.
//!
//! Ownership of the inner command moves to the scheduler, so a proxy
//! supports one scheduling cycle per wrapped instance; `deferred_proxy`
//! constructs a fresh proxy each cycle.

use crate::command::{Command, ResourceSet};
use crate::error::CommandError;
use crate::id::CommandId;
use crate::scheduler::Context;

pub struct ProxyCommand {
    command: Option<Box<dyn Command>>,
    scheduled: Option<CommandId>,
    requirements: ResourceSet,
}

impl ProxyCommand {
    pub fn new(command: Box<dyn Command>) -> Self {
        Self {
            command: Some(command),
            scheduled: None,
            // Empty on purpose: detaching requirements is the point.
            requirements: ResourceSet::new(),
        }
    }
}

impl Command for ProxyCommand {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), CommandError> {
        let command = self.command.take().ok_or(CommandError::ProxyConsumed)?;
        self.scheduled = Some(ctx.schedule(command));
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_finished(&mut self, ctx: &mut Context) -> bool {
        match &self.scheduled {
            Some(id) => !ctx.is_scheduled(id),
            None => true,
        }
    }

    fn end(&mut self, interrupted: bool, ctx: &mut Context) {
        if interrupted {
            if let Some(id) = self.scheduled.take() {
                ctx.cancel(id);
            }
        }
        self.scheduled = None;
    }

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
