// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cooperative tick-driven scheduler
//!
//! Owns the currently-running top-level commands and the resource-ownership
//! map. Each call to [`Scheduler::run`] is one tick: periodic resource hooks
//! fire, every scheduled command is polled once in registration order,
//! finished commands are retired, deferred schedule/cancel requests from
//! commands (proxies) are applied, and default commands are resumed for
//! resources left without an owner.
//!
//! Commands never see the scheduler directly. They get a per-tick [`Context`]
//! that carries the tick's timestamp and a deferred request queue, which is
//! how a proxy can hand its inner command to the scheduler while the
//! scheduler is mid-poll.

use crate::clock::{Clock, SystemClock};
use crate::command::{Command, InterruptionBehavior, LifecycleState, ResourceId};
use crate::error::{CommandError, SchedulerError};
use crate::event::Event;
use crate::id::{CommandId, IdGen, UuidIdGen};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// A registerable resource: identity plus an optional hook invoked once per
/// tick regardless of scheduling state (sensor refresh and the like).
pub struct Resource {
    id: ResourceId,
    periodic: Option<Box<dyn FnMut()>>,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            periodic: None,
        }
    }

    pub fn with_periodic(mut self, hook: impl FnMut() + 'static) -> Self {
        self.periodic = Some(Box::new(hook));
        self
    }
}

/// Result of a schedule attempt. Losing a resource conflict to a
/// `CancelIncoming` owner is a normal outcome, not an error; the command is
/// handed back so the caller can retry later.
pub enum ScheduleOutcome {
    Scheduled(CommandId),
    Rejected(Box<dyn Command>),
}

impl std::fmt::Debug for ScheduleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled(id) => f.debug_tuple("Scheduled").field(id).finish(),
            Self::Rejected(_) => f.debug_tuple("Rejected").finish_non_exhaustive(),
        }
    }
}

/// A deferred scheduler mutation requested by a command mid-tick
pub(crate) enum Request {
    Schedule {
        id: CommandId,
        command: Box<dyn Command>,
    },
    Cancel {
        id: CommandId,
    },
}

/// State shared between the scheduler and the per-tick contexts it hands to
/// commands.
pub(crate) struct TickShared {
    id_gen: Box<dyn IdGen>,
    requests: Vec<Request>,
    live: BTreeSet<CommandId>,
}

impl TickShared {
    pub(crate) fn new(id_gen: Box<dyn IdGen>) -> Self {
        Self {
            id_gen,
            requests: Vec::new(),
            live: BTreeSet::new(),
        }
    }
}

/// Per-tick handle given to commands while they are polled.
///
/// This replaces the global scheduler singleton of classic command-based
/// frameworks: commands that need the scheduler (proxies) queue requests
/// here, and the scheduler applies them after the poll pass.
pub struct Context<'a> {
    now: Instant,
    shared: &'a mut TickShared,
}

impl<'a> Context<'a> {
    pub(crate) fn new(now: Instant, shared: &'a mut TickShared) -> Self {
        Self { now, shared }
    }

    /// The timestamp of the current tick. Stable for the whole tick.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Request that a command be scheduled independently on the top-level
    /// scheduler. Applied after the current poll pass.
    pub fn schedule(&mut self, command: Box<dyn Command>) -> CommandId {
        let id = CommandId(self.shared.id_gen.next());
        self.shared.requests.push(Request::Schedule {
            id: id.clone(),
            command,
        });
        id
    }

    /// Request cancellation of an independently scheduled command.
    pub fn cancel(&mut self, id: CommandId) {
        self.shared.requests.push(Request::Cancel { id });
    }

    /// Whether the given command is currently scheduled or has a pending
    /// schedule request.
    pub fn is_scheduled(&self, id: &CommandId) -> bool {
        self.shared.live.contains(id)
            || self
                .shared
                .requests
                .iter()
                .any(|r| matches!(r, Request::Schedule { id: rid, .. } if rid == id))
    }
}

#[derive(Default)]
struct ResourceSlot {
    periodic: Option<Box<dyn FnMut()>>,
    default_command: Option<Box<dyn Command>>,
    owner: Option<CommandId>,
}

struct Entry {
    id: CommandId,
    command: Box<dyn Command>,
    state: LifecycleState,
    /// Set when this entry is a resource's default command; the command is
    /// returned to the resource slot on retirement so it can be resumed.
    default_of: Option<ResourceId>,
}

/// Outcome of an internal schedule attempt
enum Attempt {
    Scheduled(CommandId),
    Rejected {
        command: Box<dyn Command>,
        blocker: CommandId,
    },
}

/// Result of polling one entry
enum Polled {
    Pending,
    Finished,
    Failed(CommandError),
}

/// The run loop and resource-ownership map
pub struct Scheduler<C: Clock> {
    clock: C,
    resources: BTreeMap<ResourceId, ResourceSlot>,
    entries: Vec<Entry>,
    shared: TickShared,
    events: Vec<Event>,
}

impl Scheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Scheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_id_gen(clock, Box::new(UuidIdGen))
    }

    /// Use a caller-supplied ID generator (deterministic ids in tests).
    pub fn with_id_gen(clock: C, id_gen: Box<dyn IdGen>) -> Self {
        Self {
            clock,
            resources: BTreeMap::new(),
            entries: Vec::new(),
            shared: TickShared::new(id_gen),
            events: Vec::new(),
        }
    }

    /// Register a resource up front, with its periodic hook if any.
    ///
    /// Registration is optional for plain requirements: scheduling a command
    /// that requires an unknown resource creates the slot on demand.
    pub fn register(&mut self, resource: Resource) {
        let slot = self.resources.entry(resource.id).or_default();
        slot.periodic = resource.periodic;
    }

    /// Assign or replace the default command for a resource. The command
    /// must require the resource; it is (re)scheduled whenever the resource
    /// has no owner at the end of a tick.
    pub fn set_default_command(
        &mut self,
        resource: &ResourceId,
        command: Box<dyn Command>,
    ) -> Result<(), SchedulerError> {
        if !command.requirements().contains(resource) {
            return Err(SchedulerError::DefaultMissingRequirement(resource.clone()));
        }
        let slot = self.resources.entry(resource.clone()).or_default();
        slot.default_command = Some(command);
        Ok(())
    }

    /// Schedule a top-level command, resolving resource conflicts first.
    ///
    /// Owners with `CancelSelf` are interrupted and evicted before the new
    /// command initializes; any owner with `CancelIncoming` causes rejection
    /// and the command is returned untouched.
    pub fn schedule(
        &mut self,
        command: Box<dyn Command>,
    ) -> Result<ScheduleOutcome, SchedulerError> {
        let now = self.clock.now();
        let id = CommandId(self.shared.id_gen.next());
        let attempt = self.schedule_with_id(id, command, None, now)?;
        self.apply_requests(now)?;
        Ok(match attempt {
            Attempt::Scheduled(id) => ScheduleOutcome::Scheduled(id),
            Attempt::Rejected { command, .. } => ScheduleOutcome::Rejected(command),
        })
    }

    /// Run one tick.
    pub fn run(&mut self) -> Result<(), SchedulerError> {
        let now = self.clock.now();

        for slot in self.resources.values_mut() {
            if let Some(hook) = &mut slot.periodic {
                hook();
            }
        }

        let mut idx = 0;
        while idx < self.entries.len() {
            let polled = {
                let entry = &mut self.entries[idx];
                entry.state = LifecycleState::Running;
                let mut ctx = Context::new(now, &mut self.shared);
                match entry.command.execute(&mut ctx) {
                    Err(source) => Polled::Failed(source),
                    Ok(()) => {
                        if entry.command.is_finished(&mut ctx) {
                            entry.state = LifecycleState::Ended;
                            entry.command.end(false, &mut ctx);
                            Polled::Finished
                        } else {
                            Polled::Pending
                        }
                    }
                }
            };
            match polled {
                Polled::Pending => idx += 1,
                Polled::Finished => self.finish_entry(idx),
                Polled::Failed(source) => {
                    let id = self.entries[idx].id.clone();
                    self.interrupt_entry(idx, now);
                    return Err(SchedulerError::ExecuteFailed { id, source });
                }
            }
        }

        self.apply_requests(now)?;
        self.resume_defaults(now)
    }

    /// Cancel a scheduled command. Its `end(true)` runs before this returns.
    pub fn cancel(&mut self, id: &CommandId) -> Result<(), SchedulerError> {
        let now = self.clock.now();
        if let Some(idx) = self.entries.iter().position(|e| e.id == *id) {
            self.interrupt_entry(idx, now);
        }
        self.apply_requests(now)
    }

    /// End every running command with `interrupted = true` and drop pending
    /// requests. Default commands are not resumed.
    pub fn cancel_all(&mut self) {
        let now = self.clock.now();
        while !self.entries.is_empty() {
            self.interrupt_entry(0, now);
        }
        self.shared.requests.clear();
    }

    pub fn is_scheduled(&self, id: &CommandId) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }

    /// The command currently owning a resource, if any.
    pub fn current_command(&self, resource: &ResourceId) -> Option<CommandId> {
        self.resources
            .get(resource)
            .and_then(|slot| slot.owner.clone())
    }

    /// Lifecycle state of a scheduled command. `None` once it has retired.
    pub fn lifecycle(&self, id: &CommandId) -> Option<LifecycleState> {
        self.entries
            .iter()
            .find(|e| e.id == *id)
            .map(|e| e.state)
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn schedule_with_id(
        &mut self,
        id: CommandId,
        mut command: Box<dyn Command>,
        default_of: Option<ResourceId>,
        now: Instant,
    ) -> Result<Attempt, SchedulerError> {
        let requirements: Vec<ResourceId> = command.requirements().iter().cloned().collect();

        // Conflict scan is pure: nothing is evicted until we know no owner
        // rejects the incoming command.
        let mut evictions: Vec<CommandId> = Vec::new();
        for resource in &requirements {
            let Some(owner) = self
                .resources
                .get(resource)
                .and_then(|slot| slot.owner.clone())
            else {
                continue;
            };
            let behavior = self
                .entries
                .iter()
                .find(|e| e.id == owner)
                .map(|e| e.command.interruption_behavior());
            if behavior == Some(InterruptionBehavior::CancelIncoming) {
                tracing::debug!(%id, blocker = %owner, resource = %resource, "schedule rejected by running command");
                self.events.push(Event::Rejected {
                    id,
                    blocker: owner.clone(),
                });
                return Ok(Attempt::Rejected {
                    command,
                    blocker: owner,
                });
            }
            if !evictions.contains(&owner) {
                evictions.push(owner);
            }
        }

        for victim in evictions {
            if let Some(idx) = self.entries.iter().position(|e| e.id == victim) {
                tracing::debug!(victim = %victim, incoming = %id, "evicting conflicting owner");
                self.interrupt_entry(idx, now);
            }
        }

        // Claim every requirement before initialize runs.
        for resource in &requirements {
            self.resources.entry(resource.clone()).or_default().owner = Some(id.clone());
        }
        self.shared.live.insert(id.clone());

        let mut ctx = Context::new(now, &mut self.shared);
        if let Err(source) = command.initialize(&mut ctx) {
            self.shared.live.remove(&id);
            for resource in &requirements {
                if let Some(slot) = self.resources.get_mut(resource) {
                    if slot.owner.as_ref() == Some(&id) {
                        slot.owner = None;
                    }
                }
            }
            tracing::warn!(%id, error = %source, "command failed to initialize");
            return Err(SchedulerError::InitializeFailed { id, source });
        }

        tracing::debug!(%id, "command scheduled");
        self.events.push(Event::Scheduled { id: id.clone() });
        self.entries.push(Entry {
            id: id.clone(),
            command,
            state: LifecycleState::Initialized,
            default_of,
        });
        Ok(Attempt::Scheduled(id))
    }

    /// Apply deferred schedule/cancel requests until the queue is empty.
    /// Applying a schedule can queue more requests (a proxy inside a
    /// deferred command), so this loops.
    fn apply_requests(&mut self, now: Instant) -> Result<(), SchedulerError> {
        while !self.shared.requests.is_empty() {
            let batch: Vec<Request> = std::mem::take(&mut self.shared.requests);
            for request in batch {
                match request {
                    Request::Schedule { id, command } => {
                        // Rejection drops the command; its proxy observes the
                        // missing registration and finishes.
                        self.schedule_with_id(id, command, None, now)?;
                    }
                    Request::Cancel { id } => {
                        if let Some(idx) = self.entries.iter().position(|e| e.id == id) {
                            self.interrupt_entry(idx, now);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Resume default commands for resources left without an owner.
    fn resume_defaults(&mut self, now: Instant) -> Result<(), SchedulerError> {
        let idle: Vec<ResourceId> = self
            .resources
            .iter()
            .filter(|(_, slot)| slot.owner.is_none() && slot.default_command.is_some())
            .map(|(id, _)| id.clone())
            .collect();

        for resource in idle {
            let command = {
                let Some(slot) = self.resources.get_mut(&resource) else {
                    continue;
                };
                // An earlier default this pass may have claimed this
                // resource as a secondary requirement.
                if slot.owner.is_some() {
                    continue;
                }
                match slot.default_command.take() {
                    Some(command) => command,
                    None => continue,
                }
            };
            let id = CommandId(self.shared.id_gen.next());
            match self.schedule_with_id(id, command, Some(resource.clone()), now)? {
                Attempt::Scheduled(id) => {
                    tracing::debug!(resource = %resource, %id, "default command resumed");
                    self.events.push(Event::DefaultResumed { resource, id });
                }
                Attempt::Rejected { command, .. } => {
                    if let Some(slot) = self.resources.get_mut(&resource) {
                        slot.default_command = Some(command);
                    }
                }
            }
        }
        self.apply_requests(now)
    }

    /// Retire an entry that already ended naturally during the poll pass.
    fn finish_entry(&mut self, idx: usize) {
        let entry = self.entries.remove(idx);
        tracing::debug!(id = %entry.id, "command finished");
        self.events.push(Event::Finished {
            id: entry.id.clone(),
        });
        self.release(entry);
    }

    /// End an entry with `interrupted = true` and retire it.
    fn interrupt_entry(&mut self, idx: usize, now: Instant) {
        let mut entry = self.entries.remove(idx);
        entry.state = LifecycleState::Ended;
        let mut ctx = Context::new(now, &mut self.shared);
        entry.command.end(true, &mut ctx);
        tracing::debug!(id = %entry.id, "command interrupted");
        self.events.push(Event::Interrupted {
            id: entry.id.clone(),
        });
        self.release(entry);
    }

    /// Release a retired entry's resources and return a default command to
    /// its slot for later resumption.
    fn release(&mut self, entry: Entry) {
        self.shared.live.remove(&entry.id);
        for resource in entry.command.requirements() {
            if let Some(slot) = self.resources.get_mut(resource) {
                if slot.owner.as_ref() == Some(&entry.id) {
                    slot.owner = None;
                }
            }
        }
        if let Some(resource) = entry.default_of {
            if let Some(slot) = self.resources.get_mut(&resource) {
                // A reassigned default takes precedence over the retiring one.
                if slot.default_command.is_none() {
                    slot.default_command = Some(entry.command);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
