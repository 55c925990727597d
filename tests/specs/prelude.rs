//! Shared helpers for the spec suite

use cadence_core::{
    Command, CommandError, CommandId, Context, FakeClock, InterruptionBehavior, ResourceId,
    ResourceSet, ScheduleOutcome, Scheduler, SequentialIdGen,
};
use std::cell::RefCell;
use std::rc::Rc;

pub use cadence_core::commands;

/// Shared lifecycle log written by [`Recording`] commands
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Index of the first matching entry; panics if absent.
pub fn position(log: &Log, entry: &str) -> usize {
    entries(log)
        .iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("log has no entry {entry:?}"))
}

pub fn count(log: &Log, entry: &str) -> usize {
    entries(log).iter().filter(|e| *e == entry).count()
}

/// A deterministic scheduler with controllable time.
pub fn scheduler() -> (Scheduler<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    (
        Scheduler::with_id_gen(clock.clone(), Box::new(SequentialIdGen::default())),
        clock,
    )
}

pub fn scheduled(outcome: ScheduleOutcome) -> CommandId {
    match outcome {
        ScheduleOutcome::Scheduled(id) => id,
        ScheduleOutcome::Rejected(_) => panic!("schedule was rejected"),
    }
}

/// A command that records every lifecycle call into a shared log and
/// finishes after a configurable number of executes.
pub struct Recording {
    name: &'static str,
    log: Log,
    finish_after: Option<u32>,
    executed: u32,
    requirements: ResourceSet,
    behavior: InterruptionBehavior,
}

impl Recording {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            finish_after: None,
            executed: 0,
            requirements: ResourceSet::new(),
            behavior: InterruptionBehavior::CancelSelf,
        }
    }

    pub fn finish_after(mut self, count: u32) -> Self {
        self.finish_after = Some(count);
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

impl Command for Recording {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
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
