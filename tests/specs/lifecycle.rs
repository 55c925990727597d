//! End-exactly-once specs across every termination path

use crate::prelude::*;
use cadence_core::{InterruptionBehavior, ResourceId};

fn end_count(log: &Log, name: &str) -> usize {
    entries(log)
        .iter()
        .filter(|e| e.starts_with(&format!("{name}:end")))
        .count()
}

#[test]
fn natural_finish_ends_exactly_once() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    scheduled(
        scheduler
            .schedule(Recording::new("a", &log).finish_after(1).boxed())
            .unwrap(),
    );

    for _ in 0..3 {
        scheduler.run().unwrap();
    }
    assert_eq!(end_count(&log, "a"), 1);
    assert_eq!(count(&log, "a:end(finished)"), 1);
}

#[test]
fn explicit_cancellation_ends_exactly_once() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let id = scheduled(
        scheduler
            .schedule(Recording::new("a", &log).boxed())
            .unwrap(),
    );

    scheduler.run().unwrap();
    scheduler.cancel(&id).unwrap();
    // A second cancel of a retired id is a no-op.
    scheduler.cancel(&id).unwrap();
    scheduler.run().unwrap();

    assert_eq!(end_count(&log, "a"), 1);
    assert_eq!(count(&log, "a:end(interrupted)"), 1);
}

#[test]
fn conflict_eviction_ends_exactly_once() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");
    scheduled(
        scheduler
            .schedule(
                Recording::new("victim", &log)
                    .requires([drive.clone()])
                    .boxed(),
            )
            .unwrap(),
    );
    scheduled(
        scheduler
            .schedule(
                Recording::new("incoming", &log)
                    .requires([drive.clone()])
                    .boxed(),
            )
            .unwrap(),
    );

    scheduler.run().unwrap();
    assert_eq!(end_count(&log, "victim"), 1);
}

#[test]
fn shutdown_ends_every_running_command_exactly_once() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    for name in ["a", "b", "c"] {
        scheduled(
            scheduler
                .schedule(Recording::new(name, &log).boxed())
                .unwrap(),
        );
    }

    scheduler.run().unwrap();
    scheduler.cancel_all();

    for name in ["a", "b", "c"] {
        assert_eq!(end_count(&log, name), 1);
    }
}

#[test]
fn every_child_of_an_interrupted_composition_ends_exactly_once() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let id = scheduled(
        scheduler
            .schedule(commands::sequence(vec![
                Recording::new("step", &log).finish_after(1).boxed(),
                commands::parallel(vec![
                    Recording::new("left", &log).boxed(),
                    Recording::new("right", &log).finish_after(1).boxed(),
                ]),
            ]))
            .unwrap(),
    );

    scheduler.run().unwrap(); // step finishes, parallel starts
    scheduler.run().unwrap(); // right finishes inside the parallel
    scheduler.cancel(&id).unwrap();

    assert_eq!(end_count(&log, "step"), 1);
    assert_eq!(count(&log, "step:end(finished)"), 1);
    assert_eq!(end_count(&log, "right"), 1);
    assert_eq!(count(&log, "right:end(finished)"), 1);
    assert_eq!(end_count(&log, "left"), 1);
    assert_eq!(count(&log, "left:end(interrupted)"), 1);
}

#[test]
fn selector_branches_end_exactly_once_per_cycle() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let id = scheduled(
        scheduler
            .schedule(commands::either(
                Recording::new("yes", &log).boxed(),
                Recording::new("no", &log).boxed(),
                || true,
            ))
            .unwrap(),
    );

    scheduler.run().unwrap();
    scheduler.cancel(&id).unwrap();

    assert_eq!(end_count(&log, "yes"), 1);
    assert_eq!(end_count(&log, "no"), 0);
}

#[test]
fn failed_composite_initialize_ends_children_that_already_started() {
    use cadence_core::Command;
    use std::collections::HashMap;

    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");
    // An empty selection table fails initialize after the first child ran.
    let table: HashMap<&str, Box<dyn Command>> = HashMap::new();
    let result = scheduler.schedule(commands::parallel(vec![
        Recording::new("started", &log)
            .requires([drive.clone()])
            .boxed(),
        commands::select(table, || "missing"),
    ]));

    assert!(result.is_err());
    assert_eq!(count(&log, "started:init"), 1);
    assert_eq!(count(&log, "started:end(interrupted)"), 1);
    // The group's resources were released with it.
    assert_eq!(scheduler.current_command(&drive), None);
}

#[test]
fn rejection_is_not_a_cycle_and_ends_nothing() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");
    scheduled(
        scheduler
            .schedule(
                Recording::new("owner", &log)
                    .requires([drive.clone()])
                    .with_behavior(InterruptionBehavior::CancelIncoming)
                    .boxed(),
            )
            .unwrap(),
    );

    let outcome = scheduler
        .schedule(
            Recording::new("rejected", &log)
                .requires([drive.clone()])
                .boxed(),
        )
        .unwrap();
    drop(outcome);

    scheduler.run().unwrap();
    assert_eq!(end_count(&log, "rejected"), 0);
    assert!(!entries(&log).contains(&"rejected:init".to_string()));
}
