//! Selector and proxy specs

use crate::prelude::*;
use cadence_core::ResourceId;
use std::collections::HashMap;

#[test]
fn proxy_keeps_its_requirements_out_of_the_parent_group() {
    let log = new_log();
    let drive = ResourceId::from("drive");
    let group = commands::parallel(vec![
        commands::proxy(
            Recording::new("inner", &log)
                .requires([drive.clone()])
                .boxed(),
        ),
        Recording::new("other", &log)
            .requires([ResourceId::from("intake")])
            .boxed(),
    ]);

    assert!(!group.requirements().contains(&drive));
}

#[test]
fn proxied_command_owns_its_resource_independently_of_the_group() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");
    let intake = ResourceId::from("intake");
    let group = commands::parallel(vec![
        commands::proxy(
            Recording::new("inner", &log)
                .requires([drive.clone()])
                .finish_after(1)
                .boxed(),
        ),
        Recording::new("other", &log)
            .requires([intake.clone()])
            .finish_after(3)
            .boxed(),
    ]);
    let group_id = scheduled(scheduler.schedule(group).unwrap());

    // The group holds the intake; the detached inner command holds the drive
    // under its own id.
    assert_eq!(scheduler.current_command(&intake), Some(group_id.clone()));
    let inner_owner = scheduler.current_command(&drive).unwrap();
    assert_ne!(inner_owner, group_id);

    for _ in 0..4 {
        scheduler.run().unwrap();
    }
    assert_eq!(count(&log, "inner:end(finished)"), 1);
    assert_eq!(count(&log, "other:end(finished)"), 1);
}

#[test]
fn either_reserves_both_branches_resources() {
    let log = new_log();
    let command = commands::either(
        Recording::new("yes", &log)
            .requires([ResourceId::from("arm")])
            .boxed(),
        Recording::new("no", &log)
            .requires([ResourceId::from("wrist")])
            .boxed(),
        || true,
    );

    assert!(command.requirements().contains(&ResourceId::from("arm")));
    assert!(command.requirements().contains(&ResourceId::from("wrist")));
}

#[test]
fn select_runs_exactly_the_mapped_command() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let table: HashMap<&str, _> = HashMap::from([
        ("near", Recording::new("near", &log).finish_after(1).boxed()),
        ("far", Recording::new("far", &log).finish_after(1).boxed()),
    ]);
    let id = scheduled(
        scheduler
            .schedule(commands::select(table, || "far"))
            .unwrap(),
    );

    scheduler.run().unwrap();
    assert!(!scheduler.is_scheduled(&id));
    assert_eq!(count(&log, "far:end(finished)"), 1);
    assert!(!entries(&log).iter().any(|e| e.starts_with("near:")));
}

#[test]
fn deferred_proxy_constructs_a_fresh_command_when_scheduled() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let builds = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let probe = std::rc::Rc::clone(&builds);
    let supplier_log = log.clone();
    let id = scheduled(
        scheduler
            .schedule(commands::deferred_proxy(move || {
                probe.set(probe.get() + 1);
                Recording::new("inner", &supplier_log).finish_after(1).boxed()
            }))
            .unwrap(),
    );

    assert_eq!(builds.get(), 1);
    scheduler.run().unwrap();
    scheduler.run().unwrap();
    assert!(!scheduler.is_scheduled(&id));
    assert_eq!(count(&log, "inner:end(finished)"), 1);
}
