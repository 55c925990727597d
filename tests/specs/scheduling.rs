//! Resource ownership and conflict resolution specs

use crate::prelude::*;
use cadence_core::{Event, InterruptionBehavior, ResourceId, Resource, ScheduleOutcome};

#[test]
fn a_resource_never_has_two_owners() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let claw = ResourceId::from("claw");
    let lift = ResourceId::from("lift");

    let first = scheduled(
        scheduler
            .schedule(
                Recording::new("first", &log)
                    .requires([claw.clone(), lift.clone()])
                    .boxed(),
            )
            .unwrap(),
    );
    let second = scheduled(
        scheduler
            .schedule(
                Recording::new("second", &log)
                    .requires([lift.clone()])
                    .boxed(),
            )
            .unwrap(),
    );

    // The overlapping owner was evicted entirely, not just off the shared
    // resource.
    assert!(!scheduler.is_scheduled(&first));
    assert_eq!(scheduler.current_command(&lift), Some(second));
    assert_eq!(scheduler.current_command(&claw), None);
}

#[test]
fn evicted_owner_ends_before_the_incoming_command_initializes() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");

    scheduled(
        scheduler
            .schedule(
                Recording::new("old", &log)
                    .requires([drive.clone()])
                    .boxed(),
            )
            .unwrap(),
    );
    let incoming = scheduled(
        scheduler
            .schedule(
                Recording::new("new", &log)
                    .requires([drive.clone()])
                    .boxed(),
            )
            .unwrap(),
    );

    assert!(position(&log, "old:end(interrupted)") < position(&log, "new:init"));
    assert_eq!(scheduler.current_command(&drive), Some(incoming));
}

#[test]
fn cancel_incoming_owner_survives_and_the_incoming_command_is_returned() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");

    let owner = scheduled(
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
            Recording::new("incoming", &log)
                .requires([drive.clone()])
                .boxed(),
        )
        .unwrap();

    assert!(matches!(outcome, ScheduleOutcome::Rejected(_)));
    assert_eq!(scheduler.current_command(&drive), Some(owner));
    assert!(!entries(&log).iter().any(|e| e.starts_with("incoming:")));
}

#[test]
fn default_command_resumes_on_the_tick_after_its_resource_frees_up() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let drive = ResourceId::from("drive");
    scheduler.register(Resource::new(drive.clone()));
    scheduler
        .set_default_command(
            &drive,
            Recording::new("default", &log)
                .requires([drive.clone()])
                .boxed(),
        )
        .unwrap();

    scheduled(
        scheduler
            .schedule(
                Recording::new("auto", &log)
                    .requires([drive.clone()])
                    .finish_after(2)
                    .boxed(),
            )
            .unwrap(),
    );

    scheduler.run().unwrap();
    scheduler.run().unwrap(); // auto finishes; default is scheduled
    assert_eq!(count(&log, "default:init"), 1);
    assert_eq!(count(&log, "default:exec"), 0);

    let resumed = scheduler
        .drain_events()
        .into_iter()
        .find_map(|event| match event {
            Event::DefaultResumed { resource, id } if resource == drive => Some(id),
            _ => None,
        })
        .unwrap();
    assert_eq!(scheduler.current_command(&drive), Some(resumed));

    // First execute lands on the following tick.
    scheduler.run().unwrap();
    assert_eq!(count(&log, "default:exec"), 1);
}

#[test]
fn periodic_hooks_run_every_tick_even_while_owned() {
    let (mut scheduler, _clock) = scheduler();
    let log = new_log();
    let reads = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let probe = std::rc::Rc::clone(&reads);
    let imu = ResourceId::from("imu");
    scheduler.register(Resource::new(imu.clone()).with_periodic(move || {
        probe.set(probe.get() + 1);
    }));
    scheduled(
        scheduler
            .schedule(Recording::new("hold", &log).requires([imu]).boxed())
            .unwrap(),
    );

    scheduler.run().unwrap();
    scheduler.run().unwrap();
    assert_eq!(reads.get(), 2);
}
