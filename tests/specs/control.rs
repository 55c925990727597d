//! Control-loop commands under the scheduler
//!
//! Verifies that clock-injected control math composes into commands and
//! stays deterministic when the fake clock drives both the scheduler and
//! the controllers.

use crate::prelude::*;
use cadence_control::{
    AngleUnit, ChassisSpeeds, Controller, PidfCoefficients, PidfController, Pose2d, PoseController,
    Timer,
};
use cadence_core::{Command, CommandError, Context, FakeClock, ResourceId, ResourceSet};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Drives a simulated holonomic chassis toward a target pose. The plant
/// model applies the commanded speeds directly, one step per tick.
struct DriveToPose {
    controller: PoseController,
    pose: Rc<RefCell<Pose2d>>,
    requirements: ResourceSet,
}

impl DriveToPose {
    fn new(clock: &FakeClock, pose: Rc<RefCell<Pose2d>>, target: Pose2d) -> Self {
        let axis = |kp: f64| -> Box<dyn Controller> {
            Box::new(PidfController::new(
                PidfCoefficients::new(kp, 0.0, 0.0, 0.0),
                clock.clone(),
            ))
        };
        let mut controller = PoseController::new(
            axis(0.5),
            axis(0.5),
            axis(0.5),
            AngleUnit::Degrees,
            0.1,
            1.0,
        );
        controller.set_target(target);
        Self {
            controller,
            pose,
            requirements: [ResourceId::from("drive")].into_iter().collect(),
        }
    }
}

impl Command for DriveToPose {
    fn initialize(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context) -> Result<(), CommandError> {
        let current = *self.pose.borrow();
        let ChassisSpeeds { vx, vy, omega } = self.controller.calculate(current);
        let mut pose = self.pose.borrow_mut();
        pose.x += vx;
        pose.y += vy;
        pose.heading += omega;
        Ok(())
    }

    fn is_finished(&mut self, _ctx: &mut Context) -> bool {
        self.controller.at_target()
    }

    fn end(&mut self, _interrupted: bool, _ctx: &mut Context) {}

    fn requirements(&self) -> &ResourceSet {
        &self.requirements
    }
}

#[test]
fn pose_command_settles_on_its_target() {
    let (mut scheduler, clock) = scheduler();
    let pose = Rc::new(RefCell::new(Pose2d::new(0.0, 0.0, 0.0)));
    let target = Pose2d::new(8.0, -4.0, 90.0);
    let id = scheduled(
        scheduler
            .schedule(Box::new(DriveToPose::new(&clock, Rc::clone(&pose), target)))
            .unwrap(),
    );

    for _ in 0..20 {
        clock.advance_millis(20);
        scheduler.run().unwrap();
        if !scheduler.is_scheduled(&id) {
            break;
        }
    }

    assert!(!scheduler.is_scheduled(&id));
    let settled = *pose.borrow();
    assert!((settled.x - target.x).abs() < 0.1);
    assert!((settled.y - target.y).abs() < 0.1);
    assert!((settled.heading - target.heading).abs() < 1.0);
}

#[test]
fn timer_gated_command_finishes_when_the_timer_runs_out() {
    let (mut scheduler, clock) = scheduler();
    let mut timer = Timer::new(Duration::from_millis(100), clock.clone());
    timer.start();
    let id = scheduled(
        scheduler
            .schedule(commands::wait_until(move || timer.done()))
            .unwrap(),
    );

    clock.advance_millis(60);
    scheduler.run().unwrap();
    assert!(scheduler.is_scheduled(&id));

    clock.advance_millis(60);
    scheduler.run().unwrap();
    assert!(!scheduler.is_scheduled(&id));
}
