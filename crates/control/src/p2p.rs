// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pose-to-pose controller
//!
//! Drives a holonomic chassis from its last known pose straight toward a
//! target pose: one [`Controller`] per field axis plus one for heading. The
//! heading loop is fed the normalized heading error against a zero setpoint,
//! so the robot always turns the short way around.

use crate::controller::Controller;
use crate::geometry::{normalize_angle, AngleUnit, ChassisSpeeds, Pose2d, Transform2d};

pub struct PoseController {
    x: Box<dyn Controller>,
    y: Box<dyn Controller>,
    heading: Box<dyn Controller>,
    angle_unit: AngleUnit,
    target: Pose2d,
}

impl PoseController {
    /// `positional_tolerance` applies to both field axes;
    /// `angular_tolerance` is in `angle_unit`.
    pub fn new(
        x: Box<dyn Controller>,
        y: Box<dyn Controller>,
        heading: Box<dyn Controller>,
        angle_unit: AngleUnit,
        positional_tolerance: f64,
        angular_tolerance: f64,
    ) -> Self {
        let mut controller = Self {
            x,
            y,
            heading,
            angle_unit,
            target: Pose2d::default(),
        };
        controller.set_tolerance(positional_tolerance, angular_tolerance);
        controller
    }

    /// One iteration toward the target from the last known pose.
    pub fn calculate(&mut self, current: Pose2d) -> ChassisSpeeds {
        let error = self.target.minus(&current);
        let vx = self.x.calculate(current.x, self.target.x);
        let vy = self.y.calculate(current.y, self.target.y);
        let omega = self
            .heading
            .calculate(0.0, normalize_angle(error.dheading, self.angle_unit));
        ChassisSpeeds::new(vx, vy, omega)
    }

    pub fn set_target(&mut self, target: Pose2d) {
        self.target = target;
    }

    pub fn target(&self) -> Pose2d {
        self.target
    }

    pub fn set_tolerance(&mut self, positional: f64, angular: f64) {
        self.x.set_tolerance(positional);
        self.y.set_tolerance(positional);
        self.heading.set_tolerance(angular);
    }

    /// Positional and angular tolerances, in that order.
    pub fn tolerance(&self) -> (f64, f64) {
        (self.x.tolerance(), self.heading.tolerance())
    }

    /// Whether all three axes are within tolerance of the target.
    pub fn at_target(&self) -> bool {
        self.x.at_setpoint() && self.y.at_setpoint() && self.heading.at_setpoint()
    }

    /// The displacement from `current` to the target.
    pub fn error(&self, current: &Pose2d) -> Transform2d {
        self.target.minus(current)
    }
}

#[cfg(test)]
#[path = "p2p_tests.rs"]
mod tests;
