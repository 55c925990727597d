// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! 2D pose geometry and angle normalization

use serde::{Deserialize, Serialize};

/// Unit of every heading value passed alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    fn half_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 180.0,
            AngleUnit::Radians => std::f64::consts::PI,
        }
    }
}

/// Wrap an angle into `(-half turn, half turn]`, keeping it congruent with
/// the input.
pub fn normalize_angle(angle: f64, unit: AngleUnit) -> f64 {
    let half = unit.half_turn();
    let full = 2.0 * half;
    let mut wrapped = angle % full;
    if wrapped > half {
        wrapped -= full;
    }
    if wrapped < -half {
        wrapped += full;
    }
    wrapped
}

/// A field-centric position and heading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2d {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose2d {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Component-wise difference, `self - other`. The heading delta is raw;
    /// callers normalize it in the unit they work in.
    pub fn minus(&self, other: &Pose2d) -> Transform2d {
        Transform2d {
            dx: self.x - other.x,
            dy: self.y - other.y,
            dheading: self.heading - other.heading,
        }
    }
}

/// The displacement between two poses
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform2d {
    pub dx: f64,
    pub dy: f64,
    pub dheading: f64,
}

impl Transform2d {
    /// Straight-line distance of the positional component.
    pub fn norm(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Field-centric velocity command for a holonomic drivetrain
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChassisSpeeds {
    pub vx: f64,
    pub vy: f64,
    pub omega: f64,
}

impl ChassisSpeeds {
    pub fn new(vx: f64, vy: f64, omega: f64) -> Self {
        Self { vx, vy, omega }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
