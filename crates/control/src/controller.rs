// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PIDF-family feedback controllers
//!
//! The controllers measure their own loop period from the injected clock, so
//! the integral and derivative terms adapt to uneven tick spacing. The first
//! `calculate` after construction or reset has no period and contributes
//! neither term.

use cadence_core::Clock;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A closed-loop controller driving a process variable toward a setpoint.
///
/// Object safe so composite controllers can mix implementations per axis.
pub trait Controller {
    /// One iteration: returns the control output for the measured `pv`
    /// against the new setpoint `sp`.
    fn calculate(&mut self, pv: f64, sp: f64) -> f64;

    /// Position error below which [`Controller::at_setpoint`] holds.
    fn set_tolerance(&mut self, tolerance: f64);

    fn tolerance(&self) -> f64;

    /// Whether the most recent error was within tolerance.
    fn at_setpoint(&self) -> bool;

    /// Clear accumulated state (integral, derivative history, loop period).
    fn reset(&mut self);
}

/// Proportional, integral, derivative, and feed-forward gains
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidfCoefficients {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub kf: f64,
}

impl PidfCoefficients {
    pub fn new(kp: f64, ki: f64, kd: f64, kf: f64) -> Self {
        Self { kp, ki, kd, kf }
    }
}

/// PIDF gains plus a low-pass time constant for the derivative input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredPidfCoefficients {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub time_constant: f64,
    pub kf: f64,
}

impl FilteredPidfCoefficients {
    pub fn new(kp: f64, ki: f64, kd: f64, time_constant: f64, kf: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            time_constant,
            kf,
        }
    }
}

/// u(t) = kP e(t) + kI ∫e dt + kD e'(t) + kF sp, with the integral clamped
/// to configurable bounds.
pub struct PidfController<C: Clock> {
    clock: C,
    coefficients: PidfCoefficients,
    setpoint: f64,
    error: f64,
    error_velocity: f64,
    total_error: f64,
    min_integral: f64,
    max_integral: f64,
    position_tolerance: f64,
    velocity_tolerance: f64,
    last_sample: Option<Instant>,
}

impl<C: Clock> PidfController<C> {
    pub fn new(coefficients: PidfCoefficients, clock: C) -> Self {
        Self {
            clock,
            coefficients,
            setpoint: 0.0,
            error: 0.0,
            error_velocity: 0.0,
            total_error: 0.0,
            min_integral: -1.0,
            max_integral: 1.0,
            position_tolerance: 0.05,
            velocity_tolerance: f64::INFINITY,
            last_sample: None,
        }
    }

    pub fn coefficients(&self) -> PidfCoefficients {
        self.coefficients
    }

    pub fn set_coefficients(&mut self, coefficients: PidfCoefficients) {
        self.coefficients = coefficients;
    }

    /// Clamp bounds for the accumulated integral term.
    pub fn set_integration_bounds(&mut self, min: f64, max: f64) {
        self.min_integral = min;
        self.max_integral = max;
    }

    /// Velocity error bound for [`Controller::at_setpoint`]; unbounded by
    /// default.
    pub fn set_velocity_tolerance(&mut self, tolerance: f64) {
        self.velocity_tolerance = tolerance;
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    /// Advance error, error velocity, and the clamped integral by one
    /// measured period.
    fn step(&mut self, pv: f64) {
        let now = self.clock.now();
        let period = match self.last_sample {
            Some(last) => (now - last).as_secs_f64(),
            None => 0.0,
        };
        self.last_sample = Some(now);

        let previous = self.error;
        self.error = self.setpoint - pv;
        self.error_velocity = if period > 1e-6 {
            (self.error - previous) / period
        } else {
            0.0
        };
        self.total_error = (self.total_error + period * self.error)
            .clamp(self.min_integral, self.max_integral);
    }

    fn output(&self, proportional: f64) -> f64 {
        let c = self.coefficients;
        c.kp * proportional
            + c.ki * self.total_error
            + c.kd * self.error_velocity
            + c.kf * self.setpoint
    }

    fn within_tolerance(&self) -> bool {
        self.error.abs() < self.position_tolerance
            && self.error_velocity.abs() < self.velocity_tolerance
    }

    fn clear(&mut self) {
        self.error = 0.0;
        self.error_velocity = 0.0;
        self.total_error = 0.0;
        self.last_sample = None;
    }
}

impl<C: Clock> Controller for PidfController<C> {
    fn calculate(&mut self, pv: f64, sp: f64) -> f64 {
        self.setpoint = sp;
        self.step(pv);
        self.output(self.error)
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.position_tolerance = tolerance;
    }

    fn tolerance(&self) -> f64 {
        self.position_tolerance
    }

    fn at_setpoint(&self) -> bool {
        self.within_tolerance()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// PIDF with the proportional error square-rooted, preserving sign.
///
/// The signed square root keeps negative error meaningful instead of
/// producing NaN.
pub struct SquidfController<C: Clock> {
    inner: PidfController<C>,
}

impl<C: Clock> SquidfController<C> {
    pub fn new(coefficients: PidfCoefficients, clock: C) -> Self {
        Self {
            inner: PidfController::new(coefficients, clock),
        }
    }

    pub fn set_integration_bounds(&mut self, min: f64, max: f64) {
        self.inner.set_integration_bounds(min, max);
    }
}

fn signed_sqrt(value: f64) -> f64 {
    value.signum() * value.abs().sqrt()
}

impl<C: Clock> Controller for SquidfController<C> {
    fn calculate(&mut self, pv: f64, sp: f64) -> f64 {
        self.inner.setpoint = sp;
        self.inner.step(pv);
        self.inner.output(signed_sqrt(self.inner.error))
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.inner.set_tolerance(tolerance);
    }

    fn tolerance(&self) -> f64 {
        self.inner.tolerance()
    }

    fn at_setpoint(&self) -> bool {
        self.inner.at_setpoint()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
