// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scalar Kalman filter
//!
//! Fuses a model-predicted change with a noisy measurement of the same
//! quantity. Useful for smoothing single-axis sensor streams (heading,
//! distance) without a full state-space filter.

use serde::{Deserialize, Serialize};

/// Noise characteristics of the filter: how much to distrust the model
/// prediction versus the incoming data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanFilterParameters {
    pub model_covariance: f64,
    pub data_covariance: f64,
}

impl KalmanFilterParameters {
    pub fn new(model_covariance: f64, data_covariance: f64) -> Self {
        Self {
            model_covariance,
            data_covariance,
        }
    }
}

/// Predict/correct loop over a single scalar state
pub struct KalmanFilter {
    parameters: KalmanFilterParameters,
    state: f64,
    variance: f64,
    gain: f64,
}

impl KalmanFilter {
    pub fn new(parameters: KalmanFilterParameters) -> Self {
        Self {
            parameters,
            state: 0.0,
            variance: 1.0,
            gain: 1.0,
        }
    }

    /// Apply the model: shift the state by the predicted change and grow the
    /// uncertainty.
    pub fn predict(&mut self, delta: f64) {
        self.state += delta;
        self.variance += self.parameters.model_covariance;
    }

    /// Blend in a measurement and return the corrected state.
    pub fn correct(&mut self, measurement: f64) -> f64 {
        self.gain = self.variance / (self.variance + self.parameters.data_covariance);
        self.state += self.gain * (measurement - self.state);
        self.variance *= 1.0 - self.gain;
        self.state
    }

    /// One full iteration: predict with the model delta, correct with the
    /// measurement.
    pub fn update(&mut self, delta: f64, measurement: f64) -> f64 {
        self.predict(delta);
        self.correct(measurement)
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Restart from a known state and uncertainty.
    pub fn reset(&mut self, state: f64, variance: f64) {
        self.state = state;
        self.variance = variance;
        self.gain = 1.0;
    }
}

#[cfg(test)]
#[path = "kalman_tests.rs"]
mod tests;
