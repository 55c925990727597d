// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Robot tuning constants
//!
//! Everything a deployment tunes per robot: follower physics, the PIDF gain
//! schedules, drivetrain geometry, and path-following constraints. Loaded
//! from a TOML file so a re-tune never needs a rebuild. `Default` carries
//! the values measured on the reference robot.

use crate::controller::{FilteredPidfCoefficients, PidfCoefficients};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    /// IO error reading the tuning file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A primary gain set with an optional secondary set that takes over below
/// the switch threshold (close-range precision gains).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainSchedule<T> {
    pub primary: T,
    pub secondary: Option<T>,
    pub switch_threshold: Option<f64>,
}

/// Physics and feedback gains for the path follower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerTuning {
    pub mass: f64,
    pub forward_zero_power_acceleration: f64,
    pub lateral_zero_power_acceleration: f64,
    pub translational: GainSchedule<PidfCoefficients>,
    pub heading: GainSchedule<PidfCoefficients>,
    pub drive: GainSchedule<FilteredPidfCoefficients>,
}

/// Motor names and measured drivetrain velocities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivetrainTuning {
    pub max_power: f64,
    pub left_front_motor: String,
    pub left_rear_motor: String,
    pub right_front_motor: String,
    pub right_rear_motor: String,
    /// Top speed along the forward axis, inches per second.
    pub x_velocity: f64,
    /// Top speed along the strafe axis, inches per second.
    pub y_velocity: f64,
}

/// Limits applied while following a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathConstraints {
    /// Path-completion parameter at which the path counts as done.
    pub t_value: f64,
    pub timeout_millis: f64,
    pub velocity: f64,
    pub heading: f64,
}

/// The full per-robot tuning file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    pub follower: FollowerTuning,
    pub drivetrain: DrivetrainTuning,
    pub path: PathConstraints,
}

impl TuningConfig {
    /// Load a tuning file from disk.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TuningConfig =
            toml::from_str(&content).map_err(|source| TuningError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "tuning config loaded");
        Ok(config)
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            follower: FollowerTuning {
                mass: 14.515,
                forward_zero_power_acceleration: -29.859,
                lateral_zero_power_acceleration: -55.138,
                translational: GainSchedule {
                    primary: PidfCoefficients::new(0.5, 0.0, 0.055, 0.0),
                    secondary: Some(PidfCoefficients::new(0.16, 0.0, 0.02, 0.022)),
                    switch_threshold: Some(5.0),
                },
                heading: GainSchedule {
                    primary: PidfCoefficients::new(1.5, 0.0, 0.1, 0.0),
                    secondary: Some(PidfCoefficients::new(1.1, 0.0, 0.1, 0.015)),
                    switch_threshold: None,
                },
                drive: GainSchedule {
                    primary: FilteredPidfCoefficients::new(0.015, 0.0, 0.0, 0.65, 0.0),
                    secondary: Some(FilteredPidfCoefficients::new(0.018, 0.0, 0.0, 0.55, 0.005)),
                    switch_threshold: None,
                },
            },
            drivetrain: DrivetrainTuning {
                max_power: 1.0,
                left_front_motor: "leftFront".to_string(),
                left_rear_motor: "leftRear".to_string(),
                right_front_motor: "rightFront".to_string(),
                right_rear_motor: "rightRear".to_string(),
                x_velocity: 81.0930,
                y_velocity: 59.443,
            },
            path: PathConstraints {
                t_value: 0.99,
                timeout_millis: 25.0,
                velocity: 1.0,
                heading: 1.0,
            },
        }
    }
}

#[cfg(test)]
#[path = "tuning_tests.rs"]
mod tests;
