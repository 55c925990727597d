//! cadence-control: control-loop math for tick-driven robot behaviors
//!
//! Everything here is pure computation driven by the injected clock from
//! `cadence-core`, so control loops composed into commands stay fully
//! deterministic under `FakeClock`:
//! - Stopwatch, timer, and rate gates for tick-based timing
//! - PIDF and SquIDF feedback controllers with a common `Controller` trait
//! - A scalar Kalman filter for fusing model predictions with measurements
//! - 2D pose geometry and angle normalization
//! - A pose-to-pose controller producing chassis speeds
//! - Robot tuning constants loaded from TOML

pub mod controller;
pub mod geometry;
pub mod kalman;
pub mod p2p;
pub mod timing;
pub mod tuning;

pub use controller::{
    Controller, FilteredPidfCoefficients, PidfCoefficients, PidfController, SquidfController,
};
pub use geometry::{normalize_angle, AngleUnit, ChassisSpeeds, Pose2d, Transform2d};
pub use kalman::{KalmanFilter, KalmanFilterParameters};
pub use p2p::PoseController;
pub use timing::{Rate, Stopwatch, Timer};
pub use tuning::{TuningConfig, TuningError};
