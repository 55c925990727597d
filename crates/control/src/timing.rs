// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stopwatch, countdown timer, and rate gate
//!
//! All three sample the injected [`Clock`] on demand rather than holding a
//! background thread, which fits the cooperative tick model: a command polls
//! its timer inside `execute`/`is_finished` and nothing advances between
//! polls.

use cadence_core::Clock;
use std::time::{Duration, Instant};

/// Measures elapsed time with pause and resume.
///
/// Created paused; call [`Stopwatch::start`] to begin counting.
pub struct Stopwatch<C: Clock> {
    clock: C,
    started: Instant,
    /// Elapsed time frozen at the moment of pausing. `None` while running.
    paused_elapsed: Option<Duration>,
    previous: Duration,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        let started = clock.now();
        Self {
            clock,
            started,
            paused_elapsed: Some(Duration::ZERO),
            previous: Duration::ZERO,
        }
    }

    /// Start or restart from zero.
    pub fn start(&mut self) {
        self.started = self.clock.now();
        self.paused_elapsed = None;
        self.previous = Duration::ZERO;
    }

    /// Freeze the elapsed time. No-op if already paused.
    pub fn pause(&mut self) {
        if self.paused_elapsed.is_none() {
            self.paused_elapsed = Some(self.clock.now() - self.started);
        }
    }

    /// Continue counting from where [`Stopwatch::pause`] left off.
    pub fn resume(&mut self) {
        if let Some(elapsed) = self.paused_elapsed.take() {
            self.started = self.clock.now() - elapsed;
        }
    }

    /// Elapsed unpaused time since the last start.
    pub fn elapsed(&self) -> Duration {
        match self.paused_elapsed {
            Some(elapsed) => elapsed,
            None => self.clock.now() - self.started,
        }
    }

    /// Time since `start` or the previous `delta` call. Useful for loop
    /// periods.
    pub fn delta(&mut self) -> Duration {
        let now = self.elapsed();
        let delta = now.saturating_sub(self.previous);
        self.previous = now;
        delta
    }

    pub fn is_running(&self) -> bool {
        self.paused_elapsed.is_none()
    }
}

/// A countdown over a fixed length, built on [`Stopwatch`].
pub struct Timer<C: Clock> {
    stopwatch: Stopwatch<C>,
    length: Duration,
}

impl<C: Clock> Timer<C> {
    /// Created paused, like the stopwatch.
    pub fn new(length: Duration, clock: C) -> Self {
        Self {
            stopwatch: Stopwatch::new(clock),
            length,
        }
    }

    pub fn start(&mut self) {
        self.stopwatch.start();
    }

    pub fn pause(&mut self) {
        self.stopwatch.pause();
    }

    pub fn resume(&mut self) {
        self.stopwatch.resume();
    }

    /// Time left until done. Zero once the timer has finished; the full
    /// length before it is started.
    pub fn remaining(&self) -> Duration {
        self.length.saturating_sub(self.stopwatch.elapsed())
    }

    pub fn done(&self) -> bool {
        self.stopwatch.elapsed() >= self.length
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }
}

/// A fixed-period gate for limiting how often work happens (hardware reads,
/// telemetry flushes). Counting starts on creation.
///
/// The window only restarts when the gate fires, so asking early does not
/// push the next firing further out.
pub struct Rate<C: Clock> {
    clock: C,
    period: Duration,
    last: Instant,
}

impl<C: Clock> Rate<C> {
    pub fn new(period: Duration, clock: C) -> Self {
        let last = clock.now();
        Self {
            clock,
            period,
            last,
        }
    }

    /// Restart the current window without firing.
    pub fn reset(&mut self) {
        self.last = self.clock.now();
    }

    /// True once per period.
    pub fn at_time(&mut self) -> bool {
        let now = self.clock.now();
        if now - self.last >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
