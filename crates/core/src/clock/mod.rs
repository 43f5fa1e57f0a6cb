use std::{cell::Cell, time::Instant};

use serde::{Deserialize, Serialize};

use crate::ring::{
    sequencer::{self, PeriodChange},
    RingSnapshot, RingState,
};

/// Source of "now" in milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock measured from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::start()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven time, for simulations and tests.
#[derive(Debug, Default, Clone)]
pub struct ManualTimeSource {
    now: Cell<f64>,
}

impl ManualTimeSource {
    pub fn new(now: f64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: f64) {
        self.now.set(self.now.get() + delta);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Consistent picture of every ring at one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub now: f64,
    pub rings: Vec<RingSnapshot>,
}

/// A ring that crossed its deadline during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodCompletion {
    pub ring: usize,
    pub change: PeriodChange,
}

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: Frame,
    pub completions: Vec<PeriodCompletion>,
    /// Milliseconds since the previous tick, zero for the first one.
    pub delta: f64,
}

/// Update step for a set of rings. Boundaries are detected by polling, so a
/// completion is reported on the first tick at or past the deadline.
#[derive(Debug, Default)]
pub struct Clock {
    last_tick: Option<f64>,
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous tick, e.g. after a pause.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self, rings: &mut [RingState], now: f64) -> TickReport {
        let delta = self.last_tick.map(|last| now - last).unwrap_or(0.0);
        self.last_tick = Some(now);
        self.ticks += 1;

        for ring in rings.iter_mut() {
            ring.angle = sequencer::compute_angle(ring, now);
        }

        let frame = Frame {
            now,
            rings: rings.iter().map(RingState::snapshot).collect(),
        };

        let mut completions = Vec::new();
        for (index, ring) in rings.iter_mut().enumerate() {
            if sequencer::is_elapsed(ring, now) {
                let change = sequencer::complete_period(ring);
                tracing::debug!(
                    ring = index,
                    period = change.period_index,
                    target = change.target_time,
                    sound = change.sound_played,
                    "ring finished a period"
                );
                completions.push(PeriodCompletion {
                    ring: index,
                    change,
                });
            }
        }

        tracing::trace!(now, delta, tick = self.ticks, "clock tick");
        TickReport {
            frame,
            completions,
            delta,
        }
    }
}
