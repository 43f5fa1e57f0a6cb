//! Per-ring timer state.
//!
//! A [`RingState`] holds everything one ring needs between ticks. All
//! mutation at period boundaries goes through the free functions in
//! [`sequencer`], which take the state explicitly.

pub mod sequencer;

use serde::{Deserialize, Serialize};

use crate::{config::RingConfig, Result, RingTimerError, Sound, SoundBank};

/// Ordered values cycled by a cursor that wraps at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> Cycle<T> {
    /// Returns `None` for an empty sequence since there would be no current
    /// value.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, cursor: 0 })
        }
    }

    pub fn current(&self) -> &T {
        &self.items[self.cursor]
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Moves to the next value, wrapping to the first. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.cursor = (self.cursor + 1) % self.items.len();
        self.cursor
    }
}

/// Sign applied to a ring's sweep angle. Fixed for the ring's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationSense {
    Clockwise,
    CounterClockwise,
}

impl RotationSense {
    pub fn from_counter_clockwise(counter_clockwise: bool) -> Self {
        if counter_clockwise {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// Timing, appearance and cycling state of one ring.
#[derive(Debug, Clone)]
pub struct RingState {
    pub(crate) radius: f64,
    pub(crate) thickness: f64,
    pub(crate) durations: Cycle<f64>,
    pub(crate) colors: Cycle<String>,
    pub(crate) sounds: Cycle<Sound>,
    /// Colors and sounds only follow period changes when the durations were
    /// configured as a sequence.
    pub(crate) sequenced: bool,
    pub(crate) target_time: f64,
    pub(crate) angle: f64,
    pub(crate) sweep_from_full: bool,
    pub(crate) rotation: RotationSense,
}

impl RingState {
    /// Builds a ring whose first period starts at `start` (milliseconds).
    pub fn from_config(config: &RingConfig, sounds: &SoundBank, start: f64) -> Result<Self> {
        config.validate()?;

        let durations = Cycle::new(config.durations_ms()).ok_or(RingTimerError::InvalidConfig(
            "ring durations must contain at least one period",
        ))?;
        let colors = Cycle::new(config.colors.to_vec()).ok_or(RingTimerError::InvalidConfig(
            "ring colors must contain at least one color",
        ))?;
        let resolved = config
            .sounds
            .to_vec()
            .iter()
            .map(|name| sounds.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        let sounds = Cycle::new(resolved).ok_or(RingTimerError::InvalidConfig(
            "ring sounds must contain at least one cue",
        ))?;

        let target_time = start + *durations.current();
        Ok(Self {
            radius: config.radius,
            thickness: config.thickness,
            durations,
            colors,
            sounds,
            sequenced: config.durations.is_sequence(),
            target_time,
            angle: 0.0,
            sweep_from_full: config.sweep_from_full,
            rotation: RotationSense::from_counter_clockwise(config.counter_clockwise),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn period_index(&self) -> usize {
        self.durations.index()
    }

    pub fn period_count(&self) -> usize {
        self.durations.len()
    }

    /// Length of the active period in milliseconds.
    pub fn duration(&self) -> f64 {
        *self.durations.current()
    }

    pub fn color(&self) -> &str {
        self.colors.current()
    }

    pub fn sound(&self) -> &Sound {
        self.sounds.current()
    }

    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn sweep_from_full(&self) -> bool {
        self.sweep_from_full
    }

    pub fn rotation(&self) -> RotationSense {
        self.rotation
    }

    /// Moves the deadline of the current period by `delta` milliseconds.
    pub(crate) fn shift_target(&mut self, delta: f64) {
        self.target_time += delta;
    }

    pub fn snapshot(&self) -> RingSnapshot {
        RingSnapshot {
            radius: self.radius,
            thickness: self.thickness,
            color: self.color().to_string(),
            angle: self.angle,
            sweep_from_full: self.sweep_from_full,
        }
    }
}

/// Owned copy of what the renderer needs from a ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSnapshot {
    pub radius: f64,
    pub thickness: f64,
    pub color: String,
    pub angle: f64,
    pub sweep_from_full: bool,
}
