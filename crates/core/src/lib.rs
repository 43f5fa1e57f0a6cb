//! Core library for the Ring Timer application.
//!
//! Concentric rings each sweep over a cycling list of periods, which is how
//! nested work/rest intervals are visualised. The crate holds the timer model
//! and nothing platform specific: rings and their sequencing, the clock tick
//! that advances them, a stateless renderer over an abstract drawing surface,
//! and the session that owns the rings across pause and resume.

pub mod clock;
pub mod config;
pub mod error;
pub mod render;
pub mod ring;
pub mod session;
pub mod sound;

pub use clock::{
    Clock, Frame, ManualTimeSource, PeriodCompletion, SystemTimeSource, TickReport, TimeSource,
};
pub use config::{AppConfig, CanvasConfig, OneOrMany, PeriodSettings, RingConfig};
pub use error::{Result, RingTimerError};
pub use render::{
    render_frame, render_idle, ArcStroke, CommandRecorder, DrawCommand, DrawSurface, SvgSurface,
};
pub use ring::{sequencer, Cycle, RingSnapshot, RingState, RotationSense};
pub use session::{ResetOutcome, Session, SessionState};
pub use sound::{AudioPlayer, Sound, SoundBank};
