use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, RingTimerError};

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_REST_MINUTES: u32 = 5;
const DEFAULT_COLOR: &str = "blue";

/// Either a single value or an ordered sequence of values.
///
/// Ring options accept both shapes; a single value keeps the option constant
/// for the lifetime of the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(values) if values.is_empty())
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

/// Construction options for a single ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f64,
    pub thickness: f64,
    /// Period lengths in seconds.
    pub durations: OneOrMany<f64>,
    #[serde(default = "default_colors")]
    pub colors: OneOrMany<String>,
    /// Sound cue names, resolved through a [`crate::SoundBank`].
    #[serde(default = "default_sounds")]
    pub sounds: OneOrMany<String>,
    #[serde(default = "default_true")]
    pub sweep_from_full: bool,
    #[serde(default)]
    pub counter_clockwise: bool,
}

impl RingConfig {
    pub fn new(radius: f64, thickness: f64, durations: impl Into<OneOrMany<f64>>) -> Self {
        Self {
            radius,
            thickness,
            durations: durations.into(),
            colors: default_colors(),
            sounds: default_sounds(),
            sweep_from_full: true,
            counter_clockwise: false,
        }
    }

    pub fn with_colors(mut self, colors: impl Into<OneOrMany<String>>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_sounds(mut self, sounds: impl Into<OneOrMany<String>>) -> Self {
        self.sounds = sounds.into();
        self
    }

    pub fn sweep_from_full(mut self, sweep_from_full: bool) -> Self {
        self.sweep_from_full = sweep_from_full;
        self
    }

    pub fn counter_clockwise(mut self, counter_clockwise: bool) -> Self {
        self.counter_clockwise = counter_clockwise;
        self
    }

    /// Period lengths converted to milliseconds.
    pub fn durations_ms(&self) -> Vec<f64> {
        self.durations
            .to_vec()
            .into_iter()
            .map(|seconds| seconds * 1000.0)
            .collect()
    }

    /// Rejects shapes that cannot produce a ring at all. Mismatched sequence
    /// lengths and non-positive durations are deliberately let through.
    pub fn validate(&self) -> Result<()> {
        if self.durations.is_empty() {
            return Err(RingTimerError::InvalidConfig(
                "ring durations must contain at least one period",
            ));
        }
        if self.colors.is_empty() {
            return Err(RingTimerError::InvalidConfig(
                "ring colors must contain at least one color",
            ));
        }
        if self.sounds.is_empty() {
            return Err(RingTimerError::InvalidConfig(
                "ring sounds must contain at least one cue",
            ));
        }
        Ok(())
    }
}

/// Work and rest lengths, in whole minutes, of the innermost Pomodoro ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSettings {
    pub work_minutes: u32,
    pub rest_minutes: u32,
}

impl Default for PeriodSettings {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            rest_minutes: DEFAULT_REST_MINUTES,
        }
    }
}

impl PeriodSettings {
    pub fn adjust_work(&mut self, delta: i32) {
        self.work_minutes = adjust_minutes(self.work_minutes, delta);
    }

    pub fn adjust_rest(&mut self, delta: i32) {
        self.rest_minutes = adjust_minutes(self.rest_minutes, delta);
    }

    /// The nested work/rest rings: a one second ticker, a one minute ring and
    /// the work/rest ring with a bell at each switch.
    pub fn pomodoro_rings(&self) -> Vec<RingConfig> {
        vec![
            RingConfig::new(150.0, 3.0, 1.0).with_colors(DEFAULT_COLOR.to_string()),
            RingConfig::new(100.0, 8.0, 60.0).with_colors("rgb(189,61,244)".to_string()),
            RingConfig::new(
                50.0,
                12.0,
                OneOrMany::Many(vec![
                    f64::from(self.work_minutes) * 60.0,
                    f64::from(self.rest_minutes) * 60.0,
                ]),
            )
            .with_colors(OneOrMany::Many(vec![
                "#3df449".to_string(),
                "#3ddff4".to_string(),
            ]))
            .with_sounds(OneOrMany::Many(vec![
                "bell-2".to_string(),
                "bell-1".to_string(),
            ])),
        ]
    }
}

fn adjust_minutes(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta).max(1)
}

/// Size and fill of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            background: default_background(),
        }
    }
}

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub periods: PeriodSettings,
    /// Explicit ring set. When absent the Pomodoro rings are derived from
    /// `periods`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<Vec<RingConfig>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            frame_interval_ms: default_frame_interval(),
            periods: PeriodSettings::default(),
            rings: None,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(RingTimerError::InvalidConfig(
                "canvas width and height must be positive",
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(RingTimerError::InvalidConfig(
                "frame interval must be at least one millisecond",
            ));
        }
        if let Some(rings) = &self.rings {
            for ring in rings {
                ring.validate()?;
            }
        }
        Ok(())
    }

    /// Ring configurations for a session started with the given periods.
    pub fn ring_configs(&self, periods: &PeriodSettings) -> Vec<RingConfig> {
        match &self.rings {
            Some(rings) => rings.clone(),
            None => periods.pomodoro_rings(),
        }
    }
}

fn default_colors() -> OneOrMany<String> {
    OneOrMany::One(DEFAULT_COLOR.to_string())
}

fn default_sounds() -> OneOrMany<String> {
    OneOrMany::One(crate::sound::MUTE.to_string())
}

fn default_background() -> String {
    "white".to_string()
}

fn default_true() -> bool {
    true
}

fn default_frame_interval() -> u64 {
    16
}
