use crate::{
    clock::{Clock, TickReport},
    config::{AppConfig, PeriodSettings},
    ring::{RingSnapshot, RingState},
    Result, SoundBank,
};

/// Lifecycle of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// No rings exist yet, or the previous ring set was discarded.
    Idle,
    Running,
    Paused { paused_at: f64 },
}

/// Result of a [`Session::reset`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First request: the reset stage is now armed.
    Armed,
    /// Second request: work and rest lengths are back to their defaults.
    RestoredDefaults,
}

/// Owns the rings of one timer and the transitions between running and
/// paused.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    sounds: SoundBank,
    periods: PeriodSettings,
    rings: Vec<RingState>,
    clock: Clock,
    state: SessionState,
    reset_armed: bool,
}

impl Session {
    pub fn new(config: AppConfig, sounds: SoundBank) -> Self {
        let periods = config.periods;
        Self {
            config,
            sounds,
            periods,
            rings: Vec::new(),
            clock: Clock::new(),
            state: SessionState::Idle,
            reset_armed: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn rings(&self) -> &[RingState] {
        &self.rings
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn periods(&self) -> PeriodSettings {
        self.periods
    }

    pub fn reset_armed(&self) -> bool {
        self.reset_armed
    }

    /// Rings the next start would build, as drawn before it happens.
    pub fn idle_rings(&self) -> Result<Vec<RingSnapshot>> {
        self.config
            .ring_configs(&self.periods)
            .iter()
            .map(|ring| RingState::from_config(ring, &self.sounds, 0.0).map(|ring| ring.snapshot()))
            .collect()
    }

    /// Builds a fresh ring set whose first periods start at `now` and begins
    /// running. Any previous rings are dropped.
    pub fn start(&mut self, now: f64) -> Result<()> {
        let rings = self
            .config
            .ring_configs(&self.periods)
            .iter()
            .map(|ring| RingState::from_config(ring, &self.sounds, now))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            rings = rings.len(),
            work_minutes = self.periods.work_minutes,
            rest_minutes = self.periods.rest_minutes,
            "session started"
        );
        self.rings = rings;
        self.clock = Clock::new();
        self.state = SessionState::Running;
        self.reset_armed = false;
        Ok(())
    }

    /// Stops ticking and remembers when. Ignored unless running.
    pub fn pause(&mut self, now: f64) {
        if self.state != SessionState::Running {
            tracing::debug!(state = ?self.state, "pause ignored");
            return;
        }
        self.state = SessionState::Paused { paused_at: now };
        tracing::info!(now, "session paused");
    }

    /// Pushes every deadline forward by the time spent paused and resumes
    /// ticking. Ignored unless paused.
    pub fn resume(&mut self, now: f64) {
        let SessionState::Paused { paused_at } = self.state else {
            tracing::debug!(state = ?self.state, "resume ignored");
            return;
        };

        let paused_for = now - paused_at;
        for ring in &mut self.rings {
            ring.shift_target(paused_for);
        }
        self.clock.reset();
        self.state = SessionState::Running;
        self.reset_armed = false;
        tracing::info!(now, paused_for, "session resumed");
    }

    /// Single control: start when idle, resume when paused, pause when running.
    pub fn toggle(&mut self, now: f64) -> Result<SessionState> {
        match self.state {
            SessionState::Idle => self.start(now)?,
            SessionState::Paused { .. } => self.resume(now),
            SessionState::Running => self.pause(now),
        }
        Ok(self.state)
    }

    /// Advances every ring to `now`. Returns `None` unless running.
    pub fn tick(&mut self, now: f64) -> Option<TickReport> {
        if self.state != SessionState::Running {
            return None;
        }
        Some(self.clock.tick(&mut self.rings, now))
    }

    pub fn adjust_work(&mut self, delta: i32) {
        self.periods.adjust_work(delta);
        self.after_adjustment();
    }

    pub fn adjust_rest(&mut self, delta: i32) {
        self.periods.adjust_rest(delta);
        self.after_adjustment();
    }

    /// Two-step reset. The first request discards a paused ring set and arms
    /// the reset; a second request restores the default period lengths.
    pub fn reset(&mut self) -> ResetOutcome {
        self.discard_if_paused();
        if self.reset_armed {
            self.periods = PeriodSettings::default();
            self.reset_armed = false;
            tracing::info!("period lengths restored to defaults");
            ResetOutcome::RestoredDefaults
        } else {
            self.reset_armed = true;
            tracing::info!("reset armed");
            ResetOutcome::Armed
        }
    }

    fn after_adjustment(&mut self) {
        self.reset_armed = true;
        self.discard_if_paused();
        tracing::info!(
            work_minutes = self.periods.work_minutes,
            rest_minutes = self.periods.rest_minutes,
            "period lengths changed"
        );
    }

    fn discard_if_paused(&mut self) {
        if matches!(self.state, SessionState::Paused { .. }) {
            self.rings.clear();
            self.state = SessionState::Idle;
            tracing::info!("paused session discarded");
        }
    }
}
