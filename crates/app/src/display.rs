use ring_timer_core::{sequencer, RingState, Session, SessionState};

/// One-line summary of every ring, innermost last.
pub fn status_line(session: &Session, now: f64) -> String {
    let state = match session.state() {
        SessionState::Idle => "idle",
        SessionState::Running => "running",
        SessionState::Paused { .. } => "paused",
    };
    // While paused the clock is frozen at the pause instant.
    let at = match session.state() {
        SessionState::Paused { paused_at } => paused_at,
        _ => now,
    };

    let rings: Vec<String> = session
        .rings()
        .iter()
        .map(|ring| ring_status(ring, at))
        .collect();

    let periods = session.periods();
    format!(
        "[{state}] work {}m rest {}m | {}",
        periods.work_minutes,
        periods.rest_minutes,
        rings.join(" | ")
    )
}

fn ring_status(ring: &RingState, now: f64) -> String {
    format!(
        "r{} {}/{} {} {:>3.0}%",
        ring.radius(),
        ring.period_index() + 1,
        ring.period_count(),
        format_clock(sequencer::remaining(ring, now)),
        sequencer::progress(ring, now) * 100.0
    )
}

/// `mm:ss`, rounding partial seconds up and clamping overdue time to zero.
pub fn format_clock(ms: f64) -> String {
    let seconds = (ms.max(0.0) / 1000.0).ceil() as u64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use ring_timer_core::{AppConfig, RingConfig, SoundBank};

    use super::*;

    #[test]
    fn formats_remaining_time() {
        assert_eq!(format_clock(1_500_000.0), "25:00");
        assert_eq!(format_clock(59_001.0), "01:00");
        assert_eq!(format_clock(-20.0), "00:00");
    }

    #[test]
    fn status_freezes_while_paused() {
        let config = AppConfig {
            rings: Some(vec![RingConfig::new(50.0, 12.0, 60.0)]),
            ..AppConfig::default()
        };
        let mut session = Session::new(config, SoundBank::new());
        session.start(0.0).unwrap();
        session.pause(15_000.0);

        let line = status_line(&session, 40_000.0);

        assert!(line.starts_with("[paused] work 25m rest 5m"), "{line}");
        assert!(line.contains("r50 1/1 00:45  25%"), "{line}");
    }
}
