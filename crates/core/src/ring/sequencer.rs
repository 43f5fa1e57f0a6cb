//! Stateless operations applied to a [`RingState`] at each tick and at
//! period boundaries.

use serde::{Deserialize, Serialize};

use super::RingState;

/// Angle a ring is parked at right after a period boundary, so the arc never
/// collapses to exactly zero.
pub const NEAR_ZERO_ANGLE: f64 = 0.0001;

const FULL_TURN_DEGREES: f64 = 360.0;

/// What changed when a ring finished a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodChange {
    pub finished_period: usize,
    pub period_index: usize,
    pub target_time: f64,
    pub sound_played: bool,
    pub sweep_from_full: bool,
}

/// Moves the ring to its next period.
///
/// Colors and sounds each wrap on their own length, so sequences shorter or
/// longer than the durations drift out of step with them over time.
pub fn advance_period(ring: &mut RingState) -> usize {
    let index = ring.durations.advance();
    if ring.sequenced {
        ring.colors.advance();
        ring.sounds.advance();
    }
    index
}

/// Signed sweep angle in degrees at `now`. Not clamped: slightly past the
/// deadline the magnitude leaves `[0, 360]`.
pub fn compute_angle(ring: &RingState, now: f64) -> f64 {
    ring.rotation.sign() * (FULL_TURN_DEGREES / ring.duration()) * (ring.target_time - now)
}

/// Milliseconds left in the current period. Negative once overdue.
pub fn remaining(ring: &RingState, now: f64) -> f64 {
    ring.target_time - now
}

/// Elapsed fraction of the current period, in `[0, 1]` for a well-formed ring.
pub fn progress(ring: &RingState, now: f64) -> f64 {
    1.0 - remaining(ring, now) / ring.duration()
}

pub fn is_elapsed(ring: &RingState, now: f64) -> bool {
    remaining(ring, now) <= 0.0
}

/// Runs the boundary sequence once: plays the finishing period's sound,
/// advances the period, parks the angle near zero, pushes the deadline by the
/// new period's length and flips the sweep direction.
pub fn complete_period(ring: &mut RingState) -> PeriodChange {
    let finished_period = ring.period_index();
    let sound_played = ring.sound().play();

    let period_index = advance_period(ring);
    ring.angle = -ring.rotation.sign() * NEAR_ZERO_ANGLE;
    ring.target_time += ring.duration();
    ring.sweep_from_full = !ring.sweep_from_full;

    PeriodChange {
        finished_period,
        period_index,
        target_time: ring.target_time,
        sound_played,
        sweep_from_full: ring.sweep_from_full,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::{OneOrMany, RingConfig},
        sound::tests::CountingPlayer,
        RotationSense, SoundBank,
    };

    fn ring(config: RingConfig) -> RingState {
        RingState::from_config(&config, &SoundBank::new(), 0.0).unwrap()
    }

    fn many<T: Clone>(items: &[T]) -> OneOrMany<T> {
        OneOrMany::Many(items.to_vec())
    }

    #[test]
    fn angle_magnitude_shrinks_toward_deadline() {
        let ring = ring(RingConfig::new(10.0, 1.0, 10.0));

        let mut previous = compute_angle(&ring, 1.0);
        for step in 2..10_000 {
            let angle = compute_angle(&ring, step as f64);
            assert!(angle.abs() < previous.abs());
            assert!(angle < 0.0);
            previous = angle;
        }
        assert!((compute_angle(&ring, 0.0) + 360.0).abs() < 1e-9);
        assert_eq!(compute_angle(&ring, 10_000.0), 0.0);
    }

    #[test]
    fn counter_clockwise_rings_have_positive_angles() {
        let ring = ring(RingConfig::new(10.0, 1.0, 4.0).counter_clockwise(true));

        assert_eq!(ring.rotation(), RotationSense::CounterClockwise);
        assert!((compute_angle(&ring, 1_000.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn angle_is_not_clamped_past_the_deadline() {
        let ring = ring(RingConfig::new(10.0, 1.0, 1.0));

        assert!(compute_angle(&ring, 1_010.0) > 0.0);
        assert!(compute_angle(&ring, -10.0).abs() > 360.0);
    }

    #[test]
    fn three_advances_wrap_to_first_period() {
        let mut ring = ring(RingConfig::new(10.0, 1.0, many(&[1.0, 2.0, 3.0])));

        assert_eq!(advance_period(&mut ring), 1);
        assert_eq!(advance_period(&mut ring), 2);
        assert_eq!(advance_period(&mut ring), 0);
        assert_eq!(ring.duration(), 1_000.0);
    }

    #[test]
    fn mismatched_sequences_wrap_independently() {
        let mut ring = ring(
            RingConfig::new(10.0, 1.0, many(&[1.0, 2.0, 3.0]))
                .with_colors(many(&["red".to_string(), "green".to_string()])),
        );

        let mut seen = Vec::new();
        for _ in 0..3 {
            advance_period(&mut ring);
            seen.push((ring.period_index(), ring.color().to_string()));
        }

        assert_eq!(
            seen,
            vec![
                (1, "green".to_string()),
                (2, "red".to_string()),
                (0, "green".to_string()),
            ]
        );
    }

    #[test]
    fn single_duration_keeps_first_color() {
        let mut ring = ring(
            RingConfig::new(10.0, 1.0, 1.0)
                .with_colors(many(&["red".to_string(), "green".to_string()])),
        );

        advance_period(&mut ring);
        advance_period(&mut ring);

        assert_eq!(ring.period_index(), 0);
        assert_eq!(ring.color(), "red");
    }

    #[test]
    fn completion_advances_once_and_extends_deadline() {
        let mut ring = ring(
            RingConfig::new(50.0, 12.0, many(&[60.0, 1500.0]))
                .with_colors(many(&["#3df449".to_string(), "#3ddff4".to_string()])),
        );
        assert_eq!(ring.target_time(), 60_000.0);
        assert!(is_elapsed(&ring, 60_000.0));

        let change = complete_period(&mut ring);

        assert_eq!(change.finished_period, 0);
        assert_eq!(change.period_index, 1);
        assert_eq!(ring.period_index(), 1);
        assert_eq!(ring.color(), "#3ddff4");
        assert_eq!(ring.target_time(), 1_560_000.0);
        assert!(!ring.sweep_from_full());
        assert_eq!(ring.angle(), NEAR_ZERO_ANGLE);
        assert!(!change.sound_played);
        assert!(!is_elapsed(&ring, 60_000.0));
    }

    #[test]
    fn completion_parks_counter_clockwise_angle_below_zero() {
        let mut ring = ring(RingConfig::new(10.0, 1.0, 1.0).counter_clockwise(true));

        complete_period(&mut ring);

        assert_eq!(ring.angle(), -NEAR_ZERO_ANGLE);
    }

    #[test]
    fn completion_plays_the_finishing_period_sound() {
        let first = Arc::new(CountingPlayer::default());
        let second = Arc::new(CountingPlayer::default());
        let mut bank = SoundBank::new();
        bank.register("bell-2", first.clone());
        bank.register("bell-1", second.clone());
        let config = RingConfig::new(50.0, 12.0, many(&[1.0, 2.0]))
            .with_sounds(many(&["bell-2".to_string(), "bell-1".to_string()]));
        let mut ring = RingState::from_config(&config, &bank, 0.0).unwrap();

        assert!(complete_period(&mut ring).sound_played);
        assert_eq!((first.plays(), second.plays()), (1, 0));
        assert!(complete_period(&mut ring).sound_played);
        assert_eq!((first.plays(), second.plays()), (1, 1));
    }

    #[test]
    fn mismatched_sound_sequence_wraps_on_its_own() {
        let short = Arc::new(CountingPlayer::default());
        let long = Arc::new(CountingPlayer::default());
        let mut bank = SoundBank::new();
        bank.register("short", short.clone());
        bank.register("long", long.clone());
        let config = RingConfig::new(50.0, 12.0, many(&[1.0, 2.0, 3.0]))
            .with_sounds(many(&["short".to_string(), "long".to_string()]));
        let mut ring = RingState::from_config(&config, &bank, 0.0).unwrap();

        for _ in 0..3 {
            complete_period(&mut ring);
        }

        // Durations are back at index 0 while sounds sit on their second cue.
        assert_eq!(ring.period_index(), 0);
        assert_eq!((short.plays(), long.plays()), (2, 1));
        complete_period(&mut ring);
        assert_eq!((short.plays(), long.plays()), (2, 2));
    }

    #[test]
    fn mute_ring_never_reaches_a_player() {
        let bell = Arc::new(CountingPlayer::default());
        let mut bank = SoundBank::new();
        bank.register("bell", bell.clone());
        let mut muted = RingState::from_config(
            &RingConfig::new(10.0, 1.0, many(&[1.0, 2.0])),
            &bank,
            0.0,
        )
        .unwrap();
        let mut ringing = RingState::from_config(
            &RingConfig::new(20.0, 1.0, 1.0).with_sounds("bell".to_string()),
            &bank,
            0.0,
        )
        .unwrap();

        for _ in 0..4 {
            assert!(!complete_period(&mut muted).sound_played);
        }
        assert_eq!(bell.plays(), 0);

        assert!(complete_period(&mut ringing).sound_played);
        assert_eq!(bell.plays(), 1);
    }

    #[test]
    fn sweep_direction_follows_completion_parity() {
        let mut ring = ring(RingConfig::new(10.0, 1.0, 1.0));
        let initial = ring.sweep_from_full();

        for completions in 1..=7 {
            complete_period(&mut ring);
            assert_eq!(ring.sweep_from_full(), initial ^ (completions % 2 == 1));
        }
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let ring = ring(RingConfig::new(10.0, 1.0, 4.0));

        assert_eq!(progress(&ring, 0.0), 0.0);
        assert_eq!(progress(&ring, 1_000.0), 0.25);
        assert_eq!(remaining(&ring, 1_000.0), 3_000.0);
    }
}
