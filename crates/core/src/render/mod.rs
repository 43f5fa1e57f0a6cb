//! Translation of ring snapshots into canvas draw calls.
//!
//! Rendering is a pure function of a [`Frame`]; it never sees a live
//! [`crate::RingState`]. Backends implement [`DrawSurface`].

pub mod svg;

use serde::{Deserialize, Serialize};

use crate::{clock::Frame, config::CanvasConfig, ring::RingSnapshot};

pub use svg::SvgSurface;

/// Fixed start of every arc: the top of the circle, in degrees.
pub const START_DEGREES: f64 = 270.0;

pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// A single stroked arc, angles in radians following canvas conventions
/// (clockwise on a y-down surface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcStroke {
    pub center: (f64, f64),
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub color: String,
    pub line_width: f64,
}

/// 2D drawing capability the renderer draws onto.
pub trait DrawSurface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_arc(&mut self, arc: &ArcStroke);
}

/// Draws the rings of `frame` centred on a canvas of the given size.
pub fn render_frame(surface: &mut dyn DrawSurface, canvas: &CanvasConfig, frame: &Frame) {
    surface.clear(0.0, 0.0, canvas.width, canvas.height);
    for ring in &frame.rings {
        surface.stroke_arc(&ring_arc(canvas, ring));
    }
}

/// Draws every ring as a complete circle, the picture shown before a session
/// starts.
pub fn render_idle(surface: &mut dyn DrawSurface, canvas: &CanvasConfig, rings: &[RingSnapshot]) {
    surface.clear(0.0, 0.0, canvas.width, canvas.height);
    for ring in rings {
        surface.stroke_arc(&ArcStroke {
            center: center(canvas),
            radius: ring.radius,
            start: 0.0,
            end: to_radians(360.0),
            color: ring.color.clone(),
            line_width: ring.thickness,
        });
    }
}

/// Arc for one ring: from the start to `start + angle`, or the reverse when
/// the ring sweeps from full.
pub fn ring_arc(canvas: &CanvasConfig, ring: &RingSnapshot) -> ArcStroke {
    let start = to_radians(START_DEGREES);
    let swept = to_radians(ring.angle + START_DEGREES);
    let (start, end) = if ring.sweep_from_full {
        (swept, start)
    } else {
        (start, swept)
    };

    ArcStroke {
        center: center(canvas),
        radius: ring.radius,
        start,
        end,
        color: ring.color.clone(),
        line_width: ring.thickness,
    }
}

fn center(canvas: &CanvasConfig) -> (f64, f64) {
    (canvas.width / 2.0, canvas.height / 2.0)
}

/// Recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Arc(ArcStroke),
}

/// Surface that keeps every call it receives.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_arc(&mut self, arc: &ArcStroke) {
        self.commands.push(DrawCommand::Arc(arc.clone()));
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn snapshot(angle: f64, sweep_from_full: bool) -> RingSnapshot {
        RingSnapshot {
            radius: 50.0,
            thickness: 12.0,
            color: "#3df449".to_string(),
            angle,
            sweep_from_full,
        }
    }

    #[test]
    fn clears_then_strokes_each_ring() {
        let canvas = CanvasConfig::default();
        let frame = Frame {
            now: 0.0,
            rings: vec![snapshot(-90.0, true), snapshot(-90.0, false)],
        };
        let mut recorder = CommandRecorder::new();

        render_frame(&mut recorder, &canvas, &frame);

        let commands = recorder.take();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 400.0,
            }
        );
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn sweep_direction_swaps_arc_ends() {
        let canvas = CanvasConfig::default();

        let from_full = ring_arc(&canvas, &snapshot(-90.0, true));
        assert!((from_full.start - PI).abs() < 1e-12);
        assert!((from_full.end - 1.5 * PI).abs() < 1e-12);

        let filling = ring_arc(&canvas, &snapshot(-90.0, false));
        assert!((filling.start - 1.5 * PI).abs() < 1e-12);
        assert!((filling.end - PI).abs() < 1e-12);
        assert_eq!(filling.center, (200.0, 200.0));
        assert_eq!(filling.line_width, 12.0);
    }

    #[test]
    fn idle_picture_draws_full_circles() {
        let canvas = CanvasConfig {
            width: 300.0,
            height: 200.0,
            ..CanvasConfig::default()
        };
        let mut recorder = CommandRecorder::new();

        render_idle(&mut recorder, &canvas, &[snapshot(0.0, true)]);

        match &recorder.commands()[1] {
            DrawCommand::Arc(arc) => {
                assert_eq!(arc.center, (150.0, 100.0));
                assert_eq!(arc.start, 0.0);
                assert!((arc.end - 2.0 * PI).abs() < 1e-12);
            }
            other => panic!("expected an arc, got {other:?}"),
        }
    }
}
