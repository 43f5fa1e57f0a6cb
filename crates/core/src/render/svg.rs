use std::f64::consts::TAU;

use super::{ArcStroke, DrawSurface};

/// Surface that builds an SVG document, following the HTML canvas `arc`
/// rules: clockwise sweep, angles taken modulo a full turn, and a span of a
/// full turn or more drawing the whole circle.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: String,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: "white".to_string(),
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn covers_surface(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if self.covers_surface(x, y, width, height) {
            self.elements.clear();
        }
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            escape(&self.background),
        ));
    }

    fn stroke_arc(&mut self, arc: &ArcStroke) {
        let stroke = format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            escape(&arc.color),
            fmt_num(arc.line_width)
        );
        let (cx, cy) = arc.center;

        match arc_sweep(arc.start, arc.end) {
            Sweep::Full => self.elements.push(format!(
                r#"<circle cx="{}" cy="{}" r="{}" {stroke}/>"#,
                fmt_num(cx),
                fmt_num(cy),
                fmt_num(arc.radius),
            )),
            Sweep::Partial(sweep) => {
                let (x0, y0) = point_on(arc.center, arc.radius, arc.start);
                let (x1, y1) = point_on(arc.center, arc.radius, arc.start + sweep);
                let large_arc = u8::from(sweep > std::f64::consts::PI);
                self.elements.push(format!(
                    r#"<path d="M {} {} A {r} {r} 0 {large_arc} 1 {} {}" {stroke}/>"#,
                    fmt_num(x0),
                    fmt_num(y0),
                    fmt_num(x1),
                    fmt_num(y1),
                    r = fmt_num(arc.radius),
                ));
            }
            Sweep::Empty => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sweep {
    Empty,
    Partial(f64),
    Full,
}

fn arc_sweep(start: f64, end: f64) -> Sweep {
    let span = end - start;
    if !span.is_finite() {
        return Sweep::Empty;
    }
    if span >= TAU {
        return Sweep::Full;
    }
    let sweep = span.rem_euclid(TAU);
    if sweep == 0.0 {
        Sweep::Empty
    } else {
        Sweep::Partial(sweep)
    }
}

fn point_on(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + radius * angle.cos(),
        center.1 + radius * angle.sin(),
    )
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
