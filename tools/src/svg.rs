//! SVG backend for the chart renderer's drawing-surface contract.
//!
//! Vector output keeps the runner dependency-free: every primitive
//! maps to one SVG element, and text measurement uses the same
//! 0.6em-per-glyph heuristic the recording surface uses, so layouts
//! agree between backends.

use shopdash_core::chart::surface::{Rgb, Surface, TextAlign, TextStyle};
use std::fmt::Write as _;

pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new() }
    }

    pub fn into_document(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">\n{}</svg>\n",
            self.width, self.height, self.width, self.height, self.body
        )
    }

    fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
        let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
        let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
        let large_arc = if end - start > std::f64::consts::PI { 1 } else { 0 };
        format!(
            "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} \
             A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
        )
    }
}

impl Surface for SvgSurface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{}\"/>",
            color.to_hex()
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" \
             stroke=\"{}\" stroke-width=\"{width}\"/>",
            color.to_hex()
        );
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
            color.to_hex()
        );
    }

    fn fill_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\"/>",
            Self::arc_path(cx, cy, r, start, end),
            color.to_hex()
        );
    }

    fn stroke_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64,
                    width: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\"/>",
            Self::arc_path(cx, cy, r, start, end),
            color.to_hex()
        );
    }

    fn text(&mut self, s: &str, x: f64, y: f64, style: TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let escaped = s
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let _ = writeln!(
            self.body,
            "<text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"{}\" fill=\"{}\" \
             text-anchor=\"{anchor}\"{weight}>{escaped}</text>",
            style.size_px,
            style.color.to_hex()
        );
    }

    fn measure_text(&self, s: &str, style: TextStyle) -> f64 {
        s.chars().count() as f64 * style.size_px * 0.6
    }
}
