//! The drawing-surface abstraction.
//!
//! RULE: renderers never touch a concrete backend. They issue
//! primitive commands through [`Surface`], so the same geometry code
//! drives a raster buffer, a vector document, or the recording
//! surface the tests assert against.

use serde::{Deserialize, Serialize};

/// 24-bit color. Wire form is the CSS hex string the feed uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    /// Gridlines.
    pub const GRID: Rgb = Rgb(0xe5, 0xe7, 0xeb);
    /// Axes and label text.
    pub const INK: Rgb = Rgb(0x37, 0x41, 0x51);
    /// Titles.
    pub const TITLE: Rgb = Rgb(0x11, 0x18, 0x27);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Default series palette, cycled by index when a series carries more
/// data points than declared colors.
pub const PALETTE: [Rgb; 6] = [
    Rgb(0x3b, 0x82, 0xf6), // blue
    Rgb(0xef, 0x44, 0x44), // red
    Rgb(0x10, 0xb9, 0x81), // green
    Rgb(0xf5, 0x9e, 0x0b), // amber
    Rgb(0x8b, 0x5c, 0xf6), // violet
    Rgb(0x06, 0xb6, 0xd4), // cyan
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_px: f64,
    pub bold: bool,
    pub align: TextAlign,
    pub color: Rgb,
}

impl TextStyle {
    pub fn label() -> Self {
        Self { size_px: 12.0, bold: false, align: TextAlign::Center, color: Rgb::INK }
    }

    pub fn title() -> Self {
        Self { size_px: 16.0, bold: true, align: TextAlign::Center, color: Rgb::TITLE }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Primitive drawing operations against a fixed-size pixel region.
/// Coordinates are f64 pixels, origin top-left, y growing downward.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb);

    /// Filled circle (data-point markers).
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb);

    /// Filled pie wedge centered at (cx, cy), angles in radians,
    /// measured clockwise from the positive x axis, swept from
    /// `start` to `end`.
    fn fill_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb);

    /// Stroke the outline of a wedge (slice separators).
    fn stroke_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64,
                    width: f64, color: Rgb);

    fn text(&mut self, s: &str, x: f64, y: f64, style: TextStyle);

    /// Approximate rendered width of `s` in pixels for the given style.
    fn measure_text(&self, s: &str, style: TextStyle) -> f64;
}

/// One recorded drawing command. The recording surface keeps these in
/// issue order so tests can assert exact geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DrawCmd {
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgb },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb },
    FillCircle { cx: f64, cy: f64, r: f64, color: Rgb },
    FillWedge { cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb },
    StrokeWedge { cx: f64, cy: f64, r: f64, start: f64, end: f64, width: f64, color: Rgb },
    Text { s: String, x: f64, y: f64, style: TextStyle },
}

/// A surface that records commands instead of rasterizing them.
/// Used by tests, by the export collaborator, and by any backend that
/// prefers replay over direct implementation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn rects(&self) -> Vec<&DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillRect { .. }))
            .collect()
    }

    pub fn wedges(&self) -> Vec<&DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillWedge { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.commands.push(DrawCmd::FillRect { x, y, w, h, color });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        self.commands.push(DrawCmd::Line { x1, y1, x2, y2, width, color });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        self.commands.push(DrawCmd::FillCircle { cx, cy, r, color });
    }

    fn fill_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb) {
        self.commands.push(DrawCmd::FillWedge { cx, cy, r, start, end, color });
    }

    fn stroke_wedge(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64,
                    width: f64, color: Rgb) {
        self.commands.push(DrawCmd::StrokeWedge { cx, cy, r, start, end, width, color });
    }

    fn text(&mut self, s: &str, x: f64, y: f64, style: TextStyle) {
        self.commands.push(DrawCmd::Text { s: s.to_string(), x, y, style });
    }

    fn measure_text(&self, s: &str, style: TextStyle) -> f64 {
        // Same heuristic the vector backend uses: ~0.6em per glyph.
        s.chars().count() as f64 * style.size_px * 0.6
    }
}
