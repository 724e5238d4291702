//! The chart renderer — from-scratch 2D geometry over an abstract
//! pixel surface. No charting library; every axis, bar, point and
//! wedge is computed here and issued as primitive drawing commands.
//!
//! All three renderers are pure with respect to their inputs except
//! for the commands they issue, and re-render idempotently from
//! scratch: calling render twice on a fresh surface yields the same
//! command stream.

pub mod bar;
pub mod line;
pub mod pie;
pub mod surface;

pub use bar::{BarChart, Orientation};
pub use line::LineChart;
pub use pie::PieChart;
pub use surface::{DrawCmd, RecordingSurface, Rgb, Surface, TextAlign, TextStyle, PALETTE};

/// Margin reserved on all sides for axes, labels and titles.
pub const MARGIN: f64 = 60.0;

/// Number of value-axis divisions (gridlines at max * i/5).
pub const GRID_DIVISIONS: u32 = 5;

/// Axis-label formatting: thousands separators, at most one decimal.
pub fn format_value(v: f64) -> String {
    let rounded = (v * 10.0).round() / 10.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let int_part = abs.trunc() as u64;
    let frac = ((abs - abs.trunc()) * 10.0).round() as u64;

    let digits = int_part.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0 {
        out.push('.');
        out.push_str(&frac.to_string());
    }
    out
}

/// White canvas plus an optional centered title — identical across
/// the three renderers.
pub(crate) fn draw_frame(
    surface: &mut dyn Surface,
    width: f64,
    height: f64,
    title: Option<&str>,
) {
    surface.fill_rect(0.0, 0.0, width, height, Rgb::WHITE);
    if let Some(title) = title {
        surface.text(title, width / 2.0, 30.0, TextStyle::title());
    }
}
