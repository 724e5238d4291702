//! Pie chart geometry.
//!
//! Slices normalize the first dataset to angular shares of a full
//! turn, starting at 12 o'clock and sweeping clockwise. A zero total
//! degenerates to zero-sweep slices and 0.0% labels — never a divide
//! by zero.

use super::{
    draw_frame,
    surface::{Rgb, Surface, TextAlign, TextStyle},
};
use crate::aggregate::ChartSeries;
use std::f64::consts::PI;

const SEPARATOR_WIDTH: f64 = 2.0;
const LABEL_RADIUS_FACTOR: f64 = 0.7;
const LEGEND_X: f64 = 20.0;
const LEGEND_START_Y: f64 = 40.0;
const LEGEND_ROW_H: f64 = 20.0;
const LEGEND_SWATCH: f64 = 12.0;

#[derive(Debug, Clone)]
pub struct PieChart {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
}

impl PieChart {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, title: None }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn render(&self, surface: &mut dyn Surface, series: &ChartSeries) {
        if series.is_empty() {
            return;
        }
        let Some(dataset) = series.datasets.first() else {
            return;
        };

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let radius = self.width.min(self.height) / 2.0 - 60.0;
        let total: f64 = dataset.data.iter().sum();
        let share = |v: f64| if total > 0.0 { v / total } else { 0.0 };

        draw_frame(surface, self.width, self.height, self.title.as_deref());

        // Wedges. 12 o'clock is -PI/2 in the clockwise-from-x-axis
        // convention the surface uses.
        let mut angle = -PI / 2.0;
        for (i, &value) in dataset.data.iter().enumerate() {
            let sweep = share(value) * 2.0 * PI;
            let color = dataset.color_at(i);
            surface.fill_wedge(cx, cy, radius, angle, angle + sweep, color);
            surface.stroke_wedge(
                cx, cy, radius, angle, angle + sweep, SEPARATOR_WIDTH, Rgb::WHITE,
            );
            angle += sweep;
        }

        // Percentage labels on each wedge's bisector.
        let mut angle = -PI / 2.0;
        for &value in &dataset.data {
            let sweep = share(value) * 2.0 * PI;
            let bisector = angle + sweep / 2.0;
            let lx = cx + bisector.cos() * radius * LABEL_RADIUS_FACTOR;
            let ly = cy + bisector.sin() * radius * LABEL_RADIUS_FACTOR;
            surface.text(
                &format!("{:.1}%", share(value) * 100.0),
                lx,
                ly,
                TextStyle::label().bold().color(Rgb::WHITE),
            );
            angle += sweep;
        }

        self.legend(surface, series, dataset, total);
    }

    /// Fixed-height legend rows down the left edge, independent of the
    /// pie geometry: swatch, label, percentage.
    fn legend(
        &self,
        surface: &mut dyn Surface,
        series: &ChartSeries,
        dataset: &crate::aggregate::Dataset,
        total: f64,
    ) {
        for (i, label) in series.labels.iter().enumerate() {
            let y = LEGEND_START_Y + i as f64 * LEGEND_ROW_H;
            surface.fill_rect(
                LEGEND_X,
                y - 8.0,
                LEGEND_SWATCH,
                LEGEND_SWATCH,
                dataset.color_at(i),
            );
            let style = TextStyle::label().align(TextAlign::Left);
            surface.text(label, LEGEND_X + 20.0, y + 2.0, style);
            let pct = if total > 0.0 {
                dataset.data[i] / total * 100.0
            } else {
                0.0
            };
            let offset = surface.measure_text(label, style) + 10.0;
            surface.text(
                &format!("({pct:.1}%)"),
                LEGEND_X + 20.0 + offset,
                y + 2.0,
                style,
            );
        }
    }
}
