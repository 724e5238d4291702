//! Line chart geometry.
//!
//! The y-domain is min(0, series minimum)..series maximum, so a dip
//! below zero stays visible instead of clipping at the axis. A
//! single-label series is a degenerate case: one centered marker per
//! dataset, no polyline, no division by zero.

use super::{
    draw_frame, format_value,
    surface::{Rgb, Surface, TextAlign, TextStyle},
    GRID_DIVISIONS, MARGIN,
};
use crate::aggregate::ChartSeries;

const POINT_RADIUS: f64 = 4.0;
const LEGEND_SWATCH: f64 = 12.0;

#[derive(Debug, Clone)]
pub struct LineChart {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub stroke_width: f64,
}

impl LineChart {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, title: None, stroke_width: 2.0 }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn render(&self, surface: &mut dyn Surface, series: &ChartSeries) {
        if series.is_empty() {
            return;
        }
        let n = series.labels.len();
        let plot_w = self.width - 2.0 * MARGIN;
        let plot_h = self.height - 2.0 * MARGIN;

        let max = series.all_values().fold(f64::MIN, f64::max);
        let min = series.all_values().fold(0.0_f64, f64::min);
        let range = max - min;

        // Flat series (range 0) pins every point to the baseline.
        let y_of = |v: f64| {
            let t = if range > 0.0 { (v - min) / range } else { 0.0 };
            self.height - MARGIN - t * plot_h
        };
        let x_of = |i: usize| {
            if n > 1 {
                MARGIN + i as f64 * plot_w / (n - 1) as f64
            } else {
                MARGIN + plot_w / 2.0
            }
        };

        draw_frame(surface, self.width, self.height, self.title.as_deref());
        self.grid(surface, n, plot_h, &x_of);
        self.axes(surface);

        for dataset in &series.datasets {
            let color = dataset.color_at(0);
            // Polyline only when there is something to connect.
            for window in dataset.data.windows(2).enumerate().map(|(i, w)| (i, w[0], w[1])) {
                let (i, a, b) = window;
                surface.line(x_of(i), y_of(a), x_of(i + 1), y_of(b), self.stroke_width, color);
            }
            for (i, &value) in dataset.data.iter().enumerate() {
                surface.fill_circle(x_of(i), y_of(value), POINT_RADIUS, color);
                // Marker annotation: "<label>: <value>".
                let annotation = format!("{}: {}", series.labels[i], format_value(value));
                surface.text(
                    &annotation,
                    x_of(i),
                    y_of(value) - POINT_RADIUS - 4.0,
                    TextStyle { size_px: 10.0, bold: false, align: TextAlign::Center, color },
                );
            }
        }

        self.axis_labels(surface, series, min, range, plot_h, &x_of);
        if series.datasets.len() > 1 {
            self.legend(surface, series);
        }
    }

    fn grid(
        &self,
        surface: &mut dyn Surface,
        n: usize,
        _plot_h: f64,
        x_of: &impl Fn(usize) -> f64,
    ) {
        for i in 0..n {
            let x = x_of(i);
            surface.line(x, MARGIN, x, self.height - MARGIN, 1.0, Rgb::GRID);
        }
        let divisions = GRID_DIVISIONS as f64;
        for i in 0..=GRID_DIVISIONS {
            let y = MARGIN + i as f64 * (self.height - 2.0 * MARGIN) / divisions;
            surface.line(MARGIN, y, self.width - MARGIN, y, 1.0, Rgb::GRID);
        }
    }

    fn axes(&self, surface: &mut dyn Surface) {
        surface.line(MARGIN, MARGIN, MARGIN, self.height - MARGIN, 2.0, Rgb::INK);
        surface.line(
            MARGIN,
            self.height - MARGIN,
            self.width - MARGIN,
            self.height - MARGIN,
            2.0,
            Rgb::INK,
        );
    }

    fn axis_labels(
        &self,
        surface: &mut dyn Surface,
        series: &ChartSeries,
        min: f64,
        range: f64,
        plot_h: f64,
        x_of: &impl Fn(usize) -> f64,
    ) {
        for (i, label) in series.labels.iter().enumerate() {
            surface.text(label, x_of(i), self.height - MARGIN + 20.0, TextStyle::label());
        }
        let divisions = GRID_DIVISIONS as f64;
        for i in 0..=GRID_DIVISIONS {
            let value = min + range * (GRID_DIVISIONS - i) as f64 / divisions;
            let y = MARGIN + i as f64 * plot_h / divisions + 4.0;
            surface.text(
                &format_value(value),
                MARGIN - 10.0,
                y,
                TextStyle::label().align(TextAlign::Right),
            );
        }
    }

    /// Horizontal legend below the plot, left-to-right, spaced by the
    /// measured width of each dataset label.
    fn legend(&self, surface: &mut dyn Surface, series: &ChartSeries) {
        let y = self.height - 20.0;
        let mut x = MARGIN;
        for dataset in &series.datasets {
            let color = dataset.color_at(0);
            surface.fill_rect(x, y - 8.0, LEGEND_SWATCH, LEGEND_SWATCH, color);
            let style = TextStyle::label().align(TextAlign::Left);
            surface.text(&dataset.label, x + 20.0, y, style);
            x += surface.measure_text(&dataset.label, style) + 40.0;
        }
    }
}
