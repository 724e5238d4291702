//! Bar chart geometry, vertical and horizontal.
//!
//! Bars always start at 0; the scale ceiling is the series maximum.
//! Each label owns one slot along the category axis and the bar fills
//! 80% of it, centered.

use super::{
    draw_frame, format_value,
    surface::{Rgb, Surface, TextAlign, TextStyle},
    GRID_DIVISIONS, MARGIN,
};
use crate::aggregate::ChartSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub orientation: Orientation,
}

impl BarChart {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, title: None, orientation: Orientation::Vertical }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn render(&self, surface: &mut dyn Surface, series: &ChartSeries) {
        if series.is_empty() {
            return;
        }
        let n = series.labels.len();
        let plot_w = self.width - 2.0 * MARGIN;
        let plot_h = self.height - 2.0 * MARGIN;
        // Zero ceiling still draws frame, grid and labels; bars are
        // simply flat.
        let max = series.all_values().fold(0.0_f64, f64::max);
        let scale = |v: f64| if max > 0.0 { v / max } else { 0.0 };

        draw_frame(surface, self.width, self.height, self.title.as_deref());
        self.grid(surface, n, plot_w, plot_h);
        self.axes(surface);

        let slot = match self.orientation {
            Orientation::Vertical => plot_w / n as f64,
            Orientation::Horizontal => plot_h / n as f64,
        };

        for dataset in &series.datasets {
            for (i, &value) in dataset.data.iter().enumerate() {
                let color = dataset.color_at(i);
                match self.orientation {
                    Orientation::Vertical => {
                        let bar_w = slot * 0.8;
                        let x = MARGIN + i as f64 * slot + (slot - bar_w) / 2.0;
                        let bar_h = scale(value) * plot_h;
                        let y = self.height - MARGIN - bar_h;
                        surface.fill_rect(x, y, bar_w, bar_h, color);
                    }
                    Orientation::Horizontal => {
                        let bar_h = slot * 0.8;
                        let y = MARGIN + i as f64 * slot + (slot - bar_h) / 2.0;
                        let bar_w = scale(value) * plot_w;
                        surface.fill_rect(MARGIN, y, bar_w, bar_h, color);
                    }
                }
            }
        }

        self.labels(surface, series, max, plot_w, plot_h, slot);
    }

    fn grid(&self, surface: &mut dyn Surface, n: usize, plot_w: f64, plot_h: f64) {
        let divisions = GRID_DIVISIONS as f64;
        match self.orientation {
            Orientation::Vertical => {
                // One vertical line per slot boundary.
                let slot = plot_w / n as f64;
                for i in 0..=n {
                    let x = MARGIN + i as f64 * slot;
                    surface.line(x, MARGIN, x, self.height - MARGIN, 1.0, Rgb::GRID);
                }
                for i in 0..=GRID_DIVISIONS {
                    let y = MARGIN + i as f64 * plot_h / divisions;
                    surface.line(MARGIN, y, self.width - MARGIN, y, 1.0, Rgb::GRID);
                }
            }
            Orientation::Horizontal => {
                for i in 0..=GRID_DIVISIONS {
                    let x = MARGIN + i as f64 * plot_w / divisions;
                    surface.line(x, MARGIN, x, self.height - MARGIN, 1.0, Rgb::GRID);
                }
            }
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

    fn labels(
        &self,
        surface: &mut dyn Surface,
        series: &ChartSeries,
        max: f64,
        plot_w: f64,
        plot_h: f64,
        slot: f64,
    ) {
        let divisions = GRID_DIVISIONS as f64;
        match self.orientation {
            Orientation::Vertical => {
                for (i, label) in series.labels.iter().enumerate() {
                    let x = MARGIN + i as f64 * slot + slot / 2.0;
                    surface.text(label, x, self.height - MARGIN + 20.0, TextStyle::label());
                }
                for i in 0..=GRID_DIVISIONS {
                    let value = max * (GRID_DIVISIONS - i) as f64 / divisions;
                    let y = MARGIN + i as f64 * plot_h / divisions + 4.0;
                    surface.text(
                        &format_value(value),
                        MARGIN - 10.0,
                        y,
                        TextStyle::label().align(TextAlign::Right),
                    );
                }
            }
            Orientation::Horizontal => {
                for (i, label) in series.labels.iter().enumerate() {
                    let y = MARGIN + i as f64 * slot + slot / 2.0 + 4.0;
                    surface.text(
                        label,
                        MARGIN - 10.0,
                        y,
                        TextStyle::label().align(TextAlign::Right),
                    );
                }
                for i in 0..=GRID_DIVISIONS {
                    let value = max * i as f64 / divisions;
                    let x = MARGIN + i as f64 * plot_w / divisions;
                    surface.text(
                        &format_value(value),
                        x,
                        self.height - MARGIN + 20.0,
                        TextStyle::label(),
                    );
                }
            }
        }
    }
}
