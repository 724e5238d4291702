//! Chart renderer tests against the recording surface: exact bar
//! geometry, line degeneracy, pie shares, and graceful empties.

use shopdash_core::{
    aggregate::{ChartSeries, Dataset},
    chart::{
        surface::{DrawCmd, RecordingSurface, Rgb},
        BarChart, LineChart, PieChart, MARGIN, PALETTE,
    },
};

fn series(values: &[f64]) -> ChartSeries {
    ChartSeries {
        labels: (0..values.len()).map(|i| format!("l{i}")).collect(),
        datasets: vec![Dataset::new("v", vec![PALETTE[0]], values.to_vec())],
    }
}

fn bars(surface: &RecordingSurface) -> Vec<(f64, f64, f64, f64)> {
    surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillRect { x, y, w, h, color } if *color == PALETTE[0] => {
                Some((*x, *y, *w, *h))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn vertical_bars_scale_heights_in_value_ratio() {
    let mut surface = RecordingSurface::new();
    BarChart::new(600.0, 400.0).render(&mut surface, &series(&[10.0, 20.0, 30.0]));

    let bars = bars(&surface);
    assert_eq!(bars.len(), 3);
    let plot_h = 400.0 - 2.0 * MARGIN;
    assert!((bars[0].3 - plot_h / 3.0).abs() < 1e-9, "10/30 of plot height");
    assert!((bars[1].3 - plot_h * 2.0 / 3.0).abs() < 1e-9, "20/30 of plot height");
    assert!((bars[2].3 - plot_h).abs() < 1e-9, "max value fills the plot");
    // Bars start at the baseline.
    for (_, y, _, h) in &bars {
        assert!((y + h - (400.0 - MARGIN)).abs() < 1e-9, "bar must touch the x axis");
    }
}

#[test]
fn vertical_bars_occupy_80_percent_of_their_slot() {
    let mut surface = RecordingSurface::new();
    BarChart::new(600.0, 400.0).render(&mut surface, &series(&[1.0, 2.0]));

    let bars = bars(&surface);
    let slot = (600.0 - 2.0 * MARGIN) / 2.0;
    for (i, (x, _, w, _)) in bars.iter().enumerate() {
        assert!((w - slot * 0.8).abs() < 1e-9);
        let expected_x = MARGIN + i as f64 * slot + slot * 0.1;
        assert!((x - expected_x).abs() < 1e-9, "bar {i} centered in its slot");
    }
}

#[test]
fn horizontal_bars_grow_from_the_left_axis() {
    let mut surface = RecordingSurface::new();
    BarChart::new(600.0, 400.0)
        .horizontal()
        .render(&mut surface, &series(&[5.0, 10.0]));

    let bars = bars(&surface);
    assert_eq!(bars.len(), 2);
    let plot_w = 600.0 - 2.0 * MARGIN;
    for (x, _, _, _) in &bars {
        assert!((x - MARGIN).abs() < 1e-9, "bars start at the axis");
    }
    assert!((bars[0].2 - plot_w / 2.0).abs() < 1e-9);
    assert!((bars[1].2 - plot_w).abs() < 1e-9);
}

#[test]
fn bar_chart_draws_six_value_gridlines() {
    let mut surface = RecordingSurface::new();
    BarChart::new(600.0, 400.0).render(&mut surface, &series(&[1.0]));
    let horizontal_gridlines = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Line { y1, y2, color, .. }
            if y1 == y2 && *color == Rgb::GRID))
        .count();
    assert_eq!(horizontal_gridlines, 6, "gridlines at max * i/5 for i in 0..=5");
}

#[test]
fn empty_series_renders_no_commands() {
    let empty = ChartSeries::default();
    let mut surface = RecordingSurface::new();
    BarChart::new(600.0, 400.0).render(&mut surface, &empty);
    LineChart::new(600.0, 400.0).render(&mut surface, &empty);
    PieChart::new(400.0, 400.0).render(&mut surface, &empty);
    assert!(surface.commands.is_empty(), "degenerate input must issue nothing");
}

#[test]
fn single_point_line_renders_one_marker_and_no_polyline() {
    let mut surface = RecordingSurface::new();
    LineChart::new(600.0, 400.0).render(&mut surface, &series(&[42.0]));

    let markers: Vec<_> = surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillCircle { cx, .. } => Some(*cx),
            _ => None,
        })
        .collect();
    assert_eq!(markers.len(), 1);
    assert!(
        (markers[0] - 300.0).abs() < 1e-9,
        "single point sits mid-plot, not at a divide-by-zero position"
    );

    let data_lines = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Line { color, .. } if *color == PALETTE[0]))
        .count();
    assert_eq!(data_lines, 0, "one point has nothing to connect");
}

#[test]
fn line_chart_domain_includes_negative_values() {
    let mut surface = RecordingSurface::new();
    LineChart::new(600.0, 400.0).render(&mut surface, &series(&[-10.0, 10.0]));

    let ys: Vec<f64> = surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillCircle { cy, .. } => Some(*cy),
            _ => None,
        })
        .collect();
    assert_eq!(ys.len(), 2);
    assert!(
        (ys[0] - (400.0 - MARGIN)).abs() < 1e-9,
        "the minimum sits on the baseline, still visible"
    );
    assert!((ys[1] - MARGIN).abs() < 1e-9, "the maximum reaches the top");
}

#[test]
fn line_chart_legend_appears_only_with_multiple_datasets() {
    let two = ChartSeries {
        labels: vec!["a".into(), "b".into()],
        datasets: vec![
            Dataset::new("Revenue", vec![PALETTE[0]], vec![1.0, 2.0]),
            Dataset::new("Profit", vec![PALETTE[2]], vec![0.5, 1.0]),
        ],
    };
    let mut surface = RecordingSurface::new();
    LineChart::new(600.0, 400.0).render(&mut surface, &two);
    let legend_texts = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Text { s, .. } if s == "Revenue" || s == "Profit"))
        .count();
    assert_eq!(legend_texts, 2);

    let mut surface = RecordingSurface::new();
    LineChart::new(600.0, 400.0).render(&mut surface, &series(&[1.0, 2.0]));
    let legend_texts = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Text { s, .. } if s == "v"))
        .count();
    assert_eq!(legend_texts, 0, "single dataset draws no legend");
}

fn wedge_sweeps(surface: &RecordingSurface) -> Vec<f64> {
    surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillWedge { start, end, .. } => Some(end - start),
            _ => None,
        })
        .collect()
}

#[test]
fn pie_wedge_shares_sum_to_a_full_turn() {
    let mut surface = RecordingSurface::new();
    PieChart::new(400.0, 400.0).render(&mut surface, &series(&[1.0, 2.0, 3.0]));

    let sweeps = wedge_sweeps(&surface);
    assert_eq!(sweeps.len(), 3);
    let total: f64 = sweeps.iter().sum();
    assert!(
        (total - 2.0 * std::f64::consts::PI).abs() < 1e-9,
        "shares must normalize to 1.0 of a full turn, got {total}"
    );
    assert!((sweeps[2] / total - 0.5).abs() < 1e-9, "3 of 6 is half the pie");
}

#[test]
fn pie_starts_at_twelve_o_clock() {
    let mut surface = RecordingSurface::new();
    PieChart::new(400.0, 400.0).render(&mut surface, &series(&[1.0, 1.0]));
    let first_start = surface.commands.iter().find_map(|c| match c {
        DrawCmd::FillWedge { start, .. } => Some(*start),
        _ => None,
    });
    assert_eq!(first_start, Some(-std::f64::consts::PI / 2.0));
}

#[test]
fn zero_total_pie_degenerates_to_zero_angle_slices() {
    let mut surface = RecordingSurface::new();
    PieChart::new(400.0, 400.0).render(&mut surface, &series(&[0.0, 0.0]));

    let sweeps = wedge_sweeps(&surface);
    assert_eq!(sweeps.len(), 2, "slice count is stable even at zero total");
    assert!(sweeps.iter().all(|s| *s == 0.0), "no divide-by-zero angles");

    let zero_labels = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Text { s, .. } if s == "0.0%"))
        .count();
    assert!(zero_labels >= 2, "percentage labels read 0.0%");
}

#[test]
fn rendering_twice_is_idempotent() {
    let data = series(&[3.0, 1.0, 2.0]);
    let mut first = RecordingSurface::new();
    let mut second = RecordingSurface::new();
    let chart = BarChart::new(600.0, 400.0).title("Units");
    chart.render(&mut first, &data);
    chart.render(&mut second, &data);
    assert_eq!(first.commands, second.commands);
}
