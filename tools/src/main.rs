//! dash-runner: headless dashboard runner.
//!
//! Seeds a deterministic dataset, drives the refresh simulator on the
//! virtual clock, prints the KPI summary, and renders the standard
//! charts to SVG files.
//!
//! Usage:
//!   dash-runner --seed 42 --customers 40 --refreshes 3 --out ./charts

mod svg;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use shopdash_core::{
    chart::{BarChart, LineChart, PieChart},
    pipeline::Dashboard,
    refresh::{RefreshSimulator, RefreshTask, DEFAULT_INTERVAL_MS, DEFAULT_LATENCY_MS},
    rng::{DashRng, StreamSlot},
    sample::{self, SampleConfig, REFERENCE_DATE},
    schedule::Scheduler,
};
use std::{env, fs, path::Path};
use svg::SvgSurface;

/// Machine-readable end-of-run summary (`--json`).
#[derive(serde::Serialize)]
struct RunSummary {
    run_id: String,
    seed: u64,
    refresh_count: u64,
    last_refresh_ms: Option<u64>,
    metrics: shopdash_core::metrics::DashboardMetrics,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let customers = parse_arg(&args, "--customers", 40usize);
    let refreshes = parse_arg(&args, "--refreshes", 3u64);
    let interval_ms = parse_arg(&args, "--interval-ms", DEFAULT_INTERVAL_MS);
    let out_dir = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "./charts".to_string());

    let run_id = format!("run-{}", uuid::Uuid::new_v4());
    println!("shopdash — dash-runner");
    println!("  run:        {run_id}");
    println!("  seed:       {seed}");
    println!("  customers:  {customers}");
    println!("  refreshes:  {refreshes}");
    println!("  interval:   {interval_ms}ms");
    println!();

    // Seed a referentially consistent dataset and compose the pipeline.
    let mut sample_rng = DashRng::new(seed, StreamSlot::Sample);
    let config = SampleConfig { customers, ..SampleConfig::default() };
    let store = sample::generate(&config, &mut sample_rng);
    let today = NaiveDate::parse_from_str(REFERENCE_DATE, "%Y-%m-%d")?;
    let mut dashboard = Dashboard::new(store, today);

    // Run the requested number of refresh cycles on the virtual clock.
    let mut sched: Scheduler<RefreshTask> = Scheduler::new();
    let mut sim = RefreshSimulator::with_timing(
        DashRng::new(seed, StreamSlot::Refresh),
        interval_ms,
        DEFAULT_LATENCY_MS,
    );
    sim.start(&mut sched);
    let horizon = refreshes * interval_ms + DEFAULT_LATENCY_MS;
    sim.run_until(&mut sched, horizon, dashboard.store_mut())?;
    sim.stop(&mut sched);
    log::info!("completed {} refresh cycles", sim.refresh_count);

    // KPI summary.
    let metrics = dashboard.metrics();
    if args.iter().any(|a| a == "--json") {
        let summary = RunSummary {
            run_id,
            seed,
            refresh_count: sim.refresh_count,
            last_refresh_ms: sim.last_refresh,
            metrics,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("After {} refreshes:", sim.refresh_count);
    println!("  revenue:       {:>12.2}", metrics.total_revenue);
    println!("  profit:        {:>12.2}", metrics.total_profit);
    println!("  sales:         {:>12}", metrics.total_sales);
    println!("  customers:     {:>12}", metrics.total_customers);
    println!("  avg order:     {:>12.2}", metrics.average_order_value);
    println!("  margin:        {:>11.1}%", metrics.profit_margin);
    println!("  top product:   {}", metrics.top_selling_product);
    println!("  monthly growth:{:>11.1}%", metrics.monthly_growth);
    println!();

    // Standard charts to SVG.
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {out_dir}"))?;

    render_line(&dashboard, &out_dir, "revenue-profit.svg")?;
    render_bar(&dashboard, &out_dir, "top-products.svg")?;
    render_pie(&dashboard, &out_dir, "customer-status.svg")?;
    render_category(&dashboard, &out_dir, "category-revenue.svg")?;

    println!("charts written to {out_dir}/");
    Ok(())
}

fn render_line(dashboard: &Dashboard, dir: &str, file: &str) -> Result<()> {
    let mut surface = SvgSurface::new(800.0, 400.0);
    LineChart::new(800.0, 400.0)
        .title("Revenue & Profit Trends")
        .render(&mut surface, &dashboard.revenue_profit_series());
    write_svg(dir, file, surface)
}

fn render_bar(dashboard: &Dashboard, dir: &str, file: &str) -> Result<()> {
    let mut surface = SvgSurface::new(600.0, 400.0);
    BarChart::new(600.0, 400.0)
        .title("Top Selling Products")
        .horizontal()
        .render(&mut surface, &dashboard.top_products_series());
    write_svg(dir, file, surface)
}

fn render_pie(dashboard: &Dashboard, dir: &str, file: &str) -> Result<()> {
    let mut surface = SvgSurface::new(400.0, 400.0);
    PieChart::new(400.0, 400.0)
        .title("Customer Status")
        .render(&mut surface, &dashboard.customer_status_series());
    write_svg(dir, file, surface)
}

fn render_category(dashboard: &Dashboard, dir: &str, file: &str) -> Result<()> {
    let mut surface = SvgSurface::new(600.0, 400.0);
    BarChart::new(600.0, 400.0)
        .title("Revenue by Category")
        .render(&mut surface, &dashboard.category_revenue_series());
    write_svg(dir, file, surface)
}

fn write_svg(dir: &str, file: &str, surface: SvgSurface) -> Result<()> {
    let path = Path::new(dir).join(file);
    fs::write(&path, surface.into_document())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
