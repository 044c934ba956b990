// File: crates/tvchart-demo/src/main.rs
// Summary: Demo builds a figure (candles, SMA overlays, volume, trade events) from CSV or
//          synthetic bars, writes the wire payload and renders it through a page session.

mod data;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tvchart_core::theme;
use tvchart_core::{
    generate_bars_seeded, rolling_mean, BusinessDay, CandlestickSpec, EventKind, EventSpec, Figure, GeneratorOptions,
    LineSpec, PageSession, Period, RawPayload, TimeInput, VolumeSpec,
};
use tvchart_render_skia::SceneBackend;

#[derive(Parser)]
#[command(name = "tvchart-demo", about = "Render a candlestick chart payload from CSV or synthetic data")]
struct Cli {
    /// OHLC CSV with headers; synthetic bars are generated when omitted
    #[arg(long)]
    csv: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// chrono format of the CSV time column
    #[arg(long, default_value = "%b %d %Y")]
    date_format: String,

    /// Seed for synthetic bars
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// First synthetic day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    from: Option<NaiveDate>,

    /// End of the synthetic range, exclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    to: Option<NaiveDate>,

    /// Theme preset: light or dark
    #[arg(long, default_value = "light")]
    theme: String,

    /// SMA window lengths drawn as line overlays
    #[arg(long, value_delimiter = ',', default_values_t = [20usize, 50, 100])]
    sma: Vec<usize>,

    /// Container size after the first layout pass
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Output directory for payload.json (and chart.png with `raster`)
    #[arg(long, default_value = "target/out")]
    out: PathBuf,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{s:?}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let fig = build_figure(&cli)?;

    let payload = fig.to_payload()?;
    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    let payload_path = cli.out.join("payload.json");
    std::fs::write(&payload_path, payload.to_json()?)?;
    info!(path = %payload_path.display(), series = payload.series.len(), "wrote payload");

    let bridge = move || -> tvchart_core::Result<RawPayload> { Ok(payload.clone()) };
    let mut session = PageSession::new(bridge, SceneBackend::new(), "chart".to_string());
    if let Some(report) = session.on_ready()? {
        for f in &report.failed {
            tracing::warn!(index = f.index, reason = %f.reason, "series failed");
        }
    }
    let renderer = session.renderer_mut().context("page did not render")?;
    renderer.on_container_resize(cli.width, cli.height);

    // Park the crosshair on the last candle so the legends show values.
    let last = fig.series().first().and_then(|s| match &s.data {
        tvchart_core::SeriesData::Candlestick(bars) => bars.last().map(|b| b.time),
        _ => None,
    });
    if let Some(time) = last {
        let event = renderer.crosshair_at(time);
        renderer.on_crosshair_move(&event);
    }
    for legend in &renderer.backend().scene().legends {
        if let Some(t) = &legend.text {
            info!(name = %t.name, value = %t.value, "legend");
        }
    }

    #[cfg(feature = "raster")]
    {
        let png = cli.out.join("chart.png");
        tvchart_render_skia::render_png(renderer.backend().scene(), &Default::default(), &png)?;
        info!(path = %png.display(), "wrote chart");
    }

    Ok(())
}

fn build_figure(cli: &Cli) -> Result<Figure> {
    let mut fig = Figure::new("tvchart demo", theme::find(&cli.theme));

    // Times of each bar, used to place trade events.
    let (closes, times) = match &cli.csv {
        Some(path) => {
            let delimiter = u8::try_from(cli.delimiter).context("delimiter must be a single ASCII character")?;
            let loaded = data::load_ohlc_csv(path, delimiter)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            if loaded.rows.is_empty() {
                anyhow::bail!("no rows loaded; check headers/delimiter");
            }
            info!(rows = loaded.rows.len(), path = %path.display(), "loaded csv");
            let closes: Vec<f64> = loaded.rows.iter().map(|r| r.close).collect();
            let times: Vec<TimeInput> = loaded.rows.iter().map(|r| r.time.clone()).collect();
            let spec = CandlestickSpec {
                name: path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string(),
                date_format: Some(cli.date_format.clone()),
                show_legend: true,
            };
            fig.add_candlestick(loaded.rows, spec)?;
            if let Some(volume) = loaded.volume {
                fig.add_volume(&volume, VolumeSpec::default())?;
            }
            (closes, times)
        }
        None => {
            let defaults = Period::default();
            let period = Period::new(
                cli.from.map(BusinessDay::from_date).unwrap_or(defaults.from),
                cli.to.map(BusinessDay::from_date).unwrap_or(defaults.to),
            );
            let opts = GeneratorOptions { period, ..GeneratorOptions::default() };
            let bars = generate_bars_seeded(cli.seed, &opts)?;
            info!(bars = bars.len(), seed = cli.seed, "generated bars");
            let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
            let times: Vec<TimeInput> = bars.iter().map(|b| TimeInput::Timestamp(b.time.sort_key())).collect();
            fig.add_bars(bars, CandlestickSpec { name: "Synthetic".into(), ..CandlestickSpec::default() })?;
            (closes, times)
        }
    };

    for &period in &cli.sma {
        fig.add_line(&rolling_mean(&closes, period), LineSpec::named(format!("SMA {period}")))?;
    }

    // Buy the lowest close, sell the highest.
    let by_close = |a: &(usize, &f64), b: &(usize, &f64)| a.1.total_cmp(b.1);
    if let (Some((lo, lo_close)), Some((hi, hi_close))) = (
        closes.iter().enumerate().min_by(by_close),
        closes.iter().enumerate().max_by(by_close),
    ) {
        fig.add_event(EventSpec::new(times[lo].clone(), format!("{lo_close:.2}")).kind(EventKind::Buy))?;
        fig.add_event(EventSpec::new(times[hi].clone(), format!("{hi_close:.2}")).kind(EventKind::Sell))?;
    }
    Ok(fig)
}
