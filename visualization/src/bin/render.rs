//! Render an X-bar control chart to SVG
//!
//! Fetches the chart from a running service with `--server`, otherwise
//! generates and computes it locally with the default generator.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use xbar::config::{AppConfig, LoggingConfig};
use xbar::generator::{NormalSampleGenerator, SampleGenerator};
use xbar::{statistics, ChartClient, ChartRequest};
use xbar_visualization::{
    ChartDisplay, ChartFrame, ChartLayout, ChartStyle, DisplayUpdate, StatsFormat, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "xbar-render", version, about)]
struct Args {
    /// Number of samples to chart
    #[arg(long)]
    num_samples: i64,

    /// Measurements per sample
    #[arg(long)]
    measurements_per_sample: i64,

    /// Chart service base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server: Option<String>,

    /// Output SVG file
    #[arg(short, long)]
    output: PathBuf,

    /// Color theme: dark or light
    #[arg(long, default_value_t = Theme::Dark)]
    theme: Theme,

    /// Decimal places in the key statistics
    #[arg(long, default_value_t = 2)]
    precision: usize,

    /// Unit appended to key statistics
    #[arg(long, default_value = "g")]
    unit: String,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    xbar::telemetry::init_tracing(&LoggingConfig {
        filter: "info".to_string(),
        json: false,
    })?;

    let mut style = ChartStyle::for_theme(args.theme);
    style.stats_format = StatsFormat {
        precision: args.precision,
        unit: args.unit.clone(),
    };
    let layout = ChartLayout {
        width: args.width,
        height: args.height,
        ..ChartLayout::default()
    };
    let mut display = ChartDisplay::new(style, layout);

    let request = ChartRequest::new(args.num_samples, args.measurements_per_sample);
    let ticket = display.begin_request();
    let outcome = match &args.server {
        Some(url) => fetch(url, &request).await,
        None => compute_locally(&request),
    };

    match display.apply(ticket, outcome) {
        DisplayUpdate::Replaced => {}
        DisplayUpdate::Stale => bail!("chart response was superseded"),
        DisplayUpdate::Kept { error } => bail!("failed to produce chart: {error}"),
    }

    let chart = display
        .current()
        .context("no chart to export after a successful update")?;
    std::fs::write(&args.output, &chart.svg)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    for line in &chart.key_stats {
        println!("{line}");
    }
    println!("Chart written to {}", args.output.display());
    Ok(())
}

async fn fetch(url: &str, request: &ChartRequest) -> anyhow::Result<ChartFrame> {
    let response = ChartClient::new(url).generate(request).await?;
    Ok(ChartFrame::from_response(&response)?)
}

fn compute_locally(request: &ChartRequest) -> anyhow::Result<ChartFrame> {
    let config = AppConfig::default();
    let params = request.into_parameters(&config.chart.limits())?;
    let factor = config.chart.factor.resolve(params.measurements_per_sample())?;
    let samples = NormalSampleGenerator::new(&config.generator)?.generate(&params)?;
    let chart = statistics::compute(&samples, factor)?;
    Ok(ChartFrame::from_chart(&chart)?)
}
