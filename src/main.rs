use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_visualiser::model::trace::Trace;
use mcp_visualiser::ui::app::VisualiserApp;
use mcp_visualiser::ui::settings_io::load_settings;

#[derive(Parser, Debug)]
#[command(name = "mcp_visualiser", about = "Step through a User → Client → Backend → LLM → Tool exchange")]
struct Cli {
    /// Trace file to show instead of the built-in weather example
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Step to open at (1-based, as shown in the UI)
    #[arg(long, default_value_t = 1)]
    step: usize,

    /// Validate the trace, print a summary and exit
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let trace = match &cli.trace {
        Some(path) => Trace::load(path)
            .with_context(|| format!("loading trace from {}", path.display()))?,
        None => Trace::builtin().context("built-in trace is invalid")?,
    };

    if cli.step == 0 || cli.step > trace.len() {
        bail!("--step must be between 1 and {}", trace.len());
    }

    if cli.check {
        println!("{}", trace.summary());
        return Ok(());
    }

    info!("{}", trace.summary());
    let settings = load_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_title(trace.title.clone()),
        ..Default::default()
    };

    let title = trace.title.clone();
    let start = cli.step - 1;
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(VisualiserApp::new(trace, start, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
