//! Plots `results.csv` from the working directory in a desktop window.
#![forbid(unsafe_code)]

mod ui;

use clap::Parser;
use ptrplot::render::WindowSurface;
use ptrplot::{pipeline, PlotConfig, VizError};
use tracing_subscriber::EnvFilter;
use ui::Ui;

const LOG_DIRECTIVE: &str = "ptrplot=warn";

#[derive(Parser, Debug)]
#[command(
    name = "ptrplot",
    version,
    about = "Plots raw vs unique vs shared pointer timings from ./results.csv"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_tracing();
    let ui = Ui::new();
    if let Err(err) = run(&ui) {
        ui.error(&format!("error: {}: {err}", err.stage()));
        std::process::exit(1);
    }
}

fn run(ui: &Ui) -> Result<(), VizError> {
    let cfg = PlotConfig::default();

    let task = ui.task(format!("loading {}", cfg.results_path.display()));
    let (table, figure) = pipeline::prepare(&cfg)?;
    let load_time = task.finish();
    ui.dataset(&table, load_time);

    ui.figure(&figure);
    let mut surface = WindowSurface::new(figure.title.as_str());
    pipeline::render(&figure, &mut surface)?;
    ui.done();
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(LOG_DIRECTIVE))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
