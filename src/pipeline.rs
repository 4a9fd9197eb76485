//! Load → figure → present, in one pass.

use tracing::{info, info_span};

use crate::chart::Figure;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::loader::{load_results, ResultTable};
use crate::render::{rasterize, Surface};

/// Loads the results table named by `cfg` and builds its figure.
///
/// # Errors
/// Loader errors ([`crate::VizError::DataUnavailable`],
/// [`crate::VizError::MalformedData`]), including values whose extent cannot
/// be plotted.
pub fn prepare(cfg: &PlotConfig) -> Result<(ResultTable, Figure)> {
    let _span = info_span!("pipeline.prepare", path = %cfg.results_path.display()).entered();
    let table = load_results(&cfg.results_path)?;
    let figure = Figure::from_table(&table, cfg)?;
    Ok((table, figure))
}

/// Rasterises `figure` completely and then presents it on `surface`.
///
/// Nothing reaches the surface unless every drawing step succeeded.
///
/// # Errors
/// [`crate::VizError::RenderUnavailable`].
pub fn render(figure: &Figure, surface: &mut dyn Surface) -> Result<()> {
    let _span = info_span!("pipeline.render").entered();
    let frame = rasterize(figure)?;
    surface.present(&frame)?;
    info!("pipeline.render.dismissed");
    Ok(())
}

/// Runs the whole pipeline once.
///
/// # Errors
/// The first error of any stage; later stages are skipped.
pub fn run(cfg: &PlotConfig, surface: &mut dyn Surface) -> Result<()> {
    let (_, figure) = prepare(cfg)?;
    render(&figure, surface)
}
