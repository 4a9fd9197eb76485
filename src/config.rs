//! Literal plot settings.
//!
//! Every value is fixed at compile time; nothing is read from files, flags or
//! the environment.

use std::path::PathBuf;

use plotters::style::RGBColor;

use crate::loader::Column;

/// Default results file, resolved against the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "results.csv";

/// Presentation of one dependent series.
#[derive(Debug, Clone)]
pub struct SeriesStyle {
    /// Column the series is read from.
    pub column: Column,
    /// Legend label.
    pub label: String,
    /// Line and marker colour.
    pub color: RGBColor,
}

/// Settings for a single rendering pass.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// CSV file holding the benchmark results.
    pub results_path: PathBuf,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Figure title.
    pub title: String,
    /// Label for the `size` axis.
    pub x_label: String,
    /// Label for the timing axis.
    pub y_label: String,
    /// Dependent series, drawn in order.
    pub series: Vec<SeriesStyle>,
    /// Radius of the circular point markers, in pixels.
    pub marker_size: u32,
    /// Opacity of the dashed grid mesh.
    pub grid_alpha: f64,
    /// Upper bound on tick marks per axis.
    pub max_ticks: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            width: 1400,
            height: 800,
            title: "Performance Comparison: Raw vs UniquePtr vs SharedPtr".to_string(),
            x_label: "Array size".to_string(),
            y_label: "Time (microseconds)".to_string(),
            series: vec![
                SeriesStyle {
                    column: Column::Raw,
                    label: "Raw pointer".to_string(),
                    color: RGBColor(31, 119, 180),
                },
                SeriesStyle {
                    column: Column::Unique,
                    label: "UniquePtr".to_string(),
                    color: RGBColor(255, 127, 14),
                },
                SeriesStyle {
                    column: Column::Shared,
                    label: "SharedPtr".to_string(),
                    color: RGBColor(44, 160, 44),
                },
            ],
            marker_size: 4,
            grid_alpha: 0.5,
            max_ticks: 10,
        }
    }
}
