//! Backend-independent description of the comparison figure.
//!
//! [`Figure::from_table`] is deterministic: the same table and config always
//! yield the same ranges, ticks and points.

use std::ops::Range;
use std::path::Path;

use plotters::style::RGBColor;
use tracing::debug;

use crate::config::PlotConfig;
use crate::error::{Result, VizError};
use crate::loader::{Column, ResultTable};

/// Fraction of the data extent added on each side of an axis.
pub const AXIS_MARGIN: f64 = 0.05;

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Column the y-values came from.
    pub column: Column,
    /// Line and marker colour.
    pub color: RGBColor,
    /// `(size, value)` pairs in source row order.
    pub points: Vec<(f64, f64)>,
}

/// Axis label, extent and tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Axis caption.
    pub label: String,
    /// Visible data range.
    pub range: Range<f64>,
    /// Tick and gridline positions, ascending, all inside `range`.
    pub ticks: Vec<f64>,
    /// Fraction digits needed to tell neighbouring ticks apart.
    pub decimals: usize,
}

impl Axis {
    fn new(label: &str, min: f64, max: f64, max_ticks: usize, origin: &Path) -> Result<Self> {
        let range = padded_range(min, max);
        if !(range.end - range.start).is_finite() {
            return Err(VizError::malformed(
                origin,
                format!(
                    "'{label}' values span {}..{}, too wide to plot",
                    plain_number(min),
                    plain_number(max)
                ),
            ));
        }
        let step = tick_step(&range, max_ticks);
        Ok(Self {
            label: label.to_string(),
            ticks: step.map(|s| ticks_on(&range, s, max_ticks)).unwrap_or_default(),
            decimals: step.map(step_decimals).unwrap_or(0),
            range,
        })
    }

    /// Formats a tick value in plain decimal notation at this axis' precision.
    pub fn format_tick(&self, value: f64) -> String {
        let text = format!("{value:.prec$}", prec = self.decimals);
        if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            return text.trim_start_matches('-').to_string();
        }
        text
    }

    /// Tick labels in plain decimal notation.
    pub fn tick_labels(&self) -> Vec<String> {
        self.ticks.iter().map(|&t| self.format_tick(t)).collect()
    }
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Caption drawn above the plot area.
    pub title: String,
    /// Horizontal axis (`size`).
    pub x: Axis,
    /// Vertical axis (timings).
    pub y: Axis,
    /// Plotted lines, in legend order.
    pub series: Vec<Series>,
    /// Marker radius in pixels.
    pub marker_size: u32,
    /// Grid mesh opacity.
    pub grid_alpha: f64,
}

impl Figure {
    /// Builds the figure for `table`. Points are aligned by row position.
    ///
    /// # Errors
    /// [`VizError::MalformedData`] when an axis extent overflows `f64`.
    pub fn from_table(table: &ResultTable, cfg: &PlotConfig) -> Result<Self> {
        let sizes = table.column(Column::Size);
        let series: Vec<Series> = cfg
            .series
            .iter()
            .map(|style| Series {
                label: style.label.clone(),
                column: style.column,
                color: style.color,
                points: sizes
                    .iter()
                    .copied()
                    .zip(table.column(style.column))
                    .collect(),
            })
            .collect();

        let (x_min, x_max) = extent(sizes.iter().copied());
        let (y_min, y_max) = extent(
            series
                .iter()
                .flat_map(|s| s.points.iter().map(|&(_, y)| y)),
        );

        let figure = Self {
            width: cfg.width,
            height: cfg.height,
            title: cfg.title.clone(),
            x: Axis::new(&cfg.x_label, x_min, x_max, cfg.max_ticks, table.origin())?,
            y: Axis::new(&cfg.y_label, y_min, y_max, cfg.max_ticks, table.origin())?,
            series,
            marker_size: cfg.marker_size,
            grid_alpha: cfg.grid_alpha,
        };
        debug!(
            series = figure.series.len(),
            points = table.len(),
            x_start = figure.x.range.start,
            x_end = figure.x.range.end,
            y_start = figure.y.range.start,
            y_end = figure.y.range.end,
            "chart.figure.built"
        );
        Ok(figure)
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Pads `[min, max]` by [`AXIS_MARGIN`] on each side. A zero-width extent is
/// widened so the axis never collapses.
pub fn padded_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if min == 0.0 {
        1.0
    } else {
        min.abs() * AXIS_MARGIN
    };
    (min - pad)..(max + pad)
}

/// Picks at most `max_ticks` evenly spaced ticks on a 1-2-5 step inside `range`.
pub fn nice_ticks(range: &Range<f64>, max_ticks: usize) -> Vec<f64> {
    tick_step(range, max_ticks)
        .map(|step| ticks_on(range, step, max_ticks))
        .unwrap_or_default()
}

fn tick_step(range: &Range<f64>, max_ticks: usize) -> Option<f64> {
    let span = range.end - range.start;
    if max_ticks == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }
    let intervals = max_ticks.saturating_sub(1).max(1) as f64;
    let magnitude = 10f64.powf((span / intervals).log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| span / step <= intervals)
        .unwrap_or(10.0 * magnitude);
    Some(step)
}

fn ticks_on(range: &Range<f64>, step: f64, max_ticks: usize) -> Vec<f64> {
    let first = (range.start / step).ceil() as i64;
    let last = (range.end / step).floor() as i64;
    (first..=last)
        .map(|k| k as f64 * step)
        .take(max_ticks)
        .collect()
}

// Steps are 1, 2 or 5 times a power of ten, so the exponent alone fixes the digits.
fn step_decimals(step: f64) -> usize {
    let exponent = (step.log10() + 1e-9).floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Formats `value` as an ordinary decimal number, never in exponent form.
///
/// Uses the shortest representation that reads back to the same `f64`.
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_results;
    use std::path::Path;

    fn table(text: &str) -> ResultTable {
        parse_results(text.as_bytes(), Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn two_row_scenario() {
        let t = table("size,raw,unique,shared\n10,5.0,6.0,7.0\n20,9.0,11.0,14.0\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();

        assert_eq!(fig.series.len(), 3);
        let labels: Vec<&str> = fig.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Raw pointer", "UniquePtr", "SharedPtr"]);
        assert_eq!(fig.series[0].points, vec![(10.0, 5.0), (20.0, 9.0)]);
        assert_eq!(fig.series[1].points, vec![(10.0, 6.0), (20.0, 11.0)]);
        assert_eq!(fig.series[2].points, vec![(10.0, 7.0), (20.0, 14.0)]);
    }

    #[test]
    fn carries_fixed_captions() {
        let t = table("size,raw,unique,shared\n1,1,1,1\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        assert_eq!(fig.x.label, "Array size");
        assert_eq!(fig.y.label, "Time (microseconds)");
        assert_eq!(
            fig.title,
            "Performance Comparison: Raw vs UniquePtr vs SharedPtr"
        );
        assert_eq!((fig.width, fig.height), (1400, 800));
    }

    #[test]
    fn ranges_cover_every_point() {
        let t = table(
            "size,raw,unique,shared\n10000,3,4,9\n100000000,900,1200,2500\n1000000,40,55,80\n",
        );
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        for series in &fig.series {
            for &(x, y) in &series.points {
                assert!(fig.x.range.contains(&x));
                assert!(fig.y.range.contains(&y));
            }
        }
    }

    #[test]
    fn single_row_gets_non_empty_ranges() {
        let t = table("size,raw,unique,shared\n10,5,5,5\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        assert!(fig.x.range.end > fig.x.range.start);
        assert!(fig.y.range.end > fig.y.range.start);
        assert!(!fig.y.ticks.is_empty());
    }

    #[test]
    fn padded_range_handles_zero_width() {
        assert_eq!(padded_range(0.0, 0.0), -1.0..1.0);
        assert_eq!(padded_range(100.0, 100.0), 95.0..105.0);
        assert_eq!(padded_range(0.0, 100.0), -5.0..105.0);
    }

    #[test]
    fn nice_ticks_use_round_steps() {
        assert_eq!(
            nice_ticks(&(0.0..10.0), 11),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(nice_ticks(&(-5.0..105.0), 10), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert!(nice_ticks(&(1.0..1.0), 10).is_empty());
        assert!(nice_ticks(&(0.0..1.0), 0).is_empty());
    }

    #[test]
    fn nice_ticks_respect_limit_on_wide_ranges() {
        let ticks = nice_ticks(&(-4_999_500.0..104_999_500.0), 10);
        assert!(ticks.len() <= 10);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ticks.first().copied(), Some(0.0));
    }

    #[test]
    fn plain_number_avoids_exponents() {
        assert_eq!(plain_number(100_000_000.0), "100000000");
        assert_eq!(plain_number(1e15), "1000000000000000");
        assert_eq!(plain_number(2.5), "2.5");
        assert_eq!(plain_number(1.5e-7), "0.00000015");
        assert_eq!(plain_number(0.3), "0.3");
        assert_eq!(plain_number(-0.0), "0");
        assert_eq!(plain_number(-12.0), "-12");
    }

    #[test]
    fn sub_microsecond_ticks_stay_distinct() {
        let t = table("size,raw,unique,shared\n10,1e-7,2e-7,3e-7\n20,4e-7,5e-7,6e-7\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        let labels = fig.y.tick_labels();
        assert_eq!(fig.y.decimals, 7);
        assert_eq!(
            labels,
            vec!["0.0000001", "0.0000002", "0.0000003", "0.0000004", "0.0000005", "0.0000006"]
        );
    }

    #[test]
    fn overflowing_extent_is_rejected() {
        let t = table("size,raw,unique,shared\n10,-1e308,1e308,1\n");
        let err = Figure::from_table(&t, &PlotConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedData);
        assert!(err.to_string().contains("too wide to plot"), "{err}");
    }

    #[test]
    fn format_tick_drops_negative_zero() {
        let t = table("size,raw,unique,shared\n0,1,1,1\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        assert_eq!(fig.x.decimals, 1);
        assert_eq!(fig.x.format_tick(-0.0), "0.0");
        assert_eq!(fig.x.format_tick(-1e-12), "0.0");
        assert_eq!(fig.x.format_tick(-0.5), "-0.5");
    }

    #[test]
    fn tick_labels_are_plain() {
        let t = table("size,raw,unique,shared\n10000,1,1,1\n100000000,2,2,2\n");
        let fig = Figure::from_table(&t, &PlotConfig::default()).unwrap();
        for label in fig.x.tick_labels() {
            assert!(!label.contains('e'), "{label}");
        }
    }
}
