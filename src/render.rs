//! Drawing the [`Figure`] with plotters and handing the raster to a display surface.

use std::ops::Range;

use minifb::{Key, Window, WindowOptions};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::chart::{Axis, Figure};
use crate::error::{Result, VizError};

const FONT: &str = "sans-serif";
const DASH_LENGTH: u32 = 6;
const DASH_GAP: u32 = 4;
const LINE_WIDTH: u32 = 2;
const TARGET_FPS: usize = 30;

/// Fully drawn 0RGB raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// `0x00RRGGBB` pixels.
    pub pixels: Vec<u32>,
}

impl Frame {
    /// Packs an RGB byte buffer (3 bytes per pixel) into a frame.
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Self {
        let pixels = rgb
            .chunks_exact(3)
            .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Linear `f64` axis whose key points are the figure's own ticks, so labels
/// and dashed gridlines land on the same positions.
struct TickedAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    fn new(axis: &Axis) -> Self {
        Self {
            coord: axis.range.clone().into(),
            ticks: axis.ticks.clone(),
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

/// Output target that shows a finished frame to the user.
pub trait Surface {
    /// Presents `frame`, blocking until the viewer is dismissed.
    ///
    /// # Errors
    /// [`VizError::RenderUnavailable`] when the surface cannot be opened.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Desktop window surface. Closes on window close or Escape.
#[derive(Debug, Clone)]
pub struct WindowSurface {
    title: String,
}

impl WindowSurface {
    /// Creates a surface whose window carries `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Surface for WindowSurface {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        // The window is released on every return path when it goes out of scope.
        let mut window = Window::new(
            &self.title,
            frame.width,
            frame.height,
            WindowOptions::default(),
        )
        .map_err(VizError::render)?;
        window.set_target_fps(TARGET_FPS);
        debug!(
            width = frame.width,
            height = frame.height,
            "render.window.opened"
        );
        while window.is_open() && !window.is_key_down(Key::Escape) {
            window
                .update_with_buffer(&frame.pixels, frame.width, frame.height)
                .map_err(VizError::render)?;
        }
        debug!("render.window.closed");
        Ok(())
    }
}

/// Draws `figure` into an in-memory bitmap.
///
/// # Errors
/// [`VizError::RenderUnavailable`] if the backend cannot draw (for example
/// when no font is available).
pub fn rasterize(figure: &Figure) -> Result<Frame> {
    let (width, height) = (figure.width as usize, figure.height as usize);
    let mut rgb = vec![0u8; width * height * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (figure.width, figure.height))
            .into_drawing_area();
        draw_figure(&root, figure)?;
    }
    debug!(width, height, "render.rasterize.completed");
    Ok(Frame::from_rgb(width, height, &rgb))
}

/// Draws `figure` onto any plotters drawing area.
///
/// # Errors
/// [`VizError::RenderUnavailable`] wrapping the backend error.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<()> {
    root.fill(&WHITE).map_err(VizError::render)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(TickedAxis::new(&figure.x), TickedAxis::new(&figure.y))
        .map_err(VizError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x.label.as_str())
        .y_desc(figure.y.label.as_str())
        .x_label_formatter(&|v| figure.x.format_tick(*v))
        .y_label_formatter(&|v| figure.y.format_tick(*v))
        .axis_desc_style((FONT, 18))
        .label_style((FONT, 14))
        .draw()
        .map_err(VizError::render)?;

    let grid = BLACK.mix(figure.grid_alpha).stroke_width(1);
    let (x_start, x_end) = (figure.x.range.start, figure.x.range.end);
    let (y_start, y_end) = (figure.y.range.start, figure.y.range.end);
    for &x in &figure.x.ticks {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x, y_start), (x, y_end)],
                DASH_LENGTH,
                DASH_GAP,
                grid,
            ))
            .map_err(VizError::render)?;
    }
    for &y in &figure.y.ticks {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x_start, y), (x_end, y)],
                DASH_LENGTH,
                DASH_GAP,
                grid,
            ))
            .map_err(VizError::render)?;
    }

    for series in &figure.series {
        let color = series.color;
        chart
            .draw_series(
                LineSeries::new(series.points.iter().copied(), color.stroke_width(LINE_WIDTH))
                    .point_size(figure.marker_size),
            )
            .map_err(VizError::render)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x - 10, y), (x + 10, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 16))
        .draw()
        .map_err(VizError::render)?;

    root.present().map_err(VizError::render)?;
    Ok(())
}
