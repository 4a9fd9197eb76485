//! Plots smart-pointer benchmark timings (raw, unique, shared) against input size.
//!
//! The crate reads a `size,raw,unique,shared` CSV table, builds a
//! [`chart::Figure`] and presents it on a [`render::Surface`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod render;

pub use chart::Figure;
pub use config::PlotConfig;
pub use error::{ErrorKind, Stage, VizError};
pub use loader::{load_results, Column, ResultRow, ResultTable};
