//! Reading the benchmark results table.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Result, VizError};

/// Named column of the results table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Column {
    /// Independent variable (container length).
    Size,
    /// Raw pointer timing.
    Raw,
    /// Unique-ownership pointer timing.
    Unique,
    /// Shared-ownership pointer timing.
    Shared,
}

impl Column {
    /// Every required column, in canonical header order.
    pub const ALL: [Column; 4] = [Column::Size, Column::Raw, Column::Unique, Column::Shared];

    /// Header name of the column.
    pub fn name(self) -> &'static str {
        match self {
            Column::Size => "size",
            Column::Raw => "raw",
            Column::Unique => "unique",
            Column::Shared => "shared",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One benchmark measurement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResultRow {
    /// Input size.
    pub size: f64,
    /// Raw pointer timing.
    pub raw: f64,
    /// Unique-ownership pointer timing.
    pub unique: f64,
    /// Shared-ownership pointer timing.
    pub shared: f64,
}

impl ResultRow {
    /// Returns the value stored under `column`.
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Size => self.size,
            Column::Raw => self.raw,
            Column::Unique => self.unique,
            Column::Shared => self.shared,
        }
    }
}

/// Ordered, non-empty sequence of [`ResultRow`]s exactly as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    origin: PathBuf,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Where the table was read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true for a table returned by the loader.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `column` in source order.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }
}

/// Reads the results table at `path`.
///
/// The file handle is owned by the CSV reader and closed when this function
/// returns, whether parsing succeeded or not.
///
/// # Errors
/// [`VizError::DataUnavailable`] if the file cannot be opened or read, and
/// [`VizError::MalformedData`] if a required column is missing, a value is not
/// numeric, or the file holds no data rows.
pub fn load_results(path: impl AsRef<Path>) -> Result<ResultTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VizError::unavailable(path, source))?;
    let table = parse_results(file, path)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        "loader.load.completed"
    );
    Ok(table)
}

/// Parses a results table from any reader. `origin` only labels diagnostics.
///
/// # Errors
/// Same classification as [`load_results`].
pub fn parse_results<R: Read>(source: R, origin: &Path) -> Result<ResultTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);
    let headers = reader
        .headers()
        .map_err(|err| classify(origin, err))?
        .clone();
    let indices = ColumnIndices::resolve(&headers, origin)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| classify(origin, err))?;
        rows.push(indices.row(&record, origin)?);
    }

    if rows.is_empty() {
        return Err(VizError::malformed(origin, "no data rows after header"));
    }
    Ok(ResultTable {
        origin: origin.to_path_buf(),
        rows,
    })
}

struct ColumnIndices {
    size: usize,
    raw: usize,
    unique: usize,
    shared: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, origin: &Path) -> Result<Self> {
        Ok(Self {
            size: find_column(headers, Column::Size, origin)?,
            raw: find_column(headers, Column::Raw, origin)?,
            unique: find_column(headers, Column::Unique, origin)?,
            shared: find_column(headers, Column::Shared, origin)?,
        })
    }

    fn row(&self, record: &StringRecord, origin: &Path) -> Result<ResultRow> {
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        Ok(ResultRow {
            size: get_number(record, self.size, Column::Size, line, origin)?,
            raw: get_number(record, self.raw, Column::Raw, line, origin)?,
            unique: get_number(record, self.unique, Column::Unique, line, origin)?,
            shared: get_number(record, self.shared, Column::Shared, line, origin)?,
        })
    }
}

fn find_column(headers: &StringRecord, column: Column, origin: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column.name()))
        .ok_or_else(|| VizError::malformed(origin, format!("column '{column}' not found")))
}

fn get_number(
    record: &StringRecord,
    idx: usize,
    column: Column,
    line: u64,
    origin: &Path,
) -> Result<f64> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            VizError::malformed(
                origin,
                format!("line {line}: missing value for column '{column}'"),
            )
        })?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(VizError::malformed(
            origin,
            format!("line {line}: column '{column}' value '{raw}' is not a finite number"),
        )),
    }
}

fn classify(origin: &Path, err: csv::Error) -> VizError {
    if !err.is_io_error() {
        return VizError::malformed(origin, err.to_string());
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => VizError::unavailable(origin, source),
        other => VizError::malformed(origin, format!("{other:?}")),
    }
}
