//! vesta-csv
//!
//! Price source that reads one CSV file per ticker from a directory tree:
//! `<root>/<ticker>/data.csv`, with `<ticker>` in its normalized (lowercase)
//! form. Files need a `Date` column and a column whose header contains
//! `close` (`Close`, `Close/Last`, `Adj Close`, ...); other columns are ignored
//! and rows may be in any order.
#![warn(missing_docs)]

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use vesta_core::{PriceSource, RawPriceRow, Ticker, VestaError};

const NAME: &str = "vesta-csv";

/// Default history file name inside each ticker directory.
pub const DEFAULT_FILE_NAME: &str = "data.csv";

/// File-backed [`PriceSource`].
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    root: PathBuf,
    file_name: String,
}

impl CsvPriceSource {
    /// Source reading `<root>/<ticker>/data.csv`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Override the per-ticker file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Root directory holding one sub-directory per ticker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the history file for `ticker`.
    #[must_use]
    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.root.join(ticker.as_str()).join(&self.file_name)
    }
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self, ticker: &Ticker) -> Result<Vec<RawPriceRow>, VestaError> {
        let path = self.path_for(ticker);
        tracing::debug!(ticker = %ticker, path = %path.display(), "reading price history");
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VestaError::not_found(format!(
                "price history for {ticker} at {}",
                path.display()
            )),
            _ => VestaError::source(NAME, format!("{}: {e}", path.display())),
        })?;
        read_rows(file, ticker)
    }
}

/// Extract date/close cells from CSV text.
///
/// The date column is the one whose trimmed header equals `date`
/// (case-insensitive); the close column is the first whose header contains
/// `close`. Blank lines are skipped.
///
/// # Errors
/// - `VestaError::Malformed` naming the missing column and ticker if either
///   column is absent.
/// - `VestaError::Source` if the CSV text cannot be decoded.
pub fn read_rows<R: Read>(reader: R, ticker: &Ticker) -> Result<Vec<RawPriceRow>, VestaError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let (date_idx, close_idx) = locate_columns(&headers, ticker)?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        // Header is line 1.
        let line = record
            .position()
            .and_then(|p| usize::try_from(p.line()).ok())
            .unwrap_or(idx + 2);
        rows.push(RawPriceRow::new(
            line,
            record.get(date_idx).unwrap_or_default(),
            record.get(close_idx).unwrap_or_default(),
        ));
    }
    Ok(rows)
}

fn locate_columns(headers: &StringRecord, ticker: &Ticker) -> Result<(usize, usize), VestaError> {
    let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let date_idx = names.iter().position(|h| h == "date");
    let close_idx = names.iter().position(|h| h.contains("close"));
    match (date_idx, close_idx) {
        (Some(d), Some(c)) => Ok((d, c)),
        (None, _) => Err(VestaError::malformed(
            ticker.as_str(),
            format!("no date column found; columns={:?}", headers.iter().collect::<Vec<_>>()),
        )),
        (_, None) => Err(VestaError::malformed(
            ticker.as_str(),
            format!("no close column found; columns={:?}", headers.iter().collect::<Vec<_>>()),
        )),
    }
}

fn csv_error(e: csv::Error) -> VestaError {
    VestaError::source(NAME, e.to_string())
}
