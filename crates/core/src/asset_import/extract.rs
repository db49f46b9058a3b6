//! The extractor abstraction shared by both import formats.

use super::error::{ImportError, RowError};
use super::outcome::RowFailure;
use super::reader::RawRow;
use super::records::ExtractedRow;

/// Result of running an extractor over a whole file.
///
/// `records` and `failures` are each in source order; together they cover
/// every data row exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<R> {
    pub records: Vec<ExtractedRow<R>>,
    pub failures: Vec<RowFailure>,
}

impl<R> Extraction<R> {
    /// Number of data rows the extraction covered.
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Converts raw CSV rows into typed records.
///
/// Implementations validate the header first and abort with an
/// [`ImportError`] if it is unusable. After that each data row is mapped on
/// its own; a bad row becomes a [`RowFailure`] and mapping continues.
pub trait RowExtractor {
    type Record;

    /// Check the header and prepare per-column lookups.
    type Layout;

    fn layout(&self, header: &RawRow) -> Result<Self::Layout, ImportError>;

    fn map_row(&self, layout: &Self::Layout, row: &RawRow) -> Result<Self::Record, RowError>;

    /// Run the extractor over `rows`, whose first element is the header.
    fn extract(&self, rows: &[RawRow]) -> Result<Extraction<Self::Record>, ImportError> {
        let (header, data) = rows.split_first().ok_or(ImportError::EmptyFile)?;
        if data.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        let layout = self.layout(header)?;

        let mut records = Vec::with_capacity(data.len());
        let mut failures = Vec::new();
        for row in data {
            match self.map_row(&layout, row) {
                Ok(record) => records.push(ExtractedRow {
                    row_index: row.index,
                    record,
                }),
                Err(err) => failures.push(RowFailure::new(row.index, &err)),
            }
        }
        Ok(Extraction { records, failures })
    }
}

/// Trimmed cell value, or `None` when blank.
pub(crate) fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse an optional monetary value. Accepts a leading currency symbol and
/// thousands separators (`$1,299.50`).
pub(crate) fn parse_valuation(column: &str, cell: &str) -> Result<Option<f64>, RowError> {
    let Some(raw) = non_blank(cell) else {
        return Ok(None);
    };
    let cleaned: String = raw
        .trim_start_matches(|c| matches!(c, '$' | '€' | '£'))
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        Ok(_) => Err(RowError::invalid(column, &raw, "valuation must be a positive number")),
        Err(_) => Err(RowError::invalid(column, &raw, "not a number")),
    }
}
