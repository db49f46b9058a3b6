//! CSV reader: uploaded bytes to raw rows.

use super::error::ImportError;

/// Byte-order mark Excel prepends to UTF-8 CSV exports.
const UTF8_BOM: &str = "\u{FEFF}";

/// Minimum number of rows (header + one data row) an import needs.
pub const MIN_ROWS: usize = 2;

/// One CSV record, cells in file order.
///
/// `index` is the record's position in the file: the header is row 0 and the
/// first data row is row 1. Fully blank records are dropped by the reader
/// but do not shift the indices of the rows after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub index: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        Self { index, cells }
    }

    /// Cell at `column`, or `""` when the row is shorter than the header.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// Parse an uploaded CSV payload into rows.
///
/// Fails with [`ImportError::UnreadableFile`] when the payload is not UTF-8
/// or not valid CSV, and with [`ImportError::EmptyFile`] when fewer than
/// [`MIN_ROWS`] non-blank rows remain.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ImportError::UnreadableFile(format!("file is not UTF-8 encoded ({e})")))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ImportError::UnreadableFile(e.to_string()))?;
        let row = RawRow::new(index, record.iter().map(str::to_string).collect());
        if !row.is_blank() {
            rows.push(row);
        }
    }

    if rows.len() < MIN_ROWS {
        return Err(ImportError::EmptyFile);
    }
    Ok(rows)
}
