use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{EngineError, Result};
use crate::readers::RawTable;

/// Reader for the first worksheet of an Excel station export
pub struct WorkbookReader;

impl WorkbookReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<RawTable> {
        let mut workbook =
            open_workbook_auto(path).map_err(|err| EngineError::SourceUnavailable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        // A workbook without sheets or rows yields an empty table, unlike
        // the delimited path where headerless input is a format error.
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Ok(RawTable::default()),
        };

        let mut rows_iter = range.rows();
        let columns: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| {
                    calamine::DataType::as_string(cell)
                        .unwrap_or_else(|| cell.to_string())
                        .trim()
                        .to_string()
                })
                .collect(),
            None => return Ok(RawTable::default()),
        };

        let rows = rows_iter
            .map(|row| row.iter().map(cell_to_value).collect())
            .collect();

        Ok(RawTable { columns, rows })
    }
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one worksheet cell to the reader's common string form
///
/// Datetime cells are rendered as ISO-8601 so the downstream date coercion
/// treats workbook and delimited sources alike.
fn cell_to_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => calamine::DataType::as_datetime(cell)
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
    }
}
