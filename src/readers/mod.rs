pub mod delimited;
pub mod workbook;

pub use delimited::DelimitedReader;
pub use workbook::WorkbookReader;

use std::path::Path;

use crate::error::{EngineError, Result};
use crate::utils::constants::WORKBOOK_EXTENSIONS;

/// Format-independent product of every reader: declared header names plus
/// row cells, empty cells already collapsed to `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reader family selected from the declared file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Delimited,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext)
                if WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known)) =>
            {
                SourceFormat::Workbook
            }
            _ => SourceFormat::Delimited,
        }
    }
}

/// Read one source file into a raw table
///
/// An unreachable source is fatal; no partial table is ever produced.
pub fn read_source(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(EngineError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    match SourceFormat::from_path(path) {
        SourceFormat::Workbook => WorkbookReader::new().read(path),
        SourceFormat::Delimited => DelimitedReader::new().read(path),
    }
}
