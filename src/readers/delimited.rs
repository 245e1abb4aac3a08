use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;

use crate::error::{EngineError, Result};
use crate::readers::RawTable;
use crate::utils::constants::SOURCE_DELIMITER;

/// Reader for the semicolon separated national station exports
///
/// Input is decoded as UTF-8 when possible, falling back to Windows-1252;
/// the national exports predate consistent UTF-8 and accented names are
/// routinely Latin-1 encoded.
pub struct DelimitedReader {
    delimiter: u8,
}

impl DelimitedReader {
    pub fn new() -> Self {
        Self {
            delimiter: SOURCE_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read(&self, path: &Path) -> Result<RawTable> {
        let bytes = fs::read(path).map_err(|err| EngineError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let content = decode_bytes(&bytes);

        if content.trim().is_empty() {
            return Err(EngineError::InvalidFormat(format!(
                "no columns to parse from '{}'",
                path.display()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(content.as_bytes());

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(cell_to_value).collect());
        }

        Ok(RawTable { columns, rows })
    }
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

fn cell_to_value(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_semicolon_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "GMLID;Name;Municipality")?;
        writeln!(temp_file, "STA-01;Centre;PARIS")?;
        writeln!(temp_file, "STA-02;;LYON")?;

        let table = DelimitedReader::new().read(temp_file.path())?;

        assert_eq!(table.columns, vec!["GMLID", "Name", "Municipality"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], Some("Centre".to_string()));
        assert_eq!(table.rows[1][1], None);
        assert_eq!(table.rows[1][2], Some("LYON".to_string()));

        Ok(())
    }

    #[test]
    fn test_windows_1252_fallback() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        // "Orléans" with a Latin-1 e-acute, not valid UTF-8
        temp_file.write_all(b"Name;Municipality\nCentre;ORL\xC9ANS\n")?;

        let table = DelimitedReader::new().read(temp_file.path())?;

        assert_eq!(table.rows[0][1], Some("ORL\u{c9}ANS".to_string()));

        Ok(())
    }

    #[test]
    fn test_utf8_kept_as_is() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Name;Municipality")?;
        writeln!(temp_file, "Centre;ORLÉANS")?;

        let table = DelimitedReader::new().read(temp_file.path())?;

        assert_eq!(table.rows[0][1], Some("ORLÉANS".to_string()));

        Ok(())
    }

    #[test]
    fn test_custom_delimiter() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Name,Municipality")?;
        writeln!(temp_file, "Centre,PARIS")?;

        let table = DelimitedReader::with_delimiter(b',').read(temp_file.path())?;

        assert_eq!(table.columns, vec!["Name", "Municipality"]);
        assert_eq!(table.rows[0][1], Some("PARIS".to_string()));

        Ok(())
    }

    #[test]
    fn test_whitespace_cells_become_absent() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Name;Altitude")?;
        writeln!(temp_file, "Centre;   ")?;

        let table = DelimitedReader::new().read(temp_file.path())?;

        assert_eq!(table.rows[0][1], None);

        Ok(())
    }

    #[test]
    fn test_empty_file_is_invalid() -> Result<()> {
        let temp_file = NamedTempFile::new()?;

        let result = DelimitedReader::new().read(temp_file.path());
        assert!(matches!(result, Err(EngineError::InvalidFormat(_))));

        Ok(())
    }

    #[test]
    fn test_short_rows_allowed() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Name;Municipality;Altitude")?;
        writeln!(temp_file, "Centre;PARIS")?;

        let table = DelimitedReader::new().read(temp_file.path())?;

        assert_eq!(table.rows[0].len(), 2);

        Ok(())
    }
}
