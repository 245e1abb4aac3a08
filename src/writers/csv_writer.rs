use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::models::StationRecord;
use crate::utils::constants::{EXPECTED_COLUMNS, SOURCE_DELIMITER};

/// Column names appended after the source columns in an export
const DERIVED_COLUMNS: [&str; 4] = ["year_begin", "year_end", "status", "area_class_simple"];

/// Writes station records back out as delimited text
///
/// The export carries the seventeen source columns followed by the derived
/// columns. Absent values become empty cells; dates are ISO formatted.
/// The exporter only ever creates new files, never the source.
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            delimiter: SOURCE_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_records(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        let header: Vec<&str> = EXPECTED_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS.iter())
            .copied()
            .collect();
        writer.write_record(&header)?;

        for record in records {
            writer.write_record(record_row(record))?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn record_row(record: &StationRecord) -> Vec<String> {
    vec![
        text(&record.gmlid),
        text(&record.local_id),
        text(&record.namespace),
        text(&record.version),
        text(&record.natl_station_code),
        text(&record.name),
        text(&record.municipality),
        text(&record.eu_station_code),
        date(record.activity_begin),
        date(record.activity_end),
        float(record.latitude),
        float(record.longitude),
        text(&record.srs_name),
        float(record.altitude),
        text(&record.altitude_unit),
        text(&record.area_classification),
        text(&record.belongs_to),
        year(record.year_begin),
        year(record.year_end),
        record.status.to_string(),
        text(&record.area_class_simple),
    ]
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: Option<chrono::NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn float(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_default()
}
