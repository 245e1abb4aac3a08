use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::station::{StationRecord, StationStatus};
use crate::utils::constants::EXPECTED_COLUMNS;

/// Outcome of checking a source's declared columns against the expected
/// schema
///
/// An incomplete schema is a warning, never an error: the records built
/// from such a source simply carry absent values for the missing columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaReport {
    declared: BTreeSet<String>,
    missing: Vec<String>,
}

impl SchemaReport {
    pub fn new<I, S>(declared_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared: BTreeSet<String> = declared_columns.into_iter().map(Into::into).collect();
        let missing = EXPECTED_COLUMNS
            .iter()
            .filter(|name| !declared.contains(**name))
            .map(|name| name.to_string())
            .collect();

        Self { declared, missing }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    pub fn missing_columns(&self) -> &[String] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// The canonical dataset: derived records plus the schema they came from
///
/// Immutable after construction and shared behind `Arc` by the loader;
/// every query runs against this snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDataset {
    records: Vec<StationRecord>,
    schema: SchemaReport,
}

impl StationDataset {
    pub fn new(records: Vec<StationRecord>, schema: SchemaReport) -> Self {
        Self { records, schema }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn schema(&self) -> &SchemaReport {
        &self.schema
    }

    /// Sorted distinct municipality names, absent values skipped
    pub fn distinct_municipalities(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.municipality.as_deref())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Sorted distinct simplified area classifications, absent values
    /// skipped
    pub fn distinct_area_classes(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.area_class_simple.as_deref())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Statuses present in the dataset, in Active, Inactive, Unknown order
    pub fn observed_statuses(&self) -> Vec<StationStatus> {
        [
            StationStatus::Active,
            StationStatus::Inactive,
            StationStatus::Unknown,
        ]
        .into_iter()
        .filter(|status| self.records.iter().any(|r| r.status == *status))
        .collect()
    }

    /// Min and max start year over records that have one
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year_begin);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(min, max), year| {
            (min.min(year), max.max(year))
        });
        Some((min, max))
    }

    /// Min and max altitude over records that have one
    pub fn altitude_bounds(&self) -> Option<(f64, f64)> {
        let mut altitudes = self.records.iter().filter_map(|r| r.altitude);
        let first = altitudes.next()?;
        let (min, max) = altitudes.fold((first, first), |(min, max), alt| {
            (min.min(alt), max.max(alt))
        });
        Some((min, max))
    }
}

/// An ordered view of the records matched by one criteria evaluation
///
/// Zero matches is a legitimate outcome, reported through `is_empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredDataset {
    records: Vec<StationRecord>,
}

impl FilteredDataset {
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        municipality: Option<&str>,
        area: Option<&str>,
        year: Option<i32>,
        altitude: Option<f64>,
    ) -> StationRecord {
        StationRecord {
            municipality: municipality.map(String::from),
            area_class_simple: area.map(String::from),
            year_begin: year,
            altitude,
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_report_missing_columns() {
        let report = SchemaReport::new(["GMLID", "Name", "Municipality"]);
        assert!(!report.is_complete());
        assert!(report.has_column("Name"));
        assert!(!report.has_column("ActivityEnd"));
        assert!(report
            .missing_columns()
            .contains(&"ActivityEnd".to_string()));
        assert_eq!(report.missing_columns().len(), EXPECTED_COLUMNS.len() - 3);
    }

    #[test]
    fn test_schema_report_complete() {
        let report = SchemaReport::new(EXPECTED_COLUMNS);
        assert!(report.is_complete());
        assert!(report.missing_columns().is_empty());
    }

    #[test]
    fn test_distinct_municipalities_sorted_and_deduplicated() {
        let dataset = StationDataset::new(
            vec![
                record(Some("LYON"), None, None, None),
                record(Some("PARIS"), None, None, None),
                record(None, None, None, None),
                record(Some("LYON"), None, None, None),
            ],
            SchemaReport::default(),
        );

        assert_eq!(dataset.distinct_municipalities(), vec!["LYON", "PARIS"]);
    }

    #[test]
    fn test_bounds_skip_absent_values() {
        let dataset = StationDataset::new(
            vec![
                record(None, None, Some(1998), Some(120.0)),
                record(None, None, None, None),
                record(None, None, Some(2005), Some(35.0)),
            ],
            SchemaReport::default(),
        );

        assert_eq!(dataset.year_bounds(), Some((1998, 2005)));
        assert_eq!(dataset.altitude_bounds(), Some((35.0, 120.0)));
    }

    #[test]
    fn test_bounds_on_empty_dataset() {
        let dataset = StationDataset::new(vec![], SchemaReport::default());
        assert_eq!(dataset.year_bounds(), None);
        assert_eq!(dataset.altitude_bounds(), None);
        assert!(dataset.observed_statuses().is_empty());
    }
}
