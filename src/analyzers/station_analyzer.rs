use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{FilteredDataset, StationDataset, StationRecord};
use crate::utils::constants::{
    COL_ACTIVITY_BEGIN, COL_ACTIVITY_END, COL_ALTITUDE, COL_AREA_CLASSIFICATION, COL_LATITUDE,
    COL_LONGITUDE, DAYS_PER_YEAR, QUALITY_COLUMNS, TOP_MUNICIPALITY_LIMIT,
};

/// One label with its record count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

/// Number of stations opened in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Every KPI and grouping computed over one filtered view
///
/// Cardinalities are plain counts; ratio and central-tendency metrics are
/// `None` when their input population is empty, which is distinct from
/// any numeric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub station_count: usize,
    pub distinct_municipalities: usize,
    pub active_share: Option<f64>,
    pub mean_altitude: Option<f64>,
    pub median_lifetime_years: Option<f64>,
    pub status_counts: Vec<GroupCount>,
    pub area_class_counts: Vec<GroupCount>,
    pub top_municipalities: Vec<GroupCount>,
    pub stations_by_start_year: Vec<YearCount>,
}

impl AggregationResult {
    pub fn summary(&self) -> String {
        let active = match self.active_share {
            Some(share) => format!("{:.1}%", share),
            None => "n/a".to_string(),
        };
        let altitude = match self.mean_altitude {
            Some(mean) => format!("{:.1} m", mean),
            None => "n/a".to_string(),
        };
        let lifetime = match self.median_lifetime_years {
            Some(median) => format!("{:.1} years", median),
            None => "n/a".to_string(),
        };

        format!(
            "Stations: {} ({} municipalities)\n\
            Active share: {}\n\
            Mean altitude: {}\n\
            Median lifetime: {}",
            self.station_count, self.distinct_municipalities, active, altitude, lifetime
        )
    }
}

/// Share of absent values for one tracked column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    pub column: String,
    pub missing_rate: f64,
}

/// Missing-value rates over the unfiltered canonical dataset
///
/// Columns the source never declared are omitted; a rate for them would
/// not describe the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityReport {
    pub columns: Vec<ColumnQuality>,
}

/// Computes aggregations over filtered views and quality rates over the
/// canonical dataset
///
/// The reference date closes open activity intervals; injecting a fixed
/// one makes lifetime figures reproducible.
pub struct StationAnalyzer {
    reference_date: NaiveDate,
}

impl StationAnalyzer {
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
        }
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn aggregate(&self, filtered: &FilteredDataset) -> AggregationResult {
        let records = filtered.records();

        let distinct_municipalities = records
            .iter()
            .filter_map(|r| r.municipality.as_deref())
            .collect::<HashSet<_>>()
            .len();

        let status_labels: Vec<String> = records.iter().map(|r| r.status.to_string()).collect();
        let status_counts = group_counts(status_labels.iter().map(|label| Some(label.as_str())));

        let area_class_counts =
            group_counts(records.iter().map(|r| r.area_class_simple.as_deref()));

        let mut top_municipalities =
            group_counts(records.iter().map(|r| r.municipality.as_deref()));
        top_municipalities.truncate(TOP_MUNICIPALITY_LIMIT);

        AggregationResult {
            station_count: records.len(),
            distinct_municipalities,
            active_share: self.active_share(records),
            mean_altitude: mean(records.iter().filter_map(|r| r.altitude)),
            median_lifetime_years: self.median_lifetime_years(records),
            status_counts,
            area_class_counts,
            top_municipalities,
            stations_by_start_year: year_counts(records),
        }
    }

    pub fn missing_value_rates(&self, dataset: &StationDataset) -> DataQualityReport {
        if dataset.is_empty() {
            return DataQualityReport { columns: vec![] };
        }

        let total = dataset.len() as f64;
        let columns = QUALITY_COLUMNS
            .iter()
            .filter(|column| dataset.schema().has_column(column))
            .map(|column| {
                let absent = dataset
                    .records()
                    .iter()
                    .filter(|record| column_is_absent(record, column))
                    .count();
                ColumnQuality {
                    column: column.to_string(),
                    missing_rate: absent as f64 / total,
                }
            })
            .collect();

        DataQualityReport { columns }
    }

    /// Percent Active among records with a known status
    fn active_share(&self, records: &[StationRecord]) -> Option<f64> {
        let known = records.iter().filter(|r| r.has_known_status()).count();
        if known == 0 {
            return None;
        }
        let active = records.iter().filter(|r| r.is_active()).count();
        Some(active as f64 / known as f64 * 100.0)
    }

    fn median_lifetime_years(&self, records: &[StationRecord]) -> Option<f64> {
        let mut lifetimes: Vec<f64> = records
            .iter()
            .filter_map(|r| r.lifetime_days(self.reference_date))
            .filter(|days| *days >= 0)
            .map(|days| days as f64 / DAYS_PER_YEAR)
            .collect();

        median(&mut lifetimes)
    }
}

impl Default for StationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count occurrences in first-encounter order, then sort by descending
/// count; the stable sort keeps ties in source order
fn group_counts<'a, I>(values: I) -> Vec<GroupCount>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for value in values.flatten() {
        match counts.entry(value) {
            Entry::Occupied(mut entry) => *entry.get_mut() += 1,
            Entry::Vacant(entry) => {
                entry.insert(1);
                order.push(value);
            }
        }
    }

    let mut groups: Vec<GroupCount> = order
        .into_iter()
        .map(|label| GroupCount {
            count: counts[label],
            label: label.to_string(),
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

fn year_counts(records: &[StationRecord]) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year_begin) {
        *by_year.entry(year).or_insert(0) += 1;
    }

    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

fn mean<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

fn column_is_absent(record: &StationRecord, column: &str) -> bool {
    match column {
        COL_ACTIVITY_BEGIN => record.activity_begin.is_none(),
        COL_ACTIVITY_END => record.activity_end.is_none(),
        COL_LATITUDE => record.latitude.is_none(),
        COL_LONGITUDE => record.longitude.is_none(),
        COL_ALTITUDE => record.altitude.is_none(),
        COL_AREA_CLASSIFICATION => record.area_classification.is_none(),
        _ => false,
    }
}
