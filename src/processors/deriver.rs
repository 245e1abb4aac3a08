use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{RawStation, SchemaReport, StationRecord, StationStatus};
use crate::utils::area::simplify_area_classification;
use crate::utils::coercion::{parse_date_lenient, parse_float_lenient};
use crate::utils::constants::COL_ACTIVITY_END;

/// Turns raw string rows into typed canonical records
///
/// Derivation is total: a value that fails to coerce becomes absent and
/// the record survives. Only the batch-level failure count is surfaced,
/// as a debug event.
pub struct FieldDeriver;

impl FieldDeriver {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, raw: Vec<RawStation>, schema: &SchemaReport) -> Vec<StationRecord> {
        let end_column_declared = schema.has_column(COL_ACTIVITY_END);
        let mut failed_coercions = 0usize;

        let records: Vec<StationRecord> = raw
            .into_iter()
            .map(|station| derive_record(station, end_column_declared, &mut failed_coercions))
            .collect();

        if failed_coercions > 0 {
            debug!(failed_coercions, "unparseable field values coerced to absent");
        }

        records
    }
}

impl Default for FieldDeriver {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_record(
    raw: RawStation,
    end_column_declared: bool,
    failures: &mut usize,
) -> StationRecord {
    let activity_begin = coerce_date(raw.activity_begin.as_deref(), failures);
    let activity_end = coerce_date(raw.activity_end.as_deref(), failures);
    let latitude = coerce_float(raw.latitude.as_deref(), failures);
    let longitude = coerce_float(raw.longitude.as_deref(), failures);
    let altitude = coerce_float(raw.altitude.as_deref(), failures);

    // Unknown is reserved for sources that never declared the end date
    // column; a declared column with an absent value means still active.
    let status = if !end_column_declared {
        StationStatus::Unknown
    } else if activity_end.is_some() {
        StationStatus::Inactive
    } else {
        StationStatus::Active
    };

    let area_class_simple = raw
        .area_classification
        .as_deref()
        .map(simplify_area_classification);

    StationRecord {
        gmlid: raw.gmlid,
        local_id: raw.local_id,
        namespace: raw.namespace,
        version: raw.version,
        natl_station_code: raw.natl_station_code,
        name: raw.name,
        municipality: raw.municipality,
        eu_station_code: raw.eu_station_code,
        activity_begin,
        activity_end,
        latitude,
        longitude,
        srs_name: raw.srs_name,
        altitude,
        altitude_unit: raw.altitude_unit,
        area_classification: raw.area_classification,
        belongs_to: raw.belongs_to,
        year_begin: activity_begin.map(|d| d.year()),
        year_end: activity_end.map(|d| d.year()),
        status,
        area_class_simple,
    }
}

fn coerce_date(value: Option<&str>, failures: &mut usize) -> Option<NaiveDate> {
    let value = value?;
    let parsed = parse_date_lenient(value);
    if parsed.is_none() {
        *failures += 1;
    }
    parsed
}

fn coerce_float(value: Option<&str>, failures: &mut usize) -> Option<f64> {
    let value = value?;
    let parsed = parse_float_lenient(value);
    if parsed.is_none() {
        *failures += 1;
    }
    parsed
}
