use std::collections::HashMap;

use tracing::warn;

use crate::models::{RawStation, SchemaReport};
use crate::readers::RawTable;
use crate::utils::constants::{
    COL_ACTIVITY_BEGIN, COL_ACTIVITY_END, COL_ALTITUDE, COL_ALTITUDE_UNIT,
    COL_AREA_CLASSIFICATION, COL_BELONGS_TO, COL_EU_STATION_CODE, COL_GMLID, COL_LATITUDE,
    COL_LOCAL_ID, COL_LONGITUDE, COL_MUNICIPALITY, COL_NAME, COL_NAMESPACE,
    COL_NATL_STATION_CODE, COL_SRS_NAME, COL_VERSION,
};

/// Maps raw tables onto the expected station schema
///
/// Missing expected columns are reported, never fatal; extra columns are
/// ignored. Rows are mapped one for one, in source order.
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, table: &RawTable) -> (Vec<RawStation>, SchemaReport) {
        let report = SchemaReport::new(table.columns.iter().cloned());
        if !report.is_complete() {
            warn!(
                missing = ?report.missing_columns(),
                "source schema is incomplete"
            );
        }

        let index = column_index(&table.columns);
        let stations = table
            .rows
            .iter()
            .map(|row| map_row(row, &index))
            .collect();

        (stations, report)
    }
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First occurrence wins for duplicated header names
fn column_index(columns: &[String]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(columns.len());
    for (position, name) in columns.iter().enumerate() {
        index.entry(name.as_str()).or_insert(position);
    }
    index
}

fn map_row(row: &[Option<String>], index: &HashMap<&str, usize>) -> RawStation {
    let field = |name: &str| -> Option<String> {
        index
            .get(name)
            .and_then(|&position| row.get(position).cloned().flatten())
    };

    RawStation {
        gmlid: field(COL_GMLID),
        local_id: field(COL_LOCAL_ID),
        namespace: field(COL_NAMESPACE),
        version: field(COL_VERSION),
        natl_station_code: field(COL_NATL_STATION_CODE),
        name: field(COL_NAME),
        municipality: field(COL_MUNICIPALITY),
        eu_station_code: field(COL_EU_STATION_CODE),
        activity_begin: field(COL_ACTIVITY_BEGIN),
        activity_end: field(COL_ACTIVITY_END),
        latitude: field(COL_LATITUDE),
        longitude: field(COL_LONGITUDE),
        srs_name: field(COL_SRS_NAME),
        altitude: field(COL_ALTITUDE),
        altitude_unit: field(COL_ALTITUDE_UNIT),
        area_classification: field(COL_AREA_CLASSIFICATION),
        belongs_to: field(COL_BELONGS_TO),
    }
}
