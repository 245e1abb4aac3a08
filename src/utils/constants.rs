/// Source column names
pub const COL_GMLID: &str = "GMLID";
pub const COL_LOCAL_ID: &str = "LocalId";
pub const COL_NAMESPACE: &str = "Namespace";
pub const COL_VERSION: &str = "Version";
pub const COL_NATL_STATION_CODE: &str = "NatlStationCode";
pub const COL_NAME: &str = "Name";
pub const COL_MUNICIPALITY: &str = "Municipality";
pub const COL_EU_STATION_CODE: &str = "EUStationCode";
pub const COL_ACTIVITY_BEGIN: &str = "ActivityBegin";
pub const COL_ACTIVITY_END: &str = "ActivityEnd";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_SRS_NAME: &str = "SRSName";
pub const COL_ALTITUDE: &str = "Altitude";
pub const COL_ALTITUDE_UNIT: &str = "AltitudeUnit";
pub const COL_AREA_CLASSIFICATION: &str = "AreaClassification";
pub const COL_BELONGS_TO: &str = "BelongsTo";

/// Full expected schema of a station metadata source, in canonical order
pub const EXPECTED_COLUMNS: [&str; 17] = [
    COL_GMLID,
    COL_LOCAL_ID,
    COL_NAMESPACE,
    COL_VERSION,
    COL_NATL_STATION_CODE,
    COL_NAME,
    COL_MUNICIPALITY,
    COL_EU_STATION_CODE,
    COL_ACTIVITY_BEGIN,
    COL_ACTIVITY_END,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_SRS_NAME,
    COL_ALTITUDE,
    COL_ALTITUDE_UNIT,
    COL_AREA_CLASSIFICATION,
    COL_BELONGS_TO,
];

/// Columns whose completeness is tracked in the data quality report
pub const QUALITY_COLUMNS: [&str; 6] = [
    COL_ACTIVITY_BEGIN,
    COL_ACTIVITY_END,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_ALTITUDE,
    COL_AREA_CLASSIFICATION,
];

/// File extensions routed to the workbook reader
pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xls", "xlsx", "xlsm", "xlsb"];

/// Delimiter used by the national station exports
pub const SOURCE_DELIMITER: u8 = b';';

/// Token prefix stripped from area classification URI segments
pub const AREA_CLASS_PREFIX: &str = "areaclassification-";

/// Mean-year divisor for lifetime calculations
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of municipalities reported in the top-municipality ranking
pub const TOP_MUNICIPALITY_LIMIT: usize = 15;
