/// One source row after schema normalization, before any coercion
///
/// Every field is optional: a column missing from the source leaves the
/// field `None` in all rows, and a present column may still carry an empty
/// cell. Values are the untrusted strings the source declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStation {
    pub gmlid: Option<String>,
    pub local_id: Option<String>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub natl_station_code: Option<String>,
    pub name: Option<String>,
    pub municipality: Option<String>,
    pub eu_station_code: Option<String>,
    pub activity_begin: Option<String>,
    pub activity_end: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub srs_name: Option<String>,
    pub altitude: Option<String>,
    pub altitude_unit: Option<String>,
    pub area_classification: Option<String>,
    pub belongs_to: Option<String>,
}
