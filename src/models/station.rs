use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Operational status derived from the activity end date
///
/// `Unknown` is reserved for sources that do not declare the end date
/// column at all; a declared column with an empty cell means the station
/// is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    Active,
    Inactive,
    Unknown,
}

impl Default for StationStatus {
    fn default() -> Self {
        StationStatus::Unknown
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationStatus::Active => write!(f, "Active"),
            StationStatus::Inactive => write!(f, "Inactive"),
            StationStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for StationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(StationStatus::Active),
            "inactive" => Ok(StationStatus::Inactive),
            "unknown" => Ok(StationStatus::Unknown),
            other => Err(format!(
                "Invalid station status: '{}' (expected active, inactive or unknown)",
                other
            )),
        }
    }
}

/// Canonical station record: typed source fields plus derived fields
///
/// All source-backed fields are explicitly optional; consumers can always
/// distinguish "value absent" from any sentinel. Derived fields are filled
/// by the field deriver and never read back from a source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    pub gmlid: Option<String>,
    pub local_id: Option<String>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub natl_station_code: Option<String>,
    pub name: Option<String>,
    pub municipality: Option<String>,
    pub eu_station_code: Option<String>,

    pub activity_begin: Option<NaiveDate>,
    pub activity_end: Option<NaiveDate>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub srs_name: Option<String>,
    pub altitude: Option<f64>,
    pub altitude_unit: Option<String>,
    pub area_classification: Option<String>,
    pub belongs_to: Option<String>,

    pub year_begin: Option<i32>,
    pub year_end: Option<i32>,
    pub status: StationStatus,
    pub area_class_simple: Option<String>,
}

impl StationRecord {
    pub fn is_active(&self) -> bool {
        self.status == StationStatus::Active
    }

    pub fn has_known_status(&self) -> bool {
        self.status != StationStatus::Unknown
    }

    /// Days from activity begin to activity end, open intervals closed at
    /// the given reference date
    ///
    /// `None` without a begin date; may be negative when the source carries
    /// an end before its begin.
    pub fn lifetime_days(&self, reference_date: NaiveDate) -> Option<i64> {
        let begin = self.activity_begin?;
        let end = self.activity_end.unwrap_or(reference_date);
        Some((end - begin).num_days())
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_validation() {
        let record = StationRecord {
            name: Some("Paris Centre".to_string()),
            latitude: Some(48.8566),
            longitude: Some(2.3522),
            ..Default::default()
        };

        assert!(record.validate().is_ok());
        assert!(record.has_coordinates());
    }

    #[test]
    fn test_invalid_coordinates() {
        let record = StationRecord {
            latitude: Some(91.0),
            ..Default::default()
        };

        assert!(record.validate().is_err());
    }

    #[test]
    fn test_absent_coordinates_pass_validation() {
        let record = StationRecord::default();
        assert!(record.validate().is_ok());
        assert!(!record.has_coordinates());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<StationStatus>(), Ok(StationStatus::Active));
        assert_eq!(
            "Inactive".parse::<StationStatus>(),
            Ok(StationStatus::Inactive)
        );
        assert_eq!(
            "UNKNOWN".parse::<StationStatus>(),
            Ok(StationStatus::Unknown)
        );
        assert!("retired".parse::<StationStatus>().is_err());
    }

    #[test]
    fn test_status_display_round_trip() {
        for status in [
            StationStatus::Active,
            StationStatus::Inactive,
            StationStatus::Unknown,
        ] {
            assert_eq!(status.to_string().parse::<StationStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_lifetime_days() {
        let reference = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let closed = StationRecord {
            activity_begin: NaiveDate::from_ymd_opt(2000, 1, 1),
            activity_end: NaiveDate::from_ymd_opt(2010, 1, 1),
            ..Default::default()
        };
        assert_eq!(closed.lifetime_days(reference), Some(3653));

        let open = StationRecord {
            activity_begin: NaiveDate::from_ymd_opt(2019, 1, 1),
            ..Default::default()
        };
        assert_eq!(open.lifetime_days(reference), Some(365));

        let unknown_begin = StationRecord::default();
        assert_eq!(unknown_begin.lifetime_days(reference), None);
    }
}
