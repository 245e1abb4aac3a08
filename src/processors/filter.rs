use std::collections::HashSet;

use crate::models::{FilterCriteria, FilteredDataset, StationDataset, StationRecord, StationStatus};

/// Evaluates filter criteria over a canonical dataset
///
/// Families combine with AND; membership within a family is OR. Absent
/// values are excluded by active categorical families and included by
/// active range families.
pub struct StationFilter;

impl StationFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, dataset: &StationDataset, criteria: &FilterCriteria) -> FilteredDataset {
        let records = dataset
            .records()
            .iter()
            .filter(|record| matches(record, criteria))
            .cloned()
            .collect();

        FilteredDataset::new(records)
    }
}

impl Default for StationFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(record: &StationRecord, criteria: &FilterCriteria) -> bool {
    matches_set(criteria.municipalities(), record.municipality.as_deref())
        && matches_set(criteria.area_classes(), record.area_class_simple.as_deref())
        && matches_status(criteria.statuses(), record.status)
        && matches_range(criteria.year_range(), record.year_begin)
        && matches_range(criteria.altitude_range(), record.altitude)
}

fn matches_set(selected: &HashSet<String>, value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    // An absent value cannot be a member of the selection
    value.is_some_and(|v| selected.contains(v))
}

fn matches_status(selected: &HashSet<StationStatus>, status: StationStatus) -> bool {
    selected.is_empty() || selected.contains(&status)
}

fn matches_range<T: PartialOrd>(range: Option<(T, T)>, value: Option<T>) -> bool {
    match (range, value) {
        (None, _) => true,
        // An absent value is not excludable by a range
        (Some(_), None) => true,
        (Some((min, max)), Some(v)) => v >= min && v <= max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaReport;

    fn record(
        municipality: Option<&str>,
        area: Option<&str>,
        status: StationStatus,
        year: Option<i32>,
        altitude: Option<f64>,
    ) -> StationRecord {
        StationRecord {
            municipality: municipality.map(String::from),
            area_class_simple: area.map(String::from),
            status,
            year_begin: year,
            altitude,
            ..Default::default()
        }
    }

    fn dataset(records: Vec<StationRecord>) -> StationDataset {
        StationDataset::new(records, SchemaReport::default())
    }

    #[test]
    fn test_unconstrained_criteria_return_every_record() {
        let dataset = dataset(vec![
            record(Some("PARIS"), None, StationStatus::Active, None, None),
            record(None, None, StationStatus::Unknown, None, None),
        ]);

        let filtered = StationFilter::new().apply(&dataset, &FilterCriteria::unconstrained());

        assert_eq!(filtered.records(), dataset.records());
    }

    #[test]
    fn test_municipality_membership_is_or() {
        let dataset = dataset(vec![
            record(Some("PARIS"), None, StationStatus::Active, None, None),
            record(Some("LYON"), None, StationStatus::Active, None, None),
            record(Some("NICE"), None, StationStatus::Active, None, None),
        ]);
        let criteria = FilterCriteria::builder()
            .municipalities(["PARIS", "LYON"])
            .build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_absent_value_excluded_by_active_categorical_family() {
        let dataset = dataset(vec![
            record(Some("PARIS"), None, StationStatus::Active, None, None),
            record(None, None, StationStatus::Active, None, None),
        ]);
        let criteria = FilterCriteria::builder().municipalities(["PARIS"]).build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].municipality.as_deref(), Some("PARIS"));
    }

    #[test]
    fn test_absent_value_included_by_active_range_family() {
        let dataset = dataset(vec![
            record(None, None, StationStatus::Active, None, Some(500.0)),
            record(None, None, StationStatus::Active, None, None),
            record(None, None, StationStatus::Active, None, Some(40.0)),
        ]);
        let criteria = FilterCriteria::builder().altitude_range(0.0, 100.0).build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0].altitude, None);
        assert_eq!(filtered.records()[1].altitude, Some(40.0));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let dataset = dataset(vec![
            record(None, None, StationStatus::Active, Some(1990), None),
            record(None, None, StationStatus::Active, Some(2000), None),
            record(None, None, StationStatus::Active, Some(2001), None),
        ]);
        let criteria = FilterCriteria::builder().year_range(1990, 2000).build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_families_combine_with_and() {
        let dataset = dataset(vec![
            record(
                Some("PARIS"),
                Some("urban"),
                StationStatus::Active,
                Some(1995),
                None,
            ),
            record(
                Some("PARIS"),
                Some("rural"),
                StationStatus::Active,
                Some(1995),
                None,
            ),
            record(
                Some("LYON"),
                Some("urban"),
                StationStatus::Active,
                Some(1995),
                None,
            ),
        ]);
        let criteria = FilterCriteria::builder()
            .municipalities(["PARIS"])
            .area_classes(["urban"])
            .build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_status_family() {
        let dataset = dataset(vec![
            record(None, None, StationStatus::Active, None, None),
            record(None, None, StationStatus::Inactive, None, None),
            record(None, None, StationStatus::Unknown, None, None),
        ]);
        let criteria = FilterCriteria::builder()
            .statuses([StationStatus::Inactive, StationStatus::Unknown])
            .build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_zero_matches_is_a_value() {
        let dataset = dataset(vec![record(
            Some("PARIS"),
            None,
            StationStatus::Active,
            None,
            None,
        )]);
        let criteria = FilterCriteria::builder()
            .municipalities(["NO SUCH PLACE"])
            .build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        assert!(filtered.is_empty());
        assert_eq!(filtered.len(), 0);
    }

    #[test]
    fn test_source_order_preserved() {
        let dataset = dataset(vec![
            record(Some("C"), None, StationStatus::Active, None, None),
            record(Some("A"), None, StationStatus::Active, None, None),
            record(Some("B"), None, StationStatus::Active, None, None),
        ]);
        let criteria = FilterCriteria::builder()
            .municipalities(["A", "B", "C"])
            .build();

        let filtered = StationFilter::new().apply(&dataset, &criteria);

        let order: Vec<_> = filtered
            .records()
            .iter()
            .map(|r| r.municipality.as_deref())
            .collect();
        assert_eq!(order, vec![Some("C"), Some("A"), Some("B")]);
    }
}
