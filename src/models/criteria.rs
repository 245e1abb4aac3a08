use std::collections::HashSet;

use crate::models::station::StationStatus;

/// Immutable description of one query over the canonical dataset
///
/// Set-valued families are unconstrained when empty; range families are
/// unconstrained when `None`. Range bounds are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    municipalities: HashSet<String>,
    area_classes: HashSet<String>,
    statuses: HashSet<StationStatus>,
    year_range: Option<(i32, i32)>,
    altitude_range: Option<(f64, f64)>,
}

impl FilterCriteria {
    /// Criteria that match every record
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn builder() -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::new()
    }

    pub fn municipalities(&self) -> &HashSet<String> {
        &self.municipalities
    }

    pub fn area_classes(&self) -> &HashSet<String> {
        &self.area_classes
    }

    pub fn statuses(&self) -> &HashSet<StationStatus> {
        &self.statuses
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.year_range
    }

    pub fn altitude_range(&self) -> Option<(f64, f64)> {
        self.altitude_range
    }

    pub fn is_unconstrained(&self) -> bool {
        self.municipalities.is_empty()
            && self.area_classes.is_empty()
            && self.statuses.is_empty()
            && self.year_range.is_none()
            && self.altitude_range.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterCriteriaBuilder {
    criteria: FilterCriteria,
}

impl FilterCriteriaBuilder {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::unconstrained(),
        }
    }

    pub fn municipalities<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.municipalities = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn area_classes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.area_classes = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn statuses<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = StationStatus>,
    {
        self.criteria.statuses = values.into_iter().collect();
        self
    }

    pub fn year_range(mut self, min: i32, max: i32) -> Self {
        self.criteria.year_range = Some((min, max));
        self
    }

    pub fn altitude_range(mut self, min: f64, max: f64) -> Self {
        self.criteria.altitude_range = Some((min, max));
        self
    }

    pub fn build(self) -> FilterCriteria {
        self.criteria
    }
}
