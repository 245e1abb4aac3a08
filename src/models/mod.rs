pub mod criteria;
pub mod dataset;
pub mod raw;
pub mod station;

pub use criteria::{FilterCriteria, FilterCriteriaBuilder};
pub use dataset::{FilteredDataset, SchemaReport, StationDataset};
pub use raw::RawStation;
pub use station::{StationRecord, StationStatus};
