pub mod station_analyzer;

pub use station_analyzer::{
    AggregationResult, ColumnQuality, DataQualityReport, GroupCount, StationAnalyzer, YearCount,
};
