pub mod area;
pub mod coercion;
pub mod constants;
pub mod filename;
pub mod progress;

pub use area::simplify_area_classification;
pub use coercion::{parse_date_lenient, parse_float_lenient};
pub use constants::*;
pub use filename::generate_default_export_filename;
pub use progress::ProgressReporter;
