pub mod deriver;
pub mod filter;
pub mod normalizer;
pub mod pipeline;

pub use deriver::FieldDeriver;
pub use filter::StationFilter;
pub use normalizer::SchemaNormalizer;
pub use pipeline::DatasetLoader;
