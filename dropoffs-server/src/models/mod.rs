//! Domain models with validation at construction

mod coordinate;
mod feature_collection;
mod table_name;
mod validation;

pub use coordinate::Coordinate;
pub use feature_collection::FeatureCollection;
pub use table_name::{TableName, DEFAULT_TABLE};
pub use validation::ValidationError;
