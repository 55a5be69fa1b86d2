//! Turns the single aggregate scalar into a `FeatureCollection`

use crate::error::QueryError;
use crate::models::FeatureCollection;

/// Adapt the first row's scalar column.
///
/// - no row at all: `QueryError::EmptyResult`
/// - a NULL aggregate (nothing matched): the empty collection
/// - text that is not JSON: `QueryError::Malformed`
pub fn adapt(row: Option<Option<String>>) -> Result<FeatureCollection, QueryError> {
    match row {
        None => Err(QueryError::EmptyResult),
        Some(None) => Ok(FeatureCollection::empty()),
        Some(Some(json)) => FeatureCollection::from_json(json).map_err(QueryError::Malformed),
    }
}
