//! Opaque GeoJSON document produced by the store

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::value::RawValue;

const EMPTY_COLLECTION: &str = r#"{"type":"FeatureCollection","features":[]}"#;

/// A serialized GeoJSON `FeatureCollection`.
///
/// The text is syntax-checked once on construction and then passed through
/// untouched; nothing here looks inside the features.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct FeatureCollection(Box<RawValue>);

impl FeatureCollection {
    /// Wrap a JSON document returned by the store.
    pub fn from_json(json: String) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json).map(Self)
    }

    /// `{"type":"FeatureCollection","features":[]}`
    pub fn empty() -> Self {
        Self(RawValue::from_string(EMPTY_COLLECTION.to_owned()).expect("static JSON is valid"))
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn into_string(self) -> String {
        self.0.get().to_owned()
    }
}

impl IntoResponse for FeatureCollection {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, "application/json")],
            self.into_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_passes_through_verbatim() {
        let doc = r#"{"type":"FeatureCollection","features":[{"id":7,"type":"Feature"}]}"#;
        let fc = FeatureCollection::from_json(doc.to_owned()).unwrap();
        assert_eq!(fc.as_str(), doc);
        assert_eq!(serde_json::to_string(&fc).unwrap(), doc);
    }

    #[test]
    fn invalid_json_rejected() {
        assert!(FeatureCollection::from_json("{\"type\":".to_owned()).is_err());
    }

    #[test]
    fn empty_collection_shape() {
        let value: serde_json::Value =
            serde_json::from_str(FeatureCollection::empty().as_str()).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn response_is_json() {
        let response = FeatureCollection::empty().into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
