//! Center coordinate for proximity lookups

use serde::Serialize;

use super::ValidationError;

/// A WGS84 position. No range check is applied; the store decides what it
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from already-numeric components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: finite("latitude", latitude)?,
            longitude: finite("longitude", longitude)?,
        })
    }

    /// Parse the `centerLat` / `centerLng` request values.
    ///
    /// # Example
    /// ```
    /// use dropoffs_server::models::Coordinate;
    ///
    /// let c = Coordinate::parse("30.262129", "-97.7468").unwrap();
    /// assert_eq!(c.point(), (-97.7468, 30.262129));
    /// assert!(Coordinate::parse("30.26; DROP TABLE x", "-97.7").is_err());
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: parse_component("centerLat", latitude)?,
            longitude: parse_component("centerLng", longitude)?,
        })
    }

    /// Point in (x, y) order: longitude first.
    pub fn point(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

fn parse_component(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: trimmed.to_owned(),
        })?;

    finite(field, value)
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}
