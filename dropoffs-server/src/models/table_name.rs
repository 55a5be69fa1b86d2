//! Spatial table identifier
//!
//! Identifiers cannot be sent as bound parameters, so the table name is the
//! one piece of SQL text that comes from configuration. It is restricted to
//! lowercase identifiers and always emitted quoted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Default table loaded from the City of Austin recycling dataset.
pub const DEFAULT_TABLE: &str = "austinrecycling";

/// Postgres truncates identifiers past 63 bytes.
const MAX_IDENT_LEN: usize = 63;

/// Optional schema qualifier, then table. Lowercase keeps quoted and
/// unquoted spellings equivalent.
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z_][a-z0-9_]*(\.[a-z_][a-z0-9_]*)?$").expect("invalid identifier regex")
});

/// Validated, optionally schema-qualified table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Create a table name, validating identifier format.
    ///
    /// # Example
    /// ```
    /// use dropoffs_server::models::TableName;
    ///
    /// assert!(TableName::new("austinrecycling").is_ok());
    /// assert!(TableName::new("public.austinrecycling").is_ok());
    /// assert!(TableName::new("austinrecycling; DROP TABLE x").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "table name" });
        }

        if s.split('.').any(|part| part.len() > MAX_IDENT_LEN) {
            return Err(ValidationError::TooLong {
                field: "table name",
                max: MAX_IDENT_LEN,
            });
        }

        if !IDENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "table name",
                reason: "must be a lowercase SQL identifier, optionally schema-qualified",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form for splicing into SQL, e.g. `"public"."austinrecycling"`.
    pub fn quoted(&self) -> String {
        self.0
            .split('.')
            .map(|part| format!("\"{}\"", part))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE.to_owned())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(TableName::new("austinrecycling").is_ok());
        assert!(TableName::new("_staging").is_ok());
        assert!(TableName::new("geo.drop_offs_2020").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(TableName::new("").is_err());
        assert!(TableName::new("AustinRecycling").is_err());
        assert!(TableName::new("2020_dropoffs").is_err());
        assert!(TableName::new("a.b.c").is_err());
        assert!(TableName::new("drop\"offs").is_err());
        assert!(TableName::new("dropoffs limit 1").is_err());
    }

    #[test]
    fn overlong_segment_rejected() {
        let name = "a".repeat(64);
        assert_eq!(
            TableName::new(&name).unwrap_err(),
            ValidationError::TooLong {
                field: "table name",
                max: 63
            }
        );
        assert!(TableName::new(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn quoting() {
        assert_eq!(TableName::default().quoted(), "\"austinrecycling\"");
        assert_eq!(
            TableName::new("geo.dropoffs").unwrap().quoted(),
            "\"geo\".\"dropoffs\""
        );
    }
}
