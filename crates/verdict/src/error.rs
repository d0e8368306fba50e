// File: verdict/src/error.rs
// Purpose: Error types raised by the engine and the validator factories

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::accessor::Accessors;
use crate::engine::ErrorMap;

/// Errors raised by misuse of the engine or of a validator factory.
///
/// These are programmer errors. Field-level validation failures are never reported
/// through this type; they are recorded in the [`ErrorMap`].
#[derive(Debug, Error)]
pub enum Error {
    /// Zero validators, or an empty field name, passed to `validate`.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The data-bound overload was used on an engine built without data.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A regex validator factory was handed a pattern that does not compile.
    #[cfg(feature = "regex")]
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Raised by [`Verdict::check_has_errors`](crate::Verdict::check_has_errors) when at
/// least one field recorded an error.
///
/// Carries a snapshot of the error map and the subject data the engine was built with.
#[derive(Error)]
#[error("validation failed on {} field(s)", .errors.len())]
pub struct ValidationFailure<'a, S: ?Sized + 'a = dyn Accessors + 'a> {
    errors: ErrorMap,
    data: Option<&'a S>,
}

impl<'a, S: ?Sized> ValidationFailure<'a, S> {
    pub(crate) fn new(errors: ErrorMap, data: Option<&'a S>) -> Self {
        Self { errors, data }
    }

    /// The errors recorded when the failure was raised
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The data that was validated, if the engine was built with any
    pub fn data(&self) -> Option<&'a S> {
        self.data
    }

    /// Drops the subject reference and keeps the errors.
    ///
    /// Useful when the failure has to outlive the validated data, e.g. to return it
    /// through `anyhow`.
    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }
}

impl<'a, S: ?Sized> fmt::Debug for ValidationFailure<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("errors", &self.errors)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

impl<'a, S: ?Sized> Serialize for ValidationFailure<'a, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        let mut state = serializer.serialize_struct("ValidationFailure", 1)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_errors() -> ErrorMap {
        let mut errors = ErrorMap::new();
        errors.insert("name".to_string(), "name is required".to_string());
        errors.insert("age".to_string(), "age must be greater than zero".to_string());
        errors
    }

    #[test]
    fn test_failure_message_counts_fields() {
        let failure: ValidationFailure<'_> = ValidationFailure::new(sample_errors(), None);
        assert_eq!(failure.to_string(), "validation failed on 2 field(s)");
    }

    #[test]
    fn test_failure_serializes_errors_only() {
        let data = serde_json::json!({ "name": null });
        let failure = ValidationFailure::new(sample_errors(), Some(&data));

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": {
                    "name": "name is required",
                    "age": "age must be greater than zero"
                }
            })
        );
    }

    #[test]
    fn test_into_errors_keeps_map() {
        let failure: ValidationFailure<'_> = ValidationFailure::new(sample_errors(), None);
        let errors = failure.into_errors();
        assert_eq!(errors.get("name").map(String::as_str), Some("name is required"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidArgument("need a name").to_string(),
            "invalid argument: need a name"
        );
        assert_eq!(
            Error::InvalidState("no object was provided at construction").to_string(),
            "invalid state: no object was provided at construction"
        );
    }
}
