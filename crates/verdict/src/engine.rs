// File: verdict/src/engine.rs
// Purpose: The validation engine and its per-field error map

use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::accessor::{resolve, Accessors};
use crate::error::{Error, Result, ValidationFailure};
use crate::validator::Validator;
use crate::Value;

/// Field name to error message, in first-insertion order.
///
/// Overwriting a field keeps its original position. `Display` renders the map as
/// `{name=name is required, height=height must be greater than zero}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the message for a field, returning the previous one
    pub fn insert(&mut self, field: String, message: String) -> Option<String> {
        self.0.insert(field, message)
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl Deref for ErrorMap {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field, message)?;
        }
        f.write_str("}")
    }
}

impl FromIterator<(String, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'m> IntoIterator for &'m ErrorMap {
    type Item = (&'m String, &'m String);
    type IntoIter = indexmap::map::Iter<'m, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Runs validator chains per field and accumulates the first failure of each.
///
/// Built either empty ([`Verdict::new`]), in which case values are passed to
/// [`validate`](Verdict::validate) directly, or around subject data
/// ([`Verdict::with_data`]), in which case [`validate_field`](Verdict::validate_field)
/// resolves values by field name.
///
/// Entries are only ever added or overwritten. Re-validating a field whose chain now
/// passes does not remove its earlier error.
pub struct Verdict<'a, S: ?Sized + 'a = dyn Accessors + 'a> {
    errors: ErrorMap,
    data: Option<&'a S>,
    data_type: Option<&'static str>,
}

impl<'a> Verdict<'a> {
    /// Creates an engine without subject data
    pub fn new() -> Self {
        debug!("validator created without data");
        Self {
            errors: ErrorMap::new(),
            data: None,
            data_type: None,
        }
    }
}

impl<'a> Default for Verdict<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: Accessors + ?Sized> Verdict<'a, S> {
    /// Creates an engine holding `data` for field resolution
    pub fn with_data(data: &'a S) -> Self {
        let data_type = data.type_name();
        debug!(data_type, "validator created with data");
        Self {
            errors: ErrorMap::new(),
            data: Some(data),
            data_type: Some(data_type),
        }
    }

    /// Validates a field of the subject data.
    ///
    /// The value is looked up through [`resolve`]; a field that cannot be resolved is
    /// validated as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the engine was built without data, then the same
    /// argument errors as [`validate`](Verdict::validate).
    pub fn validate_field(&mut self, field: &str, validators: &[&dyn Validator<Value>]) -> Result<()> {
        let data = self
            .data
            .ok_or(Error::InvalidState("no object was provided at construction"))?;
        check_arguments(field, validators.len())?;

        let value = resolve(data, field).into_value();
        self.validate(&value, field, validators)
    }
}

impl<'a, S: ?Sized> Verdict<'a, S> {
    /// Validates `value` under the name `field`.
    ///
    /// Validators run in order. The first one returning a non-empty message records it
    /// under `field` and stops the chain. When every validator passes nothing is
    /// written, and an earlier error on `field` stays in place.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `validators` is empty or `field` is empty. Both are
    /// checked before any validator runs.
    pub fn validate<T: ?Sized>(
        &mut self,
        value: &T,
        field: &str,
        validators: &[&dyn Validator<T>],
    ) -> Result<()> {
        check_arguments(field, validators.len())?;
        trace!(field, validators = validators.len(), "validating field");

        for (position, validator) in validators.iter().enumerate() {
            match validator.validate(value, field) {
                Some(message) if !message.is_empty() => {
                    debug!(field, position, %message, "validation failed");
                    self.errors.insert(field.to_string(), message);
                    return Ok(());
                }
                _ => trace!(field, position, "validation passed"),
            }
        }

        Ok(())
    }

    /// Returns true if any field recorded an error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// The message recorded for `field`, if any
    pub fn error_on(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Records an externally computed error, overwriting any existing one.
    pub fn add_error_on(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Fails with a [`ValidationFailure`] carrying the current errors and data, if any
    /// error was recorded.
    pub fn check_has_errors(&self) -> std::result::Result<(), ValidationFailure<'a, S>> {
        if self.has_errors() {
            debug!(fields = self.errors.len(), "validation finished with errors");
            return Err(ValidationFailure::new(self.errors.clone(), self.data));
        }
        Ok(())
    }

    /// Live view of the recorded errors
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    /// The data passed at construction
    pub fn data(&self) -> Option<&'a S> {
        self.data
    }

    /// Type name of the data passed at construction
    pub fn data_type(&self) -> Option<&'static str> {
        self.data_type
    }
}

fn check_arguments(field: &str, validator_count: usize) -> Result<()> {
    if validator_count == 0 {
        return Err(Error::InvalidArgument("need at least one validator"));
    }
    if field.is_empty() {
        return Err(Error::InvalidArgument("need a name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{positive, required};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::cell::Cell;

    /// Validator stub that counts its invocations
    struct Counting {
        calls: Cell<usize>,
        message: Option<&'static str>,
    }

    impl Counting {
        fn passing() -> Self {
            Self { calls: Cell::new(0), message: None }
        }

        fn failing(message: &'static str) -> Self {
            Self { calls: Cell::new(0), message: Some(message) }
        }
    }

    impl Validator<i32> for Counting {
        fn validate(&self, _value: &i32, _field: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.message.map(String::from)
        }
    }

    fn not_blank(value: &str, field: &str) -> Option<String> {
        value.trim().is_empty().then(|| format!("{} is blank", field))
    }

    #[test]
    fn test_new_engine_is_empty() {
        let verdict = Verdict::new();
        assert!(!verdict.has_errors());
        assert!(verdict.errors().is_empty());
        assert!(verdict.data().is_none());
        assert!(verdict.data_type().is_none());
    }

    #[test]
    fn test_all_passing_chain_records_nothing() {
        let first = Counting::passing();
        let second = Counting::passing();
        let mut verdict = Verdict::new();

        verdict.validate(&42_i32, "age", &[&first, &second]).unwrap();

        assert!(!verdict.has_errors());
        assert!(!verdict.has_error_on("age"));
        assert_eq!(verdict.error_on("age"), None);
        assert_eq!(first.calls.get(), 1);
        assert_eq!(second.calls.get(), 1);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn test_first_failure_wins_and_stops_chain(#[case] failing_at: usize) {
        const MESSAGES: [&str; 4] = ["first", "second", "third", "fourth"];

        let chain: Vec<Counting> = (0..MESSAGES.len())
            .map(|i| {
                if i < failing_at {
                    Counting::passing()
                } else {
                    Counting::failing(MESSAGES[i])
                }
            })
            .collect();
        let validators: Vec<&dyn Validator<i32>> =
            chain.iter().map(|c| c as &dyn Validator<i32>).collect();

        let mut verdict = Verdict::new();
        verdict.validate(&1_i32, "field", &validators).unwrap();

        assert_eq!(verdict.error_on("field"), Some(MESSAGES[failing_at]));
        for (i, validator) in chain.iter().enumerate() {
            let expected = if i <= failing_at { 1 } else { 0 };
            assert_eq!(validator.calls.get(), expected, "validator {} call count", i);
        }
    }

    #[test]
    fn test_empty_message_counts_as_pass() {
        let empty = |_: &i32, _: &str| Some(String::new());
        let mut verdict = Verdict::new();

        verdict.validate(&1_i32, "field", &[&empty]).unwrap();

        assert!(!verdict.has_errors());
    }

    #[rstest]
    #[case("name")]
    #[case("")]
    fn test_no_validators_is_invalid_argument(#[case] field: &str) {
        let mut verdict = Verdict::new();
        let result = verdict.validate("abc", field, &[]);

        assert!(matches!(
            result,
            Err(Error::InvalidArgument("need at least one validator"))
        ));
    }

    #[test]
    fn test_empty_name_is_invalid_argument() {
        let calls = Counting::passing();
        let mut verdict = Verdict::new();

        let result = verdict.validate(&1_i32, "", &[&calls]);

        assert!(matches!(result, Err(Error::InvalidArgument("need a name"))));
        assert_eq!(calls.calls.get(), 0);
        assert!(!verdict.has_errors());
    }

    #[test]
    fn test_validate_field_without_data_is_invalid_state() {
        let mut verdict = Verdict::new();
        let result = verdict.validate_field("name", &[&required]);

        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_validate_field_without_data_checks_state_first() {
        let mut verdict = Verdict::new();
        let result = verdict.validate_field("", &[]);

        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_validate_field_with_data_checks_arguments() {
        let data = json!({ "name": "John" });
        let mut verdict = Verdict::with_data(&data);

        assert!(matches!(
            verdict.validate_field("name", &[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            verdict.validate_field("", &[&required]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_field_resolves_value() {
        let data = json!({ "name": "John", "nickname": "" });
        let mut verdict = Verdict::with_data(&data);

        verdict.validate_field("name", &[&required]).unwrap();
        verdict.validate_field("nickname", &[&required]).unwrap();
        verdict.validate_field("missing", &[&required]).unwrap();

        assert!(!verdict.has_error_on("name"));
        assert_eq!(verdict.error_on("nickname"), Some("nickname is required"));
        assert_eq!(verdict.error_on("missing"), Some("missing is required"));
    }

    #[test]
    fn test_documented_example() {
        let data = json!({ "name": null, "age": 2, "height": -3 });
        let mut verdict = Verdict::with_data(&data);

        verdict.validate_field("name", &[&required]).unwrap();
        verdict.validate_field("age", &[&required, &positive]).unwrap();
        verdict.validate_field("height", &[&required, &positive]).unwrap();

        assert_eq!(verdict.errors().len(), 2);
        assert_eq!(
            verdict.errors().to_string(),
            "{name=name is required, height=height must be greater than zero}"
        );
    }

    #[test]
    fn test_check_has_errors_is_noop_when_clean() {
        let mut verdict = Verdict::new();
        verdict.validate("John", "name", &[&not_blank]).unwrap();

        assert!(verdict.check_has_errors().is_ok());
    }

    #[test]
    fn test_check_has_errors_carries_map_and_data() {
        let data = json!({ "name": "" });
        let mut verdict = Verdict::with_data(&data);
        verdict.validate_field("name", &[&required]).unwrap();

        let failure = verdict.check_has_errors().unwrap_err();

        assert_eq!(failure.errors(), verdict.errors());
        assert_eq!(failure.data(), Some(&data));
    }

    #[test]
    fn test_add_error_on_overwrites() {
        let mut verdict = Verdict::new();
        verdict.validate("  ", "name", &[&not_blank]).unwrap();
        assert_eq!(verdict.error_on("name"), Some("name is blank"));

        verdict.add_error_on("name", "name is taken");
        assert_eq!(verdict.error_on("name"), Some("name is taken"));

        verdict.add_error_on("email", "email is taken");
        verdict.add_error_on("email", "email bounced");
        assert_eq!(verdict.error_on("email"), Some("email bounced"));
        assert_eq!(verdict.errors().len(), 2);
    }

    #[test]
    fn test_revalidation_never_clears() {
        let mut verdict = Verdict::new();
        verdict.validate("", "name", &[&not_blank]).unwrap();
        verdict.validate("John", "name", &[&not_blank]).unwrap();

        assert_eq!(verdict.error_on("name"), Some("name is blank"));
    }

    #[test]
    fn test_revalidation_overwrites_with_new_failure() {
        let too_short = |value: &str, field: &str| {
            (value.len() < 5).then(|| format!("{} is too short", field))
        };
        let mut verdict = Verdict::new();

        verdict.validate("", "name", &[&not_blank]).unwrap();
        verdict.validate("Jo", "name", &[&not_blank, &too_short]).unwrap();

        assert_eq!(verdict.error_on("name"), Some("name is too short"));
    }

    #[test]
    fn test_error_map_keeps_first_insertion_order() {
        let mut errors = ErrorMap::new();
        errors.insert("b".to_string(), "1".to_string());
        errors.insert("a".to_string(), "2".to_string());
        errors.insert("b".to_string(), "3".to_string());

        assert_eq!(errors.to_string(), "{b=3, a=2}");
        assert_eq!(ErrorMap::new().to_string(), "{}");
    }

    #[test]
    fn test_error_map_serializes_as_object() {
        let errors: ErrorMap = vec![("name".to_string(), "name is required".to_string())]
            .into_iter()
            .collect();

        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"name":"name is required"}"#
        );
    }
}
