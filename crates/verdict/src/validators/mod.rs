// File: verdict/src/validators/mod.rs
// Purpose: Stock validators for dynamically typed field values

use crate::Value;

#[cfg(feature = "regex")]
pub mod pattern;

#[cfg(feature = "regex")]
pub use pattern::{email, regex_find, regex_match, url, AsText, RegexValidator, Text};

/// Integer part of a JSON number, the way `required` and `positive` compare it.
///
/// Fractions are truncated toward zero, so `0.5` counts as zero and `-0.5` is not
/// negative. Integers too large for `i64` are reported as `i64::MAX`.
fn integer_part(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    if number.as_u64().is_some() {
        return Some(i64::MAX);
    }
    number.as_f64().map(|n| n.trunc() as i64)
}

/// Fails on null, an empty string, or a number whose integer part is zero.
pub fn required(value: &Value, field: &str) -> Option<String> {
    let missing = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(_) => integer_part(value) == Some(0),
        _ => false,
    };
    missing.then(|| format!("{} is required", field))
}

/// Fails on null, on anything that is not a number, and on negative numbers.
///
/// Zero passes; pair with [`required`] to reject it.
pub fn positive(value: &Value, field: &str) -> Option<String> {
    match integer_part(value) {
        Some(n) if n >= 0 => None,
        _ => Some(format!("{} must be greater than zero", field)),
    }
}

/// Fails when the value's text form has more than `size` characters.
///
/// Strings are measured as-is; other values by their JSON rendering (`12345` is five
/// characters). Null passes.
pub fn max_length(size: usize) -> impl Fn(&Value, &str) -> Option<String> {
    move |value, field| {
        let length = match value {
            Value::Null => return None,
            Value::String(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        };
        (length > size).then(|| format!("{} must have maximum {} characters", field, size))
    }
}
