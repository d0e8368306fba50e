// File: verdict/src/validator.rs
// Purpose: The validator contract shared by the engine and the stock validators

/// Checks one value and explains why it is invalid.
///
/// Returns `None` when the value passes. A `Some` message marks the field invalid; an
/// empty message is treated like `None`.
///
/// Any `Fn(&T, &str) -> Option<String>` is a validator, so plain functions and closures
/// can be passed to [`Verdict::validate`](crate::Verdict::validate) directly:
///
/// ```rust
/// use verdict::Verdict;
///
/// fn not_blank(value: &str, field: &str) -> Option<String> {
///     value.trim().is_empty().then(|| format!("{} is blank", field))
/// }
///
/// let max_len = 3;
/// let short = |value: &str, field: &str| {
///     (value.chars().count() > max_len).then(|| format!("{} is too long", field))
/// };
///
/// let mut verdict = Verdict::new();
/// verdict.validate("Johnny", "name", &[&not_blank, &short])?;
/// assert_eq!(verdict.error_on("name"), Some("name is too long"));
/// # Ok::<(), verdict::Error>(())
/// ```
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T, field: &str) -> Option<String>;
}

impl<T: ?Sized, F> Validator<T> for F
where
    F: Fn(&T, &str) -> Option<String>,
{
    fn validate(&self, value: &T, field: &str) -> Option<String> {
        self(value, field)
    }
}
