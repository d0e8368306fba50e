// File: verdict/src/validators/pattern.rs
// Purpose: Regex-backed validators

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::validator::Validator;
use crate::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap()
});

/// How a validated value presents itself to a pattern validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text<'t> {
    Absent,
    Present(&'t str),
    /// A value that has no text form, e.g. a JSON number
    NotText,
}

/// Values a pattern validator can check
pub trait AsText {
    fn as_text(&self) -> Text<'_>;
}

impl AsText for str {
    fn as_text(&self) -> Text<'_> {
        Text::Present(self)
    }
}

impl AsText for String {
    fn as_text(&self) -> Text<'_> {
        Text::Present(self)
    }
}

impl<S: AsRef<str>> AsText for Option<S> {
    fn as_text(&self) -> Text<'_> {
        match self {
            Some(s) => Text::Present(s.as_ref()),
            None => Text::Absent,
        }
    }
}

impl AsText for Value {
    fn as_text(&self) -> Text<'_> {
        match self {
            Value::Null => Text::Absent,
            Value::String(s) => Text::Present(s),
            _ => Text::NotText,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// The whole value must match
    Match,
    /// The pattern must occur somewhere in the value
    Find,
}

/// Validator built by [`regex_match`] or [`regex_find`].
///
/// Absent and empty values always pass. A value with no text form fails.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Regex,
    mode: Mode,
    message: String,
}

impl RegexValidator {
    fn new(pattern: &str, mode: Mode, message: String) -> Result<Self> {
        // Compile the raw pattern first so a broken pattern cannot be rescued by the
        // anchoring group.
        let regex = Regex::new(pattern)?;
        let regex = match mode {
            Mode::Match => Regex::new(&format!(r"\A(?:{})\z", pattern))?,
            Mode::Find => regex,
        };
        Ok(Self { regex, mode, message })
    }

    /// True when the whole value has to match
    pub fn is_full_match(&self) -> bool {
        self.mode == Mode::Match
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn check(&self, text: Text<'_>) -> Option<String> {
        match text {
            Text::Absent => None,
            Text::Present(s) if s.is_empty() => None,
            Text::Present(s) if self.regex.is_match(s) => None,
            Text::Present(_) | Text::NotText => Some(self.message.clone()),
        }
    }
}

impl<T: AsText + ?Sized> Validator<T> for RegexValidator {
    fn validate(&self, value: &T, _field: &str) -> Option<String> {
        self.check(value.as_text())
    }
}

/// Validator requiring the entire value to match `pattern`.
///
/// # Errors
///
/// [`Error::InvalidPattern`](crate::Error::InvalidPattern) if `pattern` does not compile.
pub fn regex_match(pattern: &str, message: impl Into<String>) -> Result<RegexValidator> {
    RegexValidator::new(pattern, Mode::Match, message.into())
}

/// Validator requiring `pattern` to occur somewhere in the value.
///
/// # Errors
///
/// [`Error::InvalidPattern`](crate::Error::InvalidPattern) if `pattern` does not compile.
pub fn regex_find(pattern: &str, message: impl Into<String>) -> Result<RegexValidator> {
    RegexValidator::new(pattern, Mode::Find, message.into())
}

fn check_static(regex: &Regex, value: &Value) -> bool {
    match value.as_text() {
        Text::Absent => true,
        Text::Present(s) => s.is_empty() || regex.is_match(s),
        Text::NotText => false,
    }
}

/// Fails unless the value looks like an email address. Absent and empty values pass.
pub fn email(value: &Value, field: &str) -> Option<String> {
    (!check_static(&EMAIL_REGEX, value)).then(|| format!("{} must be a valid email address", field))
}

/// Fails unless the value is an http(s) URL. Absent and empty values pass.
pub fn url(value: &Value, field: &str) -> Option<String> {
    (!check_static(&URL_REGEX, value)).then(|| format!("{} must be a valid URL", field))
}
