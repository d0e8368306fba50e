// File: verdict/src/accessor.rs
// Purpose: Resolve a named field on subject data through getter-style or verbatim accessors

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::Value;

/// Why a single accessor call produced no value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The subject has no accessor with this name
    #[error("no accessor named `{0}`")]
    NoSuchMember(String),

    /// The accessor exists but could not produce a value
    #[error("accessor `{member}` failed: {reason}")]
    Invocation { member: String, reason: String },
}

/// Structured data whose fields can be read by accessor name.
///
/// An implementation exposes zero-argument accessors by name. The resolver asks for
/// the getter-style name first (`getAge`) and falls back to the field name itself
/// (`age`), so an implementation may expose either or both.
///
/// Implemented for JSON objects and string-keyed maps of [`Value`], and derivable for
/// structs with `#[derive(Accessors)]`.
pub trait Accessors {
    /// Invoke the accessor named `member`
    fn call_accessor(&self, member: &str) -> Result<Value, AccessError>;

    /// Runtime type of the subject, used in diagnostics
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Outcome of resolving a field on subject data
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Value),
    NotFound,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::NotFound => None,
        }
    }

    /// Collapse to the value handed to validators.
    ///
    /// `NotFound` becomes [`Value::Null`], so a validator cannot tell a failed lookup
    /// from a field that is genuinely null.
    pub fn into_value(self) -> Value {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::NotFound => Value::Null,
        }
    }
}

/// Getter-style accessor name for a field: `age` -> `getAge`
pub fn getter_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Resolve `field` on `subject`.
///
/// Tries the getter-style accessor first. Only when that accessor does not exist is
/// the accessor named exactly `field` tried. Every failure, including a getter that
/// exists but fails, yields [`Resolution::NotFound`].
pub fn resolve<S: Accessors + ?Sized>(subject: &S, field: &str) -> Resolution {
    if field.is_empty() {
        return Resolution::NotFound;
    }

    let getter = getter_name(field);
    let outcome = match subject.call_accessor(&getter) {
        Err(AccessError::NoSuchMember(_)) => {
            trace!(field, getter = %getter, "no getter, trying verbatim accessor");
            subject.call_accessor(field)
        }
        other => other,
    };

    match outcome {
        Ok(value) => Resolution::Resolved(value),
        Err(error) => {
            debug!(field, data_type = subject.type_name(), %error, "field could not be resolved");
            Resolution::NotFound
        }
    }
}

/// Serialize a field for an accessor call.
///
/// Used by `#[derive(Accessors)]`; handy for hand-written implementations too. A value
/// that cannot be represented as JSON is an [`AccessError::Invocation`].
pub fn member_value<T: Serialize + ?Sized>(member: &str, value: &T) -> Result<Value, AccessError> {
    serde_json::to_value(value).map_err(|error| AccessError::Invocation {
        member: member.to_string(),
        reason: error.to_string(),
    })
}

fn lookup(member: &str, found: Option<&Value>) -> Result<Value, AccessError> {
    found
        .cloned()
        .ok_or_else(|| AccessError::NoSuchMember(member.to_string()))
}

impl Accessors for serde_json::Map<String, Value> {
    fn call_accessor(&self, member: &str) -> Result<Value, AccessError> {
        lookup(member, self.get(member))
    }
}

/// Only objects have accessors; every other variant reports `NoSuchMember`.
impl Accessors for Value {
    fn call_accessor(&self, member: &str) -> Result<Value, AccessError> {
        match self {
            Value::Object(map) => map.call_accessor(member),
            _ => Err(AccessError::NoSuchMember(member.to_string())),
        }
    }
}

impl<H: BuildHasher> Accessors for HashMap<String, Value, H> {
    fn call_accessor(&self, member: &str) -> Result<Value, AccessError> {
        lookup(member, self.get(member))
    }
}

impl Accessors for BTreeMap<String, Value> {
    fn call_accessor(&self, member: &str) -> Result<Value, AccessError> {
        lookup(member, self.get(member))
    }
}

macro_rules! forward_accessors {
    ($($pointer:ty),*) => {
        $(
            impl<T: Accessors + ?Sized> Accessors for $pointer {
                fn call_accessor(&self, member: &str) -> Result<Value, AccessError> {
                    (**self).call_accessor(member)
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }
            }
        )*
    };
}

forward_accessors!(&T, Box<T>, Rc<T>, Arc<T>);
