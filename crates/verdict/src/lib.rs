//! # verdict
//!
//! Field validation with ordered, short-circuiting validator chains. Each field keeps the
//! message of the first validator that rejected it; the accumulated messages are exposed
//! as an ordered map from field name to message.
//!
//! ## Quick Start
//!
//! ```rust
//! use verdict::{validators::{positive, required}, Verdict};
//! use serde_json::json;
//!
//! let person = json!({ "name": null, "age": 2, "height": -3 });
//!
//! let mut verdict = Verdict::with_data(&person);
//! verdict.validate_field("name", &[&required])?;
//! verdict.validate_field("age", &[&required, &positive])?;
//! verdict.validate_field("height", &[&required, &positive])?;
//!
//! assert_eq!(
//!     verdict.errors().to_string(),
//!     "{name=name is required, height=height must be greater than zero}"
//! );
//! assert!(verdict.check_has_errors().is_err());
//! # Ok::<(), verdict::Error>(())
//! ```
//!
//! ## Features
//!
//! - **`regex`** (default) - `regex_match` / `regex_find` factories plus `email` and `url`
//! - **`derive`** (default) - `#[derive(Accessors)]` for structs with named fields
//!
//! ## Architecture
//!
//! - [`accessor`] - resolves a named field on the subject data (`getX`, then `x`)
//! - [`engine`] - the [`Verdict`] engine and its error map
//! - [`validator`] - the [`Validator`] contract
//! - [`validators`] - stock validators

// Lets the derive macro's `::verdict::` paths resolve inside this crate's own tests.
extern crate self as verdict;

pub mod accessor;
pub mod engine;
pub mod error;
pub mod validator;
pub mod validators;

pub use accessor::{getter_name, resolve, AccessError, Accessors, Resolution};
pub use engine::{ErrorMap, Verdict};
pub use error::{Error, Result, ValidationFailure};
pub use validator::Validator;

pub use serde_json::Value;

#[cfg(feature = "derive")]
pub use verdict_derive::Accessors;
