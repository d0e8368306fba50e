// Verdict Procedural Macros
// Provides the Accessors derive macro

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod accessors;

/// Derive macro for the `Accessors` trait
///
/// Every named field becomes an accessor under its own name, so
/// `verdict.validate_field("age", ...)` reads `self.age`. Field values are converted
/// with `serde_json::to_value`, so field types must implement `Serialize`. A
/// conversion failure makes the field resolve as null.
///
/// # Field attributes
///
/// - `#[accessor(skip)]` - not exposed
/// - `#[accessor(rename = "name")]` - exposed under a different name
/// - `#[accessor(getter)]` - also exposed under the getter name (`getAge`)
///
/// # Example
///
/// ```ignore
/// use verdict::{validators::{positive, required}, Accessors, Verdict};
///
/// #[derive(Accessors)]
/// struct Person {
///     name: Option<String>,
///     #[accessor(rename = "years")]
///     age: i32,
///     #[accessor(skip)]
///     password_hash: String,
/// }
///
/// let person = Person { name: None, age: 2, password_hash: String::new() };
/// let mut verdict = Verdict::with_data(&person);
/// verdict.validate_field("name", &[&required])?;
/// verdict.validate_field("years", &[&required, &positive])?;
/// ```
#[proc_macro_derive(Accessors, attributes(accessor))]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    accessors::impl_accessors(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
