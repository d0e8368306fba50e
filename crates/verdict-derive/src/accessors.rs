// Accessors derive implementation
// Maps accessor names to struct fields: verbatim names, renames, optional getters

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

/// Accessor configuration for one field
struct FieldAccessor {
    ident: Ident,
    member: String,
    getter: bool,
}

/// Parse #[accessor(...)] on a field. `None` means the field is skipped.
fn parse_field(field: &syn::Field) -> syn::Result<Option<FieldAccessor>> {
    // Named fields only, checked by the caller
    let ident = field.ident.clone().expect("named field");
    let mut member = ident.to_string();
    let mut getter = false;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("accessor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("getter") {
                getter = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(meta.error("accessor name cannot be empty"));
                }
                member = name.value();
                Ok(())
            } else {
                Err(meta.error("expected `skip`, `getter` or `rename = \"...\"`"))
            }
        })?;
    }

    if skip {
        return Ok(None);
    }

    // Raw identifiers expose the plain name
    if let Some(stripped) = member.strip_prefix("r#") {
        member = stripped.to_string();
    }

    Ok(Some(FieldAccessor { ident, member, getter }))
}

/// `age` -> `getAge`
fn getter_name(member: &str) -> String {
    let mut chars = member.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Generate the Accessors implementation for a struct
pub fn impl_accessors(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::verdict::Accessors for #name #ty_generics #where_clause {
                        fn call_accessor(
                            &self,
                            member: &str,
                        ) -> ::core::result::Result<::verdict::Value, ::verdict::AccessError> {
                            ::core::result::Result::Err(::verdict::AccessError::NoSuchMember(
                                ::std::string::ToString::to_string(member),
                            ))
                        }
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Accessors only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Accessors only supports structs",
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut arms = Vec::new();

    for field in fields {
        let Some(accessor) = parse_field(field)? else {
            continue;
        };
        let ident = &accessor.ident;

        let mut names = vec![accessor.member.clone()];
        if accessor.getter {
            names.push(getter_name(&accessor.member));
        }

        for member in names {
            if !seen.insert(member.clone()) {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("duplicate accessor name `{}`", member),
                ));
            }
            arms.push(quote! {
                #member => ::verdict::accessor::member_value(member, &self.#ident),
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::verdict::Accessors for #name #ty_generics #where_clause {
            fn call_accessor(
                &self,
                member: &str,
            ) -> ::core::result::Result<::verdict::Value, ::verdict::AccessError> {
                match member {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::verdict::AccessError::NoSuchMember(
                        ::std::string::ToString::to_string(member),
                    )),
                }
            }
        }
    })
}
