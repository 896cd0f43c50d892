//! Entity derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

/// Parsed field-level `#[orm(...)]` options.
#[derive(Default)]
struct FieldAttr {
    column: Option<String>,
    read_only: bool,
    skip: bool,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            if ident == "read_only" {
                attr.read_only = true;
            } else if ident == "skip" {
                attr.skip = true;
            } else if ident == "column" {
                let _: syn::Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                attr.column = Some(value.value());
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    "unknown orm field attribute; expected `column = \"...\"`, `read_only` or `skip`",
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let table = get_table_name(&input)?.unwrap_or_else(|| name.to_string());
    let entity_name = name.to_string();

    let mut descriptors = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        let attr = get_field_attr(field)?;
        if attr.skip {
            continue;
        }

        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let column = attr
            .column
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("column `{column}` is mapped more than once"),
            ));
        }

        let field_type = quote! { <#ty as entmap::FieldValue>::FIELD_TYPE };
        let nullable = quote! { <#ty as entmap::FieldValue>::NULLABLE };
        let read = quote! {
            |entity: &Self| entmap::FieldValue::to_value(&entity.#field_name)
        };

        let descriptor = if attr.read_only {
            quote! {
                entmap::FieldDescriptor::read_only(#column, #field_type, #nullable, #read)
            }
        } else {
            quote! {
                entmap::FieldDescriptor::new(
                    #column,
                    #field_type,
                    #nullable,
                    #read,
                    |entity: &mut Self, value: entmap::Value| {
                        entity.#field_name = <#ty as entmap::FieldValue>::from_value(value)?;
                        Ok(())
                    },
                )
            }
        };
        descriptors.push(descriptor);
    }

    Ok(quote! {
        impl #impl_generics entmap::Entity for #name #ty_generics #where_clause {
            const TABLE: &'static str = #table;
            const NAME: &'static str = #entity_name;

            fn fields() -> Vec<entmap::FieldDescriptor<Self>> {
                vec![
                    #(#descriptors),*
                ]
            }
        }
    })
}

/// Extract table name from struct-level `#[orm(table = "...")]` attribute.
fn get_table_name(input: &DeriveInput) -> Result<Option<String>> {
    for attr in &input.attrs {
        if attr.path().is_ident("orm") {
            let nested = attr.parse_args::<syn::MetaNameValue>()?;
            if !nested.path.is_ident("table") {
                return Err(syn::Error::new_spanned(
                    &nested.path,
                    "unknown orm struct attribute; expected `table = \"...\"`",
                ));
            }
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &nested.value
            {
                return Ok(Some(lit.value()));
            }
            return Err(syn::Error::new_spanned(
                &nested.value,
                "table must be a string literal",
            ));
        }
    }
    Ok(None)
}

fn get_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            let parsed: FieldAttr = attr.parse_args()?;
            merged.column = parsed.column.or(merged.column);
            merged.read_only |= parsed.read_only;
            merged.skip |= parsed.skip;
        }
    }
    Ok(merged)
}
