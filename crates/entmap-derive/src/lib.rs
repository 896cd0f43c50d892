//! Derive macros for entmap
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod entity;

/// Derive the `Entity` trait for a struct.
///
/// Generates the field-descriptor table the mapper uses: one entry per field,
/// with its column name, semantic type and read/write accessors. Every field
/// type must implement `entmap::FieldValue`; anything else fails to compile.
///
/// # Example
///
/// ```ignore
/// use entmap::Entity;
///
/// #[derive(Debug, Default, Entity)]
/// #[orm(table = "members")]
/// struct Member {
///     id: Option<i32>,
///     name: Option<String>,
///     #[orm(column = "password")]
///     passwd: Option<Vec<u8>>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Table name (defaults to the struct name)
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(read_only)]` - Field is never populated from a result
/// - `#[orm(skip)]` - Field is not mapped at all (keeps its `Default`)
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
