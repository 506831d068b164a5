//! See following macros:
//!
//! - [`Schema`]
//! - [`Enumeration`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Schema Derivation
///
/// `#[derive(Schema)]` implements the following traits for a struct:
///
/// - `Value`, viewing the struct as a composite
/// - `Serializable`, with `Classification::Composite`
/// - `Registered`, building the schema once on first access
///
/// The struct must implement `Default`. Named, tuple and unit structs are
/// supported. Tuple fields are named `"0"`, `"1"`, and so on.
///
/// ```rust, ignore
/// #[derive(Schema, Default)]
/// struct BaseObject {
///     data: f64,
///     integer: i32,
/// }
/// ```
///
/// ## Parents
///
/// A field marked `parent` holds an embedded parent object. Its members are
/// traversed flat, before the fields of the derived type, and its fields do
/// not appear as a nested object.
///
/// ```rust, ignore
/// #[derive(Schema, Default)]
/// struct DerivedObject {
///     #[schema(parent)]
///     base: BaseObject,
///     floating: f32,
///     string: String,
/// }
/// ```
///
/// The parent type must itself be registered.
///
/// ## Field Attributes
///
/// - `#[schema(rename = "name")]`: the member name used by named formats.
/// - `#[schema(skip)]`: leave the field out of the schema. It keeps its
///   `Default` value on load.
///
/// ## Container Attributes
///
/// - `#[schema(nameless)]`: build a schema without member names. Such a type
///   only works with formats that do not require names, like the binary
///   format.
/// - `#[schema(manual)]`: only implement `Value` and `Serializable`. The
///   caller implements `Registered` by hand, usually to customize the schema.
/// - `#[schema(auto_register)]`: submit the type for static registration, see
///   `SchemaRegistry::auto_register`. No effect on generic types, or when the
///   `auto_register` feature is disabled.
///
/// ## Generics
///
/// Every type parameter is bounded by `Serializable`. Lifetime parameters are
/// rejected.
#[proc_macro_derive(Schema, attributes(schema))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::impl_struct_schema(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// # Enumeration Derivation
///
/// `#[derive(Enumeration)]` implements `Value`, `Serializable` and
/// `Enumeration` for a field-less enum. The enum is encoded as its
/// discriminant, typed by its `#[repr(..)]` (`isize` without one).
///
/// ```rust, ignore
/// #[derive(Enumeration, Default, Clone, Copy)]
/// #[repr(u8)]
/// enum Mode {
///     #[default]
///     Off = 0,
///     On = 3,
/// }
/// ```
///
/// Loading a discriminant that matches no variant is an error.
#[proc_macro_derive(Enumeration)]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::impl_enumeration(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
