//! Paths into `vc_schema` used by generated code.
//!
//! Kept in one place so that moving an item in `vc_schema` only touches
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_schema` crate.
///
/// 1. For `vc_schema` itself and crates that depend on it, `::vc_schema`.
/// 2. For crates that depend on `vc_persist`, `::vc_persist::schema`.
/// 3. Otherwise `::vc_schema`, which may be incorrect.
///
/// Reading the caller's manifest is not free, so the path is obtained once
/// per macro invocation and passed around.
pub(crate) fn vc_schema() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_schema"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn value_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::Value }
}

#[inline(always)]
pub(crate) fn serializable_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::Serializable }
}

#[inline(always)]
pub(crate) fn registered_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::Registered }
}

#[inline(always)]
pub(crate) fn schema_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::Schema }
}

#[inline(always)]
pub(crate) fn classification_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::Classification }
}

#[inline(always)]
pub(crate) fn value_module_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::value }
}

#[inline(always)]
pub(crate) fn schema_cell_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::schema::SchemaCell }
}

#[inline(always)]
pub(crate) fn generic_schema_cell_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::schema::GenericSchemaCell }
}

#[inline(always)]
pub(crate) fn box_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::__macro_exports::Box }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_schema_path: &syn::Path) -> TokenStream {
    quote! { #vc_schema_path::__macro_exports::auto_register }
}
