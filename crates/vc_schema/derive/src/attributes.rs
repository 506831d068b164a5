//! Parsing of `#[schema(...)]` attributes.

use proc_macro2::Span;
use syn::{Attribute, LitStr};

pub(crate) const SCHEMA_ATTRIBUTE_NAME: &str = "schema";

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container attributes.
///
/// - `#[schema(nameless)]`: build the schema without member names.
/// - `#[schema(manual)]`: only implement `Value` and `Serializable`, the
///   caller writes `Registered` by hand.
/// - `#[schema(auto_register)]`: submit the type for static registration.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub nameless: bool,
    pub manual: bool,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(SCHEMA_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("nameless") {
                    this.nameless = true;
                } else if meta.path.is_ident("manual") {
                    this.manual = true;
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.segments[0].ident.span());
                } else {
                    return Err(meta.error(
                        "unknown container attribute, expected `nameless`, `manual` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field attributes.
///
/// - `#[schema(parent)]`: the field holds a parent object whose members are
///   traversed before the fields of this type.
/// - `#[schema(rename = "...")]`: the member name, instead of the field name.
/// - `#[schema(skip)]`: the field is not part of the schema.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub parent: bool,
    pub skip: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(SCHEMA_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("parent") {
                    this.parent = true;
                } else if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `parent`, `skip` or `rename`",
                    ));
                }
                Ok(())
            })?;

            if this.parent && this.skip {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`parent` and `skip` are mutually exclusive",
                ));
            }
            if this.parent
                && let Some(rename) = &this.rename
            {
                return Err(syn::Error::new(
                    rename.span(),
                    "a parent contributes its own member names and cannot be renamed",
                ));
            }
        }
        Ok(this)
    }
}
