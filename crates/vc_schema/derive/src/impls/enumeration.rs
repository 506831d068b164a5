use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Fields, Meta, Token};

const REPR_TYPES: [(&str, &str); 12] = [
    ("i8", "I8"),
    ("i16", "I16"),
    ("i32", "I32"),
    ("i64", "I64"),
    ("i128", "I128"),
    ("isize", "Isize"),
    ("u8", "U8"),
    ("u16", "U16"),
    ("u32", "U32"),
    ("u64", "U64"),
    ("u128", "U128"),
    ("usize", "Usize"),
];

/// Returns the integer type from `#[repr(..)]` and its `Number` variant.
/// Without one, the discriminant is an `isize`.
fn parse_repr(attrs: &[Attribute]) -> syn::Result<(Ident, Ident)> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in metas {
            let Meta::Path(path) = meta else { continue };
            let Some(ident) = path.get_ident() else {
                continue;
            };
            if let Some((_, kind)) = REPR_TYPES.iter().find(|(ty, _)| ident == ty) {
                return Ok((ident.clone(), Ident::new(kind, ident.span())));
            }
        }
    }
    Ok((
        Ident::new("isize", Span::call_site()),
        Ident::new("Isize", Span::call_site()),
    ))
}

/// Implements `Value`, `Serializable` and `Enumeration` for a field-less enum.
pub(crate) fn impl_enumeration(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Enumeration` can only be derived for field-less enums",
        ));
    };
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Enumeration` cannot be derived for generic enums",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Enumeration` requires at least one variant",
        ));
    }
    if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        return Err(syn::Error::new_spanned(
            variant,
            "`Enumeration` variants cannot carry fields",
        ));
    }

    let (repr, kind) = parse_repr(&ast.attrs)?;
    let vc_schema_path = crate::path::vc_schema();
    let value_module_ = crate::path::value_module_(&vc_schema_path);
    let ident = &ast.ident;

    let value_impl = super::impl_value(ident, &ast.generics, "Enum", "Atomic", &vc_schema_path);

    let variants: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();

    Ok(quote! {
        #value_impl

        impl #value_module_::Enumeration for #ident {
            #[inline]
            fn repr_kind(&self) -> #value_module_::NumberKind {
                #value_module_::NumberKind::#kind
            }

            fn repr(&self) -> #value_module_::Number {
                match self {
                    #(Self::#variants => #value_module_::Number::#kind(Self::#variants as #repr),)*
                }
            }

            fn set_repr(&mut self, repr: #value_module_::Number) -> bool {
                let #value_module_::Number::#kind(repr) = repr else {
                    return false;
                };
                #(
                    if repr == Self::#variants as #repr {
                        *self = Self::#variants;
                        return true;
                    }
                )*
                false
            }
        }
    })
}
