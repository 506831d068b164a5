use proc_macro2::{Ident, Span, TokenStream};

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(
    span: Option<Span>,
    ident: &Ident,
    is_generic: bool,
    vc_schema_path: &syn::Path,
) -> TokenStream {
    let Some(span) = span else {
        return TokenStream::new();
    };
    // Invalid for generic types.
    if is_generic {
        return TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(vc_schema_path);

    quote::quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                #auto_register_::__register::<#ident>
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(
    _: Option<Span>,
    _: &Ident,
    _: bool,
    _: &syn::Path,
) -> TokenStream {
    TokenStream::new()
}
