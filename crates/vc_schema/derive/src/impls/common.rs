use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{Generics, parse_quote};

/// Clones `generics` and bounds every type parameter by `Serializable`.
pub(crate) fn bounded_generics(generics: &Generics, vc_schema_path: &syn::Path) -> Generics {
    let serializable_ = crate::path::serializable_(vc_schema_path);
    let mut generics = generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if !params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ident in params {
            where_clause
                .predicates
                .push(parse_quote!(#ident: #serializable_));
        }
    }
    generics
}

/// Generates `Value` and `Serializable` for `ident`.
///
/// `variant` is the `ValueRef`/`ValueMut` variant the type is viewed as,
/// `classification` the matching `Classification` variant.
pub(crate) fn impl_value(
    ident: &Ident,
    generics: &Generics,
    variant: &str,
    classification: &str,
    vc_schema_path: &syn::Path,
) -> TokenStream {
    let value_ = crate::path::value_(vc_schema_path);
    let serializable_ = crate::path::serializable_(vc_schema_path);
    let classification_ = crate::path::classification_(vc_schema_path);
    let value_module_ = crate::path::value_module_(vc_schema_path);
    let box_ = crate::path::box_(vc_schema_path);

    let variant = Ident::new(variant, proc_macro2::Span::call_site());
    let classification = Ident::new(classification, proc_macro2::Span::call_site());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #value_ for #ident #ty_generics #where_clause {
            #[inline]
            fn value_ref(&self) -> #value_module_::ValueRef<'_> {
                #value_module_::ValueRef::#variant(self)
            }

            #[inline]
            fn value_mut(&mut self) -> #value_module_::ValueMut<'_> {
                #value_module_::ValueMut::#variant(self)
            }

            #[inline]
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(self: #box_<Self>) -> #box_<dyn ::core::any::Any> {
                self
            }
        }

        impl #impl_generics #serializable_ for #ident #ty_generics #where_clause {
            const CLASSIFICATION: #classification_ = #classification_::#classification;
        }
    }
}
