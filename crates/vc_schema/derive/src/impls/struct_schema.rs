use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member};

use crate::attributes::{FieldAttributes, TypeAttributes};

/// A field that takes part in the schema.
struct SchemaMember {
    member: Member,
    name: String,
    parent: bool,
}

fn collect_members(fields: &Fields) -> syn::Result<Vec<SchemaMember>> {
    let mut members = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttributes::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let (member, default_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };
        members.push(SchemaMember {
            member,
            name: attrs.rename.map_or(default_name, |lit| lit.value()),
            parent: attrs.parent,
        });
    }
    Ok(members)
}

/// Implements `Value`, `Serializable` and, unless `manual`, `Registered`
/// for a struct.
pub(crate) fn impl_struct_schema(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Schema` can only be derived for structs, use `Enumeration` for field-less enums",
        ));
    };
    if let Some(lifetime) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`Schema` types must be `'static` and cannot have lifetime parameters",
        ));
    }

    let attrs = TypeAttributes::parse(&ast.attrs)?;
    let members = collect_members(&data.fields)?;

    let vc_schema_path = crate::path::vc_schema();
    let ident = &ast.ident;
    let generics = super::bounded_generics(&ast.generics, &vc_schema_path);
    let is_generic = !ast.generics.params.is_empty();

    let value_impl = super::impl_value(ident, &generics, "Composite", "Composite", &vc_schema_path);

    if attrs.manual {
        return Ok(value_impl);
    }

    let registered_ = crate::path::registered_(&vc_schema_path);
    let schema_ = crate::path::schema_(&vc_schema_path);

    let steps = members.iter().map(|m| {
        let member = &m.member;
        if m.parent {
            quote! { .parent(|o| &o.#member, |o| &mut o.#member) }
        } else {
            quote! { .field(|o| &o.#member, |o| &mut o.#member) }
        }
    });

    let own_names: Vec<&str> = members
        .iter()
        .filter(|m| !m.parent)
        .map(|m| m.name.as_str())
        .collect();
    let names = if attrs.nameless || own_names.is_empty() {
        TokenStream::new()
    } else {
        quote! { .names([#(#own_names),*]) }
    };

    let build = quote! {
        #schema_::builder::<Self>()
            #(#steps)*
            #names
            .build()
    };

    let body = if is_generic {
        let cell_ = crate::path::generic_schema_cell_(&vc_schema_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #build)
        }
    } else {
        let cell_ = crate::path::schema_cell_(&vc_schema_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #build)
        }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let auto_register = super::get_auto_register_impl(
        attrs.auto_register,
        ident,
        is_generic,
        &vc_schema_path,
    );

    Ok(quote! {
        #value_impl

        impl #impl_generics #registered_ for #ident #ty_generics #where_clause {
            fn schema() -> &'static #schema_ {
                #body
            }
        }

        #auto_register
    })
}
