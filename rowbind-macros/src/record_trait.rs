use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{ItemStruct, parse_quote, spanned::Spanned};

pub(crate) fn record_trait(item: &ItemStruct, fields: &[FieldMetadata]) -> TokenStream {
    let struct_name = &item.ident;
    let mut generics = item.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::rowbind::Scalar));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let arity = fields.len();
    let field_defs = fields.iter().map(|f| {
        let ty = &f.ty;
        let name = &f.name;
        quote_spanned!(ty.span()=> ::rowbind::FieldDef::of::<#ty>(#name))
    });
    let read_fields = fields.iter().enumerate().map(|(i, f)| {
        let member = &f.member;
        let ty = &f.ty;
        let read = quote_spanned!(ty.span()=> <#ty as ::rowbind::Scalar>::read(row, offsets[#i], config));
        quote!(#member: #read?)
    });
    let write_fields = fields.iter().enumerate().map(|(i, f)| {
        let member = &f.member;
        let ty = &f.ty;
        let write = quote_spanned! {ty.span()=>
            <#ty as ::rowbind::Scalar>::write(&self.#member, statement, offsets[#i], config)
        };
        quote! {
            if offsets[#i] != 0 {
                #write?;
            }
        }
    });
    quote! {
        impl #impl_generics ::rowbind::Record for #struct_name #ty_generics #where_clause {
            const ARITY: usize = #arity;

            fn fields() -> ::std::boxed::Box<[::rowbind::FieldDef]> {
                let fields: ::std::vec::Vec<::rowbind::FieldDef> = ::std::vec![#(#field_defs),*];
                fields.into_boxed_slice()
            }

            #[allow(unused_variables)]
            fn read_offsets<R: ::rowbind::Row + ?Sized>(
                row: &R,
                offsets: &[usize],
                config: &::rowbind::BindConfig,
            ) -> ::rowbind::Result<Self> {
                ::rowbind::check_offsets::<Self>(offsets)?;
                Ok(Self {
                    #(#read_fields,)*
                })
            }

            #[allow(unused_variables)]
            fn write_offsets<S: ::rowbind::Statement + ?Sized>(
                &self,
                statement: &mut S,
                offsets: &[usize],
                config: &::rowbind::BindConfig,
            ) -> ::rowbind::Result<()> {
                ::rowbind::check_offsets::<Self>(offsets)?;
                #(#write_fields)*
                Ok(())
            }
        }
    }
}
