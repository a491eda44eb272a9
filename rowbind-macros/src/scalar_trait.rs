use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

/// Forwards every operation to the only field of the wrapper.
pub(crate) fn scalar_trait(item: &ItemStruct, fields: &[FieldMetadata]) -> TokenStream {
    let [field] = fields else {
        panic!(
            "`Scalar` can only be derived for a struct with exactly one field, `{}` has {}",
            item.ident,
            fields.len()
        );
    };
    let struct_name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let member = &field.member;
    let ty = &field.ty;
    quote! {
        impl #impl_generics ::rowbind::Scalar for #struct_name #ty_generics #where_clause {
            const SQL_TYPE: ::rowbind::SqlType = <#ty as ::rowbind::Scalar>::SQL_TYPE;
            const NULLABLE: bool = <#ty as ::rowbind::Scalar>::NULLABLE;

            fn read_nullable<R: ::rowbind::Row + ?Sized>(
                row: &R,
                index: usize,
                config: &::rowbind::BindConfig,
            ) -> ::rowbind::Result<Option<Self>> {
                Ok(<#ty as ::rowbind::Scalar>::read_nullable(row, index, config)?
                    .map(|v| Self { #member: v }))
            }

            fn write<S: ::rowbind::Statement + ?Sized>(
                &self,
                statement: &mut S,
                index: usize,
                config: &::rowbind::BindConfig,
            ) -> ::rowbind::Result<()> {
                <#ty as ::rowbind::Scalar>::write(&self.#member, statement, index, config)
            }
        }
    }
}
