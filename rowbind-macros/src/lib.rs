mod decode_field;
mod record_trait;
mod scalar_trait;

use decode_field::decode_fields;
use proc_macro::TokenStream;
use record_trait::record_trait;
use scalar_trait::scalar_trait;
use syn::{ItemStruct, parse_macro_input};

/// Implements `Record`: field `i` reads from column `offsets[i]` and binds
/// to parameter `offsets[i]`, in declaration order.
///
/// A field can be renamed with `#[rowbind(name = "column")]`, the name is
/// only used when matching columns by label.
#[proc_macro_derive(Record, attributes(rowbind))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let fields = decode_fields(&item);
    record_trait(&item, &fields).into()
}

/// Implements `Scalar` for a struct wrapping a single scalar field.
#[proc_macro_derive(Scalar)]
pub fn derive_scalar(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let fields = decode_fields(&item);
    scalar_trait(&item, &fields).into()
}
