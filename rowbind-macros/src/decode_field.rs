use quote::ToTokens;
use syn::{
    Field, Fields, Index, ItemStruct, LitStr, Member, Type, ext::IdentExt, parse::ParseBuffer,
};

pub(crate) struct FieldMetadata {
    pub(crate) member: Member,
    pub(crate) ty: Type,
    pub(crate) name: String,
}

pub(crate) fn decode_fields(item: &ItemStruct) -> Vec<FieldMetadata> {
    match &item.fields {
        Fields::Named(..) | Fields::Unnamed(..) => item
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| decode_field(i, f))
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

fn decode_field(index: usize, field: &Field) -> FieldMetadata {
    let (member, name) = match &field.ident {
        Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
        None => (Member::Unnamed(Index::from(index)), index.to_string()),
    };
    let mut metadata = FieldMetadata {
        member,
        ty: field.ty.clone(),
        name,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("rowbind") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `rowbind`, use it like: `#[rowbind(attribute = value, ...)]`"
                );
            };
            let parsed = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[rowbind(name = \"my_column\")]`"
                        );
                    };
                    metadata.name = v.value();
                } else {
                    panic!(
                        "Unknown attribute `{}` inside rowbind macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
            if let Err(e) = parsed {
                panic!(
                    "Error while parsing `rowbind` ({}), use it like: `#[rowbind(attribute = value, ...)]`",
                    e
                );
            }
        }
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::decode_fields;
    use syn::{ItemStruct, parse_quote};

    #[test]
    fn field_names() {
        let item: ItemStruct = parse_quote! {
            struct Customer {
                id: i64,
                #[rowbind(name = "full_name")]
                name: String,
                r#type: i32,
            }
        };
        let fields = decode_fields(&item);
        assert_eq!(
            fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["id", "full_name", "type"]
        );
        let item: ItemStruct = parse_quote! {
            struct Pair(i32, #[rowbind(name = "second")] String);
        };
        let fields = decode_fields(&item);
        assert_eq!(fields[0].name, "0");
        assert_eq!(fields[1].name, "second");
    }

    #[test]
    #[should_panic(expected = "Error while parsing `rowbind`")]
    fn malformed_attribute() {
        let item: ItemStruct = parse_quote! {
            struct Customer {
                #[rowbind(name = "a" "b")]
                name: String,
            }
        };
        decode_fields(&item);
    }

    #[test]
    #[should_panic(expected = "Unknown attribute `size`")]
    fn unknown_attribute() {
        let item: ItemStruct = parse_quote! {
            struct Customer {
                #[rowbind(size = 3)]
                name: String,
            }
        };
        decode_fields(&item);
    }
}
