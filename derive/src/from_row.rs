use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitInt, Result, Token,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_row(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromRow` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromRow` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    let mut indexes = HashSet::new();

    for field in &fields {
        if let Some(column) = &field.column {
            if !indexes.insert(column.index) {
                Err(Error::new(
                    column.literal.span(),
                    "Column indexes must be unique.",
                ))?
            }
        }
    }

    let initializers = fields.iter().map(|field| {
        let name = &field.name;

        let Some(column) = &field.column else {
            // Skip fields without an attribute.
            return quote! { #name: Default::default() };
        };

        let index = column.index;

        if let Some(converter) = &column.converter {
            quote! {
                #name: (#converter)(
                    fields.get(#index).ok_or(RowError::Missing(#index))?.as_str(),
                )
                .map_err(|err| RowError::invalid(#index, err))?
            }
        } else {
            quote! {
                #name: fields
                    .get(#index)
                    .ok_or(RowError::Missing(#index))?
                    .parse()
                    .map_err(|err| RowError::invalid(#index, err))?
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl FromRow for #name {
            fn from_row(fields: &[String]) -> Result<Self, RowError> {
                Ok(Self {
                    #(#initializers,)*
                })
            }
        }
    };

    Ok(expanded.into())
}

struct FieldMetadata {
    name: Ident,
    column: Option<Column>,
}

struct Column {
    index: usize,
    literal: LitInt,
    converter: Option<ExprClosure>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(Self { name, column: None });
        };

        let FieldAttribute { literal, converter } = attr.meta.require_list()?.parse_args()?;

        let index = literal.base10_parse()?;

        if let Some(converter) = &converter {
            if converter.inputs.len() != 1 {
                Err(Error::new_spanned(
                    converter,
                    "Converter closure must have one parameter.",
                ))?
            }
        }

        Ok(Self {
            name,
            column: Some(Column {
                index,
                literal,
                converter,
            }),
        })
    }
}

struct FieldAttribute {
    literal: LitInt,
    converter: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let literal = input.parse::<LitInt>()?;

        let converter = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { literal, converter })
    }
}
