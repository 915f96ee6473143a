use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_row;

#[proc_macro_derive(FromRow, attributes(field))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_row::expand_from_row(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
