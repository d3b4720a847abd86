use proc_macro::TokenStream;

mod bind;

/// Derive an implementation of `pavex_bind::Bind`.
///
/// Check out the documentation of `pavex_bind::Bind` for the supported attributes.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive_bind(input)
}
