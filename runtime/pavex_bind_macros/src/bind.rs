use darling::{
    FromDeriveInput, FromField,
    ast::Data,
    util::{Flag, Ignored},
};
use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, Ident, Type, ext::IdentExt, parse_macro_input, spanned::Spanned};

#[derive(FromDeriveInput)]
#[darling(attributes(bind), supports(struct_any, enum_any))]
struct BindInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<Ignored, BindField>,
    /// The type implements `UnmarshalParam`.
    unmarshal_param: Flag,
    /// The type implements `UnmarshalText`.
    unmarshal_text: Flag,
}

#[derive(FromField)]
#[darling(attributes(bind))]
struct BindField {
    ident: Option<Ident>,
    ty: Type,
    form: Option<String>,
    query: Option<String>,
    param: Option<String>,
    skip: Flag,
}

pub(super) fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_bind(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_bind(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    let input = BindInput::from_derive_input(&input)?;
    reject_invalid_inputs(&input)?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let capabilities = capability_methods(&input);

    let named_fields = match &input.data {
        Data::Struct(fields) if fields.is_struct() => Some(&fields.fields),
        _ => None,
    };
    let Some(fields) = named_fields else {
        // Tuple structs, unit structs and enums are opaque to the binder:
        // they can only be populated via their custom unmarshaling capability.
        return Ok(quote! {
            impl #impl_generics ::pavex_bind::reflect::Bind for #ident #ty_generics #where_clause {
                fn shape(&mut self) -> ::pavex_bind::reflect::Shape<'_> {
                    ::pavex_bind::reflect::Shape::Opaque(::std::any::type_name::<Self>())
                }

                #capabilities
            }
        });
    };

    let bound_fields: Vec<_> = fields.iter().filter(|f| !f.skip.is_present()).collect();
    let field_idents = bound_fields.iter().filter_map(|f| f.ident.as_ref());
    let descriptors = bound_fields.iter().filter_map(|f| {
        let field_ident = f.ident.as_ref()?;
        let name = field_ident.unraw().to_string();
        let ty_span = f.ty.span();
        let tags = [("form", &f.form), ("query", &f.query), ("param", &f.param)]
            .into_iter()
            .filter_map(|(namespace, tag)| {
                let tag = tag.as_ref()?;
                let method = Ident::new(namespace, ty_span);
                Some(quote! { .#method(#tag) })
            });
        Some(quote_spanned! { ty_span =>
            ::pavex_bind::reflect::Field::new(#name, #field_ident) #(#tags)*
        })
    });

    Ok(quote! {
        impl #impl_generics ::pavex_bind::reflect::Bind for #ident #ty_generics #where_clause {
            fn shape(&mut self) -> ::pavex_bind::reflect::Shape<'_> {
                ::pavex_bind::reflect::Shape::Record(self)
            }

            #capabilities
        }

        impl #impl_generics ::pavex_bind::reflect::Record for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::pavex_bind::reflect::Field<'_>> {
                let Self { #(#field_idents,)* .. } = self;
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

fn capability_methods(input: &BindInput) -> proc_macro2::TokenStream {
    let param = input.unmarshal_param.is_present().then(|| {
        quote! {
            fn as_unmarshal_param(&mut self) -> ::std::option::Option<&mut dyn ::pavex_bind::UnmarshalParam> {
                ::std::option::Option::Some(self)
            }
        }
    });
    let text = input.unmarshal_text.is_present().then(|| {
        quote! {
            fn as_unmarshal_text(&mut self) -> ::std::option::Option<&mut dyn ::pavex_bind::UnmarshalText> {
                ::std::option::Option::Some(self)
            }
        }
    });
    quote! { #param #text }
}

fn reject_invalid_inputs(input: &BindInput) -> Result<(), darling::Error> {
    let ident = &input.ident;
    if let Some(generic) = input.generics.type_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to types with generic type parameters, such as `{ident}`.\n\n\
            help: Consider using concrete types instead. Alternatively, implement `Bind` for `{ident}` by hand.",
        ))
        .with_span(generic));
    }

    let is_record = matches!(&input.data, Data::Struct(fields) if fields.is_struct());
    let has_capability = input.unmarshal_param.is_present() || input.unmarshal_text.is_present();
    if !is_record && !has_capability {
        return Err(darling::Error::custom(format!(
            "`{ident}` has no named fields, therefore the binder can only populate it via a custom unmarshaling capability.\n\n\
            help: Implement `UnmarshalParam` for `{ident}` and add `#[bind(unmarshal_param)]`, \
            or implement `UnmarshalText` and add `#[bind(unmarshal_text)]`.",
        ))
        .with_span(ident));
    }

    if let Data::Struct(fields) = &input.data {
        let mut errors = darling::Error::accumulator();
        for field in fields.iter() {
            let has_tags = field.form.is_some() || field.query.is_some() || field.param.is_some();
            if field.skip.is_present() && has_tags {
                errors.push(
                    darling::Error::custom(
                        "A skipped field can't have source names.\n\n\
                        help: Remove either `skip` or the `form`/`query`/`param` source names.",
                    )
                    .with_span(&field.ty),
                );
            }
            if !is_record && (has_tags || field.skip.is_present()) {
                errors.push(
                    darling::Error::custom(
                        "`#[bind(...)]` field attributes are only supported on structs with named fields.",
                    )
                    .with_span(&field.ty),
                );
            }
        }
        errors.finish()?;
    }
    Ok(())
}
