//! `Describable` derive implementation.
//!
//! # Note
//!
//! The generated code names items through `::replica::...` paths. The
//! `replica` crate declares `extern crate self as replica` so the derive also
//! works inside its own tests.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DataEnum, DeriveInput, Fields, FieldsNamed, LitStr};

use crate::utils::{describable_generics, ContainerOptions, FieldOptions};

/// Main entry point for the Describable derive macro.
pub fn derive_describable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_describable_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_describable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let options = ContainerOptions::parse(&input.attrs)?;
    let generics = describable_generics(&input.generics)?;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let constructor = if options.no_default {
        quote! { info }
    } else {
        quote! { info.with_constructor(::replica::describe::construct_default::<Self>) }
    };

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => record_body(fields, &constructor)?,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Describable derive only supports structs with named fields",
                ))
            }
        },
        Data::Enum(data) => enumeration_body(data, &constructor)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Describable derive does not support unions",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::replica::Describable for #name #ty_generics #where_clause {
            #body

            fn info(&self) -> ::replica::describe::TypeInfo {
                <Self as ::replica::Describable>::type_info()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn ::replica::Describable> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }

            fn present(&self) -> ::core::option::Option<&dyn ::replica::Describable> {
                ::core::option::Option::Some(self)
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn ::replica::Describable>,
            ) -> ::core::result::Result<(), ::replica::FieldCopyError> {
                *self = ::replica::describe::downcast::<Self>(value)?;
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// One exposed field of a record.
struct ExposedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    name: LitStr,
    readable: bool,
    writable: bool,
}

fn record_body(fields: &FieldsNamed, constructor: &TokenStream2) -> syn::Result<TokenStream2> {
    let mut exposed: Vec<ExposedField<'_>> = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let options = FieldOptions::parse(&field.attrs)?;
        if options.skip {
            continue;
        }
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let name = options
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));

        if exposed.iter().any(|other| other.name.value() == name.value()) {
            return Err(syn::Error::new_spanned(
                &name,
                format!("duplicate exposed field name `{}`", name.value()),
            ));
        }

        exposed.push(ExposedField {
            ident,
            ty: &field.ty,
            name,
            readable: options.readable,
            writable: options.writable,
        });
    }

    let descriptors = exposed.iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        let readable = field.readable;
        let writable = field.writable;
        quote! {
            ::replica::describe::FieldInfo::of::<#ty>(#name)
                .readable(#readable)
                .writable(#writable)
        }
    });

    let read_arms = exposed.iter().filter(|f| f.readable).map(|field| {
        let ident = field.ident;
        let name = &field.name;
        quote! { #name => ::core::option::Option::Some(&self.#ident as &dyn ::replica::Describable), }
    });

    let write_arms = exposed.iter().filter(|f| f.writable).map(|field| {
        let ident = field.ident;
        let name = &field.name;
        quote! { #name => ::core::option::Option::Some(&mut self.#ident as &mut dyn ::replica::Describable), }
    });

    Ok(quote! {
        fn type_info() -> ::replica::describe::TypeInfo {
            let info = ::replica::describe::TypeInfo::new::<Self>(
                ::replica::describe::Shape::Record(::std::vec![#(#descriptors),*]),
            );
            #constructor
        }

        fn field(&self, name: &str) -> ::core::option::Option<&dyn ::replica::Describable> {
            match name {
                #(#read_arms)*
                _ => ::core::option::Option::None,
            }
        }

        fn field_mut(
            &mut self,
            name: &str,
        ) -> ::core::option::Option<&mut dyn ::replica::Describable> {
            match name {
                #(#write_arms)*
                _ => ::core::option::Option::None,
            }
        }
    })
}

fn enumeration_body(data: &DataEnum, constructor: &TokenStream2) -> syn::Result<TokenStream2> {
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "Describable derive only supports enums whose variants carry no data",
        ));
    }

    Ok(quote! {
        fn type_info() -> ::replica::describe::TypeInfo {
            let info = ::replica::describe::TypeInfo::new::<Self>(
                ::replica::describe::Shape::Scalar(::replica::describe::ScalarKind::Enumeration),
            );
            #constructor
        }
    })
}
