//! Attribute parsing shared by the derive implementation.

use syn::{parse_quote, Attribute, Generics, LitStr};

/// Options from `#[describe(...)]` on the type itself.
#[derive(Default)]
pub struct ContainerOptions {
    pub no_default: bool,
}

impl ContainerOptions {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("describe")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("no_default") {
                    options.no_default = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported container attribute, expected `no_default`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Options from `#[describe(...)]` on a single field.
pub struct FieldOptions {
    pub skip: bool,
    pub readable: bool,
    pub writable: bool,
    pub rename: Option<LitStr>,
}

impl FieldOptions {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self {
            skip: false,
            readable: true,
            writable: true,
            rename: None,
        };
        for attr in attrs.iter().filter(|a| a.path().is_ident("describe")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("readonly") {
                    options.writable = false;
                } else if meta.path.is_ident("writeonly") {
                    options.readable = false;
                } else if meta.path.is_ident("rename") {
                    options.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unsupported field attribute, expected `skip`, `readonly`, `writeonly` or `rename`",
                    ));
                }
                Ok(())
            })?;
        }
        if !options.readable && !options.writable {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "a field cannot be both `readonly` and `writeonly`; use `skip`",
            ));
        }
        Ok(options)
    }
}

/// Reject lifetime parameters and bound every type parameter by
/// `Describable + Clone`, which the generated impl relies on.
pub fn describable_generics(generics: &Generics) -> syn::Result<Generics> {
    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Describable derive does not support lifetime parameters",
        ));
    }

    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(parse_quote!(::replica::Describable));
        param.bounds.push(parse_quote!(::core::clone::Clone));
    }
    Ok(generics)
}
