use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type};

/// What the expansion needs to know about a single variant.
struct VariantInfo<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<&'a Attribute>,
}

pub fn expand_error(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "stagehand_error can only be applied to enums")
            .to_compile_error();
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match inspect_variant(variant) {
            Ok(info) => variants.push(info),
            Err(err) => return err.to_compile_error(),
        }
    }

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(&input.attrs);
    let ext_trait = context_trait(name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(name, &ext, v));
    let internal_impls = internal_impls(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn inspect_variant(variant: &syn::Variant) -> Result<VariantInfo<'_>, syn::Error> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "stagehand_error requires named fields for source/context handling",
        ));
    };

    let mut has_context = false;
    let mut source = None;
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if ident == "context" {
            if !is_cow_context(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "context field must be Option<Cow<'static, str>>",
                ));
            }
            has_context = true;
        } else if source.is_none() && is_source_field(ident, field) {
            source = Some((ident, &field.ty));
        }
    }

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "stagehand_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        ));
    }

    Ok(VariantInfo {
        ident: &variant.ident,
        source,
        has_context,
        cfg_attrs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
    })
}

fn is_source_field(ident: &Ident, field: &Field) -> bool {
    ident == "source"
        || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                present.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg_attrs = &v.cfg_attrs;
        quote! { #(#cfg_attrs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            /// Attaches a human-readable context to the error side of the result.
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, v: &VariantInfo<'_>) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let (field, ty) = v.source?;
    let ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfg_attrs)*
        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return quote! {};
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None }
            }
        }

        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(s), context: None }
            }
        }
    }
}

/// Matches `Option<Cow<'static, str>>` by the last path segment of each layer.
fn is_cow_context(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(cow) = inner else {
        return false;
    };
    let Some(segment) = cow.path.segments.last() else {
        return false;
    };
    if segment.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    static_lifetime && str_type
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
