use crate::macros::util::derived_trait_names;
use fxhash::FxHashSet;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemStruct, Lit, LitStr, Meta, MetaNameValue};

const DEFAULT_RENAME: &str = "camelCase";

/// Expands the `#[api_model]` attribute macro.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match expand(args, &input) {
        Ok(attrs) => quote! {
            #attrs
            #input
        },
        Err(err) => err.to_compile_error(),
    }
}

fn expand(args: TokenStream, input: &ItemStruct) -> Result<TokenStream, syn::Error> {
    let args = ApiModelArgs::parse(args)?;
    let existing = SerdeAttrs::collect(&input.attrs)?;

    let derives = derive_attr(&derived_trait_names(&input.attrs));

    let rename_all =
        args.rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));
    let rename = match &existing.rename_all {
        Some(current) if current.value() != rename_all.value() => {
            return Err(syn::Error::new_spanned(
                current,
                "Conflicting serde rename_all; remove it or pass api_model(rename_all = \"...\")",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename_all)] },
    };

    let deny = match (args.deny_unknown_fields, existing.deny_unknown_fields) {
        (Some(false), true) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        },
        (Some(true), false) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    let default = if existing.default { quote! {} } else { quote! { #[serde(default)] } };

    Ok(quote! {
        #derives
        #rename
        #deny
        #default
    })
}

struct ApiModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

impl ApiModelArgs {
    fn parse(args: TokenStream) -> Result<Self, syn::Error> {
        let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
        let mut parsed = Self { rename_all: None, deny_unknown_fields: None };

        for meta in parser.parse2(args)? {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new_spanned(
                    meta,
                    "Expected name-value arguments like `rename_all = \"...\"`",
                ));
            };

            if nv.path.is_ident("rename_all") {
                let Lit::Str(value) = literal(&nv, "rename_all")? else {
                    return Err(syn::Error::new_spanned(&nv.value, "rename_all must be a string"));
                };
                set_once(&mut parsed.rename_all, &nv, value.clone())?;
            } else if nv.path.is_ident("deny_unknown_fields") {
                let Lit::Bool(value) = literal(&nv, "deny_unknown_fields")? else {
                    return Err(syn::Error::new_spanned(
                        &nv.value,
                        "deny_unknown_fields must be a boolean",
                    ));
                };
                set_once(&mut parsed.deny_unknown_fields, &nv, value.value)?;
            } else {
                return Err(syn::Error::new_spanned(
                    &nv.path,
                    "Unsupported argument; expected rename_all or deny_unknown_fields",
                ));
            }
        }

        Ok(parsed)
    }
}

fn literal<'a>(nv: &'a MetaNameValue, label: &str) -> Result<&'a Lit, syn::Error> {
    match &nv.value {
        syn::Expr::Lit(expr) => Ok(&expr.lit),
        other => Err(syn::Error::new_spanned(other, format!("{label} must be a literal"))),
    }
}

fn set_once<T>(slot: &mut Option<T>, token: &MetaNameValue, value: T) -> Result<(), syn::Error> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(token, "Duplicate argument"));
    }
    *slot = Some(value);
    Ok(())
}

/// Serde container attributes already present on the struct.
struct SerdeAttrs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
    default: bool,
}

impl SerdeAttrs {
    fn collect(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut found = Self { rename_all: None, deny_unknown_fields: false, default: false };

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    found.rename_all = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("deny_unknown_fields") {
                    found.deny_unknown_fields = true;
                } else if meta.path.is_ident("default") {
                    found.default = true;
                    if meta.input.peek(syn::Token![=]) {
                        let _: syn::Expr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // Other container attributes are left to serde; consume their value.
                    let _: syn::Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }

        Ok(found)
    }
}

fn derive_attr(present: &FxHashSet<String>) -> TokenStream {
    let wanted = [
        ("Debug", quote! { Debug }),
        ("Clone", quote! { Clone }),
        ("Default", quote! { Default }),
        ("PartialEq", quote! { PartialEq }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ];
    let missing: Vec<_> = wanted
        .into_iter()
        .filter(|(name, _)| !present.contains(*name))
        .map(|(_, tokens)| tokens)
        .collect();

    if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } }
}
