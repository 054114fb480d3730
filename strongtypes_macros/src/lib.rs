use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, ItemEnum, ItemImpl};

use strongtypes_codegen::attributes::KeyOptions;
use strongtypes_codegen::declaration::{Declaration, DeclarationId};
use strongtypes_codegen::emit::{EmitOptions, emit_ids, emit_keys};
use strongtypes_codegen::extract::{ExtractOptions, extract_id_request, extract_key_request};

/// Generates a numeric ID wrapper for every unit variant of an enum.
///
/// The wrappers hold the enum's integral `#[repr(..)]` type, or `i32` when
/// there is none. Alongside each wrapper `{Variant}` the macro generates a
/// `{Variant}Configurator`, and for the enum a `{Enum}Dependencies` type
/// that registers all configurators.
///
/// The enum itself is left unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use strongtypes::{ModelConfigurationBuilder, ServiceRegistry, strong_ids};
///
/// #[strong_ids]
/// #[repr(u64)]
/// pub enum OrderIDs {
///     OrderID,
///     LineID,
/// }
///
/// let order = OrderID::new(7);
/// assert_eq!(order.id(), 7u64);
/// assert_eq!(order.to_string(), "7");
///
/// let mut services = ServiceRegistry::new();
/// OrderIDsDependencies::add_configurators(&mut services);
/// assert_eq!(services.len(), 2);
/// ```
///
/// Variants with fields have no constant value and are skipped.
#[proc_macro_attribute]
pub fn strong_ids(args: TokenStream, input: TokenStream) -> TokenStream {
    expand_ids(args.into(), input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generates a length-checked string key wrapper for every integer constant
/// of an inherent `impl` block.
///
/// Each constant's value is the key's maximum length in characters and its
/// name, in UpperCamelCase, names the wrapper (`NAME_STRING` becomes
/// `NameString`).
///
/// # Arguments
///
/// - `unicode` - keys are stored as Unicode (wide) strings
/// - `case_sensitive` - keys compare ordinally; otherwise ordinal ignoring case
///
/// Both accept `= true`/`= false` and default to `false`.
///
/// # Examples
///
/// ```rust,ignore
/// use strongtypes::strong_keys;
///
/// pub struct CommonKeys;
///
/// #[strong_keys(unicode)]
/// impl CommonKeys {
///     pub const CODE_STRING: usize = 4;
/// }
///
/// let code = CodeString::new("ab12").unwrap();
/// assert_eq!(code, CodeString::new("AB12").unwrap());
/// assert!(CodeString::new("abcde").is_err());
/// ```
#[proc_macro_attribute]
pub fn strong_keys(args: TokenStream, input: TokenStream) -> TokenStream {
    expand_keys(args.into(), input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_ids(
    args: proc_macro2::TokenStream,
    input: proc_macro2::TokenStream,
) -> syn::Result<proc_macro2::TokenStream> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(args, "`strong_ids` takes no arguments"));
    }
    let item: Item = syn::parse2(input)?;
    let Item::Enum(ItemEnum { ident, .. }) = &item else {
        return Err(syn::Error::new_spanned(
            &item,
            "`strong_ids` can only be applied to an enum",
        ));
    };

    let id = DeclarationId::inline(ident.to_string());
    let declaration = Declaration::from_item(id, Vec::new(), &item);
    let request = extract_id_request(&declaration, &ExtractOptions::default())
        .ok_or_else(|| syn::Error::new_spanned(ident, "`strong_ids` could not read this enum"))?;
    let generated = emit_ids(&request, &EmitOptions::default()).tokens();

    Ok(quote! {
        #item
        #generated
    })
}

fn expand_keys(
    args: proc_macro2::TokenStream,
    input: proc_macro2::TokenStream,
) -> syn::Result<proc_macro2::TokenStream> {
    let options = KeyOptions::parse(args)?;
    let item: Item = syn::parse2(input)?;
    let Item::Impl(ItemImpl {
        trait_: None, self_ty, ..
    }) = &item
    else {
        return Err(syn::Error::new_spanned(
            &item,
            "`strong_keys` can only be applied to an inherent impl block",
        ));
    };

    let id = DeclarationId::inline(quote!(#self_ty).to_string());
    let declaration = Declaration::from_item(id, Vec::new(), &item);
    let request = extract_key_request(&declaration, &options).ok_or_else(|| {
        syn::Error::new_spanned(self_ty, "`strong_keys` needs an impl of a named type")
    })?;
    let generated = emit_keys(&request, &EmitOptions::default()).tokens();

    Ok(quote! {
        #item
        #generated
    })
}
