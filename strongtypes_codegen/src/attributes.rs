//! Arguments of the key marker: `#[strong_keys(unicode, case_sensitive = false)]`.

use proc_macro2::TokenStream;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Attribute, LitBool, Meta};

/// Storage options shared by every key of a `#[strong_keys]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyOptions {
    pub is_unicode: bool,
    pub is_case_sensitive: bool,
}

impl KeyOptions {
    pub fn new(is_unicode: bool, is_case_sensitive: bool) -> Self {
        Self {
            is_unicode,
            is_case_sensitive,
        }
    }

    /// Parses the argument list of the marker, without the parentheses.
    pub fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut options = Self::default();
        let parser = syn::meta::parser(|meta| options.apply(meta));
        parser.parse2(args)?;
        Ok(options)
    }

    /// Reads the options of a marker attribute. A bare `#[strong_keys]`
    /// yields the defaults.
    pub fn from_attribute(attr: &Attribute) -> syn::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            Meta::List(_) => {
                let mut options = Self::default();
                attr.parse_nested_meta(|meta| options.apply(meta))?;
                Ok(options)
            }
            Meta::NameValue(name_value) => Err(syn::Error::new_spanned(
                name_value,
                "expected `strong_keys` or `strong_keys(unicode, case_sensitive)`",
            )),
        }
    }

    fn apply(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("unicode")
            || meta.path.is_ident("is_unicode")
            || meta.path.is_ident("is_unicode_storage")
        {
            self.is_unicode = flag_value(&meta)?;
            Ok(())
        } else if meta.path.is_ident("case_sensitive") || meta.path.is_ident("is_case_sensitive") {
            self.is_case_sensitive = flag_value(&meta)?;
            Ok(())
        } else {
            Err(meta.error("unsupported key option, expected `unicode` or `case_sensitive`"))
        }
    }
}

/// `flag` alone means true; `flag = bool` sets it explicitly.
fn flag_value(meta: &ParseNestedMeta<'_>) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let value: LitBool = meta.value()?.parse()?;
        Ok(value.value)
    } else {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(KeyOptions::parse(TokenStream::new()).unwrap(), KeyOptions::default());
    }

    #[test]
    fn test_flags_and_values() {
        let options = KeyOptions::parse(quote!(unicode, case_sensitive = false)).unwrap();
        assert_eq!(options, KeyOptions::new(true, false));

        let options =
            KeyOptions::parse(quote!(is_unicode_storage = true, is_case_sensitive)).unwrap();
        assert_eq!(options, KeyOptions::new(true, true));
    }

    #[test]
    fn test_unknown_option_is_error() {
        let error = KeyOptions::parse(quote!(unicode, max_length = 4)).unwrap_err();
        assert!(error.to_string().contains("unsupported key option"));
    }

    #[test]
    fn test_from_attribute() {
        let bare: Attribute = parse_quote!(#[strong_keys]);
        assert_eq!(KeyOptions::from_attribute(&bare).unwrap(), KeyOptions::default());

        let list: Attribute = parse_quote!(#[strongtypes::strong_keys(case_sensitive)]);
        assert_eq!(KeyOptions::from_attribute(&list).unwrap(), KeyOptions::new(false, true));

        let name_value: Attribute = parse_quote!(#[strong_keys = "unicode"]);
        assert!(KeyOptions::from_attribute(&name_value).is_err());
    }
}
