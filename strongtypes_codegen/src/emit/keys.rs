use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;

use super::naming::{configurator_name, ident};
use super::registration::emit_dependencies;
use super::{EmitOptions, GeneratedUnit};
use crate::request::{KeyRequest, KeySpec};

/// Wrapper, configurator and registration code for a string key request.
pub fn emit_keys(request: &KeyRequest, options: &EmitOptions) -> GeneratedUnit {
    let wrappers: Vec<(Ident, &KeySpec)> = request
        .keys
        .iter()
        .map(|key| (ident(&key.name), key))
        .collect();
    let configurators: Vec<Ident> = wrappers
        .iter()
        .map(|(wrapper, _)| configurator_name(wrapper))
        .collect();

    let items = wrappers.iter().zip(&configurators).map(|((wrapper, key), configurator)| {
        emit_key(wrapper, configurator, key.max_length, request, options)
    });
    let dependencies = emit_dependencies(&request.type_name, &configurators, options);

    GeneratedUnit::new(
        request.unit_name(),
        request.namespace.clone(),
        quote! {
            #( #items )*
            #dependencies
        },
    )
}

fn emit_key(
    wrapper: &Ident,
    configurator: &Ident,
    max_length: u64,
    request: &KeyRequest,
    options: &EmitOptions,
) -> TokenStream {
    let support = &options.support_crate;
    let serde = options.serde_attributes(quote! {
        try_from = "::std::string::String",
        into = "::std::string::String"
    });
    let max_length = Literal::u64_unsuffixed(max_length);
    let type_name = wrapper.to_string();
    let is_unicode = request.is_unicode;
    let is_case_sensitive = request.is_case_sensitive;
    let comparison = if is_case_sensitive {
        quote!(#support::StringComparison::Ordinal)
    } else {
        quote!(#support::StringComparison::OrdinalIgnoreCase)
    };
    let doc = format!(
        " {} string key of at most {max_length} characters, stored as {}.",
        if is_case_sensitive { "Case-sensitive" } else { "Case-insensitive" },
        if is_unicode { "NVARCHAR" } else { "VARCHAR" },
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        #serde
        pub struct #wrapper {
            key_val: ::std::string::String,
        }

        impl #wrapper {
            pub const MAX_LENGTH: usize = #max_length;
            pub const COMPARISON: #support::StringComparison = #comparison;

            /// Fails when `key_val` is longer than [`Self::MAX_LENGTH`] characters.
            pub fn new(
                key_val: impl ::core::convert::Into<::std::string::String>,
            ) -> ::core::result::Result<Self, #support::KeyLengthError> {
                let key_val = key_val.into();
                Self::check(&key_val)?;
                ::core::result::Result::Ok(Self { key_val })
            }

            /// A missing value becomes the empty key.
            pub fn from_option(
                key_val: ::core::option::Option<::std::string::String>,
            ) -> ::core::result::Result<Self, #support::KeyLengthError> {
                let key_val: ::std::string::String = key_val.unwrap_or_default();
                Self::new(key_val)
            }

            pub fn key_val(&self) -> &str {
                &self.key_val
            }

            pub fn as_str(&self) -> &str {
                &self.key_val
            }

            pub fn into_inner(self) -> ::std::string::String {
                self.key_val
            }

            /// Replaces the value; on error the current value is kept.
            pub fn set_key_val(
                &mut self,
                key_val: impl ::core::convert::Into<::std::string::String>,
            ) -> ::core::result::Result<(), #support::KeyLengthError> {
                let key_val = key_val.into();
                Self::check(&key_val)?;
                self.key_val = key_val;
                ::core::result::Result::Ok(())
            }

            fn check(key_val: &str) -> ::core::result::Result<(), #support::KeyLengthError> {
                #support::key::check_length(#type_name, key_val, Self::MAX_LENGTH)
            }
        }

        impl ::core::cmp::PartialEq for #wrapper {
            fn eq(&self, other: &Self) -> bool {
                Self::COMPARISON.equals(&self.key_val, &other.key_val)
            }
        }

        impl ::core::cmp::Eq for #wrapper {}

        impl ::core::hash::Hash for #wrapper {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                Self::COMPARISON.hash_str(&self.key_val, state);
            }
        }

        impl ::core::cmp::PartialOrd for #wrapper {
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some(::core::cmp::Ord::cmp(self, other))
            }
        }

        impl ::core::cmp::Ord for #wrapper {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                Self::COMPARISON.compare(&self.key_val, &other.key_val)
            }
        }

        impl ::core::fmt::Display for #wrapper {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(f, "{} {{ key_val = {:?} }}", #type_name, self.key_val)
            }
        }

        impl ::core::convert::AsRef<str> for #wrapper {
            fn as_ref(&self) -> &str {
                &self.key_val
            }
        }

        impl ::core::convert::From<#wrapper> for ::std::string::String {
            fn from(value: #wrapper) -> Self {
                value.key_val
            }
        }

        impl ::core::convert::TryFrom<::std::string::String> for #wrapper {
            type Error = #support::KeyLengthError;

            fn try_from(
                key_val: ::std::string::String,
            ) -> ::core::result::Result<Self, Self::Error> {
                Self::new(key_val)
            }
        }

        impl ::core::convert::TryFrom<&str> for #wrapper {
            type Error = #support::KeyLengthError;

            fn try_from(key_val: &str) -> ::core::result::Result<Self, Self::Error> {
                Self::new(key_val)
            }
        }

        impl ::core::str::FromStr for #wrapper {
            type Err = #support::KeyLengthError;

            fn from_str(key_val: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::new(key_val)
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct #configurator {
            collation: ::std::string::String,
        }

        impl #configurator {
            pub const MAX_LENGTH: usize = #wrapper::MAX_LENGTH;
            pub const IS_UNICODE: bool = #is_unicode;
            pub const IS_CASE_SENSITIVE: bool = #is_case_sensitive;

            pub fn with_collation(
                collation: impl ::core::convert::Into<::std::string::String>,
            ) -> Self {
                Self {
                    collation: collation.into(),
                }
            }
        }

        impl #support::ValueConverter for #configurator {
            type Model = #wrapper;
            type Provider = ::std::string::String;
            type Error = #support::KeyLengthError;

            fn convert_to_provider(&self, model: &#wrapper) -> ::std::string::String {
                ::std::string::ToString::to_string(model.key_val())
            }

            fn convert_from_provider(
                &self,
                provider: ::std::string::String,
            ) -> ::core::result::Result<#wrapper, #support::KeyLengthError> {
                #wrapper::new(provider)
            }
        }

        impl #support::PropertyConfigurator for #configurator {
            fn convert_type(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<#wrapper>()
            }

            fn convert_type_name(&self) -> &'static str {
                ::core::any::type_name::<#wrapper>()
            }

            fn converter(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<Self>()
            }

            fn converter_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn configure_properties<'a>(
                &self,
                builder: &'a mut #support::ModelConfigurationBuilder,
            ) -> #support::PropertiesConfigurationBuilder<'a> {
                let properties = builder
                    .properties::<#wrapper>()
                    .are_unicode(Self::IS_UNICODE)
                    .have_max_length(Self::MAX_LENGTH)
                    .have_conversion::<Self>();
                if self.collation.trim().is_empty() {
                    properties
                } else {
                    properties
                        .have_annotation(#support::COLLATION_ANNOTATION, self.collation.clone())
                }
            }

            fn as_collation(&self) -> ::core::option::Option<&dyn #support::PropertyCollation> {
                ::core::option::Option::Some(self)
            }

            fn as_collation_mut(
                &mut self,
            ) -> ::core::option::Option<&mut dyn #support::PropertyCollation> {
                ::core::option::Option::Some(self)
            }
        }

        impl #support::PropertyCollation for #configurator {
            fn is_case_sensitive(&self) -> bool {
                Self::IS_CASE_SENSITIVE
            }

            fn is_unicode(&self) -> bool {
                Self::IS_UNICODE
            }

            fn max_length(&self) -> usize {
                Self::MAX_LENGTH
            }

            fn collation(&self) -> &str {
                &self.collation
            }

            fn set_collation(&mut self, collation: ::std::string::String) {
                self.collation = collation;
            }
        }
    }
}
