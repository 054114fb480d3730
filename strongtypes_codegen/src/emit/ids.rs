use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::naming::{configurator_name, ident};
use super::registration::emit_dependencies;
use super::{EmitOptions, GeneratedUnit};
use crate::request::IdRequest;

/// Wrapper, configurator and registration code for a numeric ID request.
pub fn emit_ids(request: &IdRequest, options: &EmitOptions) -> GeneratedUnit {
    let integral = ident(&request.integral_type_name);
    let wrappers: Vec<Ident> = request.id_names.iter().map(|name| ident(name)).collect();
    let configurators: Vec<Ident> = wrappers.iter().map(configurator_name).collect();

    let items = wrappers
        .iter()
        .zip(&configurators)
        .map(|(wrapper, configurator)| emit_id(wrapper, configurator, &integral, options));
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

fn emit_id(
    wrapper: &Ident,
    configurator: &Ident,
    integral: &Ident,
    options: &EmitOptions,
) -> TokenStream {
    let support = &options.support_crate;
    let serde = options.serde_attributes(quote!(transparent));
    let doc = format!(" Strongly typed `{integral}` identifier.");

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #serde
        pub struct #wrapper {
            id: #integral,
        }

        impl #wrapper {
            pub const fn new(id: #integral) -> Self {
                Self { id }
            }

            pub const fn id(self) -> #integral {
                self.id
            }
        }

        impl ::core::fmt::Display for #wrapper {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.id, f)
            }
        }

        impl ::core::convert::From<#integral> for #wrapper {
            fn from(id: #integral) -> Self {
                Self::new(id)
            }
        }

        impl ::core::convert::From<#wrapper> for #integral {
            fn from(value: #wrapper) -> Self {
                value.id
            }
        }

        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct #configurator;

        impl #support::ValueConverter for #configurator {
            type Model = #wrapper;
            type Provider = #integral;
            type Error = ::core::convert::Infallible;

            fn convert_to_provider(&self, model: &#wrapper) -> #integral {
                model.id()
            }

            fn convert_from_provider(
                &self,
                provider: #integral,
            ) -> ::core::result::Result<#wrapper, ::core::convert::Infallible> {
                ::core::result::Result::Ok(#wrapper::new(provider))
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
                builder.properties::<#wrapper>().have_conversion::<Self>()
            }
        }
    }
}
