use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::EmitOptions;
use super::naming::{dependencies_name, ident};

/// `{TypeName}Dependencies` registering `configurators` in declaration order.
pub(super) fn emit_dependencies(
    type_name: &str,
    configurators: &[Ident],
    options: &EmitOptions,
) -> TokenStream {
    let support = &options.support_crate;
    let dependencies = dependencies_name(&ident(type_name));
    let doc = format!(" Registers the configurators generated for `{type_name}`.");

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct #dependencies;

        impl #dependencies {
            const CONFIGURATORS: &'static [
                fn() -> ::std::boxed::Box<dyn #support::PropertyConfigurator>
            ] = &[
                #( #support::boxed::<#configurators> ),*
            ];

            /// Adds every configurator not registered yet. Calling it again is a no-op.
            pub fn add_configurators(
                registry: &mut #support::ServiceRegistry,
            ) -> &mut #support::ServiceRegistry {
                for configurator in Self::CONFIGURATORS {
                    registry.try_add_singleton(configurator());
                }
                registry
            }

            /// Fresh configurator instances, in declaration order.
            pub fn configurators() -> impl ::core::iter::Iterator<
                Item = ::std::boxed::Box<dyn #support::PropertyConfigurator>,
            > {
                Self::CONFIGURATORS.iter().map(|configurator| configurator())
            }
        }
    }
}
