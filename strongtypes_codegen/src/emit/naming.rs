//! Names of generated items.

use proc_macro2::{Ident, Span};
use quote::format_ident;

/// Identifier for a name taken from a request, raw when it is a keyword.
pub fn ident(name: &str) -> Ident {
    match syn::parse_str::<Ident>(name) {
        Ok(ident) => ident,
        Err(_) => Ident::new_raw(name, Span::call_site()),
    }
}

/// Configurator of a wrapper (e.g. EntityID -> EntityIDConfigurator)
pub fn configurator_name(wrapper: &Ident) -> Ident {
    format_ident!("{}Configurator", wrapper)
}

/// Registration aggregate of a marked declaration (e.g. SampleIDs -> SampleIDsDependencies)
pub fn dependencies_name(type_name: &Ident) -> Ident {
    format_ident!("{}Dependencies", type_name)
}
