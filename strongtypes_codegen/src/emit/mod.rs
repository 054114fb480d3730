//! Code emission for generation requests.
//!
//! Emission is a pure function of the request and the [`EmitOptions`]: the
//! same inputs always produce the same tokens, which keeps generated files
//! stable across builds.

mod ids;
mod keys;
pub mod naming;
mod registration;

pub use ids::emit_ids;
pub use keys::emit_keys;

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::error::{CodegenError, CodegenResult};
use crate::request::GenerationRequest;

/// First line of every rendered unit.
pub const GENERATED_HEADER: &str = "// @generated by strongtypes_codegen. Do not edit.\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path generated code uses to reach the runtime support crate
    pub support_crate: syn::Path,
    /// Derive serde traits on the wrappers
    pub derive_serde: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            support_crate: parse_quote!(::strongtypes),
            derive_serde: true,
        }
    }
}

impl EmitOptions {
    pub fn with_support_crate(mut self, support_crate: syn::Path) -> Self {
        self.support_crate = support_crate;
        self
    }

    pub fn with_serde(mut self, derive_serde: bool) -> Self {
        self.derive_serde = derive_serde;
        self
    }

    /// `#[derive(Serialize, Deserialize)]` through the support crate's serde
    /// re-export, followed by `#[serde(crate = .., extra)]`.
    pub(crate) fn serde_attributes(&self, extra: TokenStream) -> TokenStream {
        if !self.derive_serde {
            return TokenStream::new();
        }
        let support = &self.support_crate;
        let serde_path = format!("{}::__private::serde", path_string(support));
        quote! {
            #[derive(
                #support::__private::serde::Serialize,
                #support::__private::serde::Deserialize
            )]
            #[serde(crate = #serde_path, #extra)]
        }
    }
}

/// Output of one request: the items it generates and where they belong.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    name: String,
    namespace: String,
    items: TokenStream,
}

impl GeneratedUnit {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, items: TokenStream) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            items,
        }
    }

    /// `{Category}.{TypeName}.g`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `{namespace}.{name}.rs`, or `{name}.rs` at the crate root. Units of the
    /// same type name in different namespaces get different files.
    pub fn file_name(&self) -> String {
        if self.namespace.is_empty() {
            format!("{}.rs", self.name)
        } else {
            format!("{}.{}.rs", self.namespace, self.name)
        }
    }

    /// Generated items without the namespace modules.
    pub fn items(&self) -> &TokenStream {
        &self.items
    }

    /// Generated items, wrapped in one `pub mod` per namespace segment.
    pub fn tokens(&self) -> TokenStream {
        wrap_namespace(&self.namespace, self.items.clone())
    }

    /// Formatted source of [`tokens`](Self::tokens) with the generated-file
    /// header.
    pub fn source(&self) -> CodegenResult<String> {
        self.render(self.tokens())
    }

    /// Formatted source of the items alone, for files included from inside
    /// the namespace modules.
    pub fn item_source(&self) -> CodegenResult<String> {
        self.render(self.items.clone())
    }

    fn render(&self, tokens: TokenStream) -> CodegenResult<String> {
        let file = syn::parse2::<syn::File>(tokens).map_err(|source| CodegenError::Render {
            unit: self.name.clone(),
            source,
        })?;
        Ok(format!("{GENERATED_HEADER}\n{}", prettyplease::unparse(&file)))
    }
}

/// Emits the unit for any request.
pub fn emit(request: &GenerationRequest, options: &EmitOptions) -> GeneratedUnit {
    match request {
        GenerationRequest::Ids(request) => emit_ids(request, options),
        GenerationRequest::Keys(request) => emit_keys(request, options),
    }
}

/// Nests `items` in `pub mod` blocks for each dotted segment of `namespace`.
pub fn wrap_namespace(namespace: &str, items: TokenStream) -> TokenStream {
    namespace
        .split('.')
        .filter(|segment| !segment.is_empty())
        .rev()
        .fold(items, |inner, segment| {
            let module = naming::ident(segment);
            quote! {
                pub mod #module {
                    #inner
                }
            }
        })
}

/// `::a::b` style rendering of a path, without token spacing.
pub(crate) fn path_string(path: &syn::Path) -> String {
    let segments = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{segments}")
    } else {
        segments
    }
}
