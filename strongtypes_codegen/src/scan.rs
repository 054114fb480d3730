//! Finding marked declarations in Rust source files.

use std::collections::HashMap;

use log::{trace, warn};
use syn::ext::IdentExt;
use syn::visit::{self, Visit};
use syn::{Attribute, Item};

use crate::attributes::KeyOptions;
use crate::declaration::{Declaration, DeclarationId, Scope, item_attrs, item_name, self_type_name};
use crate::extract::{ExtractOptions, extract};
use crate::request::GenerationRequest;

/// Which generator a declaration asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Ids,
    Keys(KeyOptions),
}

/// Attribute names recognised as markers, compared with the last segment of
/// the attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub ids: String,
    pub keys: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            ids: "strong_ids".to_string(),
            keys: "strong_keys".to_string(),
        }
    }
}

impl Markers {
    /// Marker carried by `attr`, if any. Key markers with unparseable
    /// arguments are reported as errors.
    pub fn classify(&self, attr: &Attribute) -> Option<syn::Result<Marker>> {
        let last = attr.path().segments.last()?;
        if last.ident == self.ids {
            Some(Ok(Marker::Ids))
        } else if last.ident == self.keys {
            Some(KeyOptions::from_attribute(attr).map(Marker::Keys))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedDeclaration {
    pub declaration: Declaration,
    pub marker: Marker,
}

impl MarkedDeclaration {
    pub fn new(declaration: Declaration, marker: Marker) -> Self {
        Self { declaration, marker }
    }

    pub fn request(&self, options: &ExtractOptions) -> Option<GenerationRequest> {
        extract(&self.declaration, &self.marker, options)
    }
}

/// Visitor collecting marked items together with their lexical scopes.
pub struct SourceScanner<'m> {
    file: String,
    markers: &'m Markers,
    scopes: Vec<Scope>,
    ordinals: HashMap<String, usize>,
    found: Vec<MarkedDeclaration>,
}

impl<'m> SourceScanner<'m> {
    /// `module_path` is the dotted path of the module the file defines,
    /// empty for the crate root.
    pub fn new(file: impl Into<String>, module_path: &str, markers: &'m Markers) -> Self {
        let mut scopes = Vec::new();
        if !module_path.is_empty() {
            scopes.push(Scope::FileModule(module_path.to_string()));
        }
        Self {
            file: file.into(),
            markers,
            scopes,
            ordinals: HashMap::new(),
            found: Vec::new(),
        }
    }

    pub fn into_declarations(self) -> Vec<MarkedDeclaration> {
        self.found
    }

    fn with_scope(&mut self, scope: Scope, f: impl FnOnce(&mut Self)) {
        self.scopes.push(scope);
        f(self);
        self.scopes.pop();
    }

    fn item_path(&self, name: &str) -> String {
        self.scopes
            .iter()
            .filter_map(|scope| match scope {
                Scope::FileModule(path) => Some(path.replace('.', "::")),
                Scope::Module(segment)
                | Scope::Function(segment)
                | Scope::Impl(segment)
                | Scope::Trait(segment) => Some(segment.clone()),
                Scope::Block => None,
            })
            .chain(std::iter::once(name.to_string()))
            .collect::<Vec<_>>()
            .join("::")
    }

    fn next_id(&mut self, name: &str) -> DeclarationId {
        let path = self.item_path(name);
        let ordinal = self.ordinals.entry(path.clone()).or_insert(0);
        let id = DeclarationId::new(self.file.clone(), path, *ordinal);
        *ordinal += 1;
        id
    }

    fn record(&mut self, item: &Item) {
        let markers: Vec<syn::Result<Marker>> = item_attrs(item)
            .iter()
            .filter_map(|attr| self.markers.classify(attr))
            .collect();
        if markers.is_empty() {
            return;
        }

        let id = self.next_id(&item_name(item).unwrap_or_default());
        for marker in markers {
            match marker {
                Ok(marker) => {
                    trace!("Found {marker:?} marker on {id}");
                    let declaration = Declaration::from_item(id.clone(), self.scopes.clone(), item);
                    self.found.push(MarkedDeclaration::new(declaration, marker));
                }
                Err(error) => warn!("Ignoring {id}: invalid marker arguments: {error}"),
            }
        }
    }
}

impl<'ast> Visit<'ast> for SourceScanner<'_> {
    fn visit_item(&mut self, item: &'ast Item) {
        self.record(item);
        visit::visit_item(self, item);
    }

    fn visit_item_mod(&mut self, item: &'ast syn::ItemMod) {
        let scope = Scope::Module(item.ident.unraw().to_string());
        self.with_scope(scope, |this| visit::visit_item_mod(this, item));
    }

    fn visit_item_fn(&mut self, item: &'ast syn::ItemFn) {
        let scope = Scope::Function(item.sig.ident.unraw().to_string());
        self.with_scope(scope, |this| visit::visit_item_fn(this, item));
    }

    fn visit_impl_item_fn(&mut self, item: &'ast syn::ImplItemFn) {
        let scope = Scope::Function(item.sig.ident.unraw().to_string());
        self.with_scope(scope, |this| visit::visit_impl_item_fn(this, item));
    }

    fn visit_trait_item_fn(&mut self, item: &'ast syn::TraitItemFn) {
        let scope = Scope::Function(item.sig.ident.unraw().to_string());
        self.with_scope(scope, |this| visit::visit_trait_item_fn(this, item));
    }

    fn visit_item_impl(&mut self, item: &'ast syn::ItemImpl) {
        let name = self_type_name(&item.self_ty).unwrap_or_default();
        self.with_scope(Scope::Impl(name), |this| visit::visit_item_impl(this, item));
    }

    fn visit_item_trait(&mut self, item: &'ast syn::ItemTrait) {
        let scope = Scope::Trait(item.ident.unraw().to_string());
        self.with_scope(scope, |this| visit::visit_item_trait(this, item));
    }

    fn visit_block(&mut self, block: &'ast syn::Block) {
        self.with_scope(Scope::Block, |this| visit::visit_block(this, block));
    }
}

/// Marked declarations of an already parsed file.
pub fn scan_file(
    file: &str,
    module_path: &str,
    ast: &syn::File,
    markers: &Markers,
) -> Vec<MarkedDeclaration> {
    let mut scanner = SourceScanner::new(file, module_path, markers);
    scanner.visit_file(ast);
    scanner.into_declarations()
}

/// Parses `source` and returns its marked declarations in source order.
pub fn scan_source(
    file: &str,
    module_path: &str,
    source: &str,
    markers: &Markers,
) -> syn::Result<Vec<MarkedDeclaration>> {
    let ast = syn::parse_file(source)?;
    Ok(scan_file(file, module_path, &ast, markers))
}
