//! Declarations as seen by the extraction rules.
//!
//! A [`Declaration`] is the toolchain-independent view of one item: its
//! identity, the lexical scopes around it and a tagged [`DeclarationKind`]
//! carrying only the metadata extraction needs.

use std::fmt;

use syn::ext::IdentExt;
use syn::{Attribute, Fields, ImplItem, Item, ItemEnum, ItemImpl, Type};

use crate::constant::{evaluate, integral_type_name, is_integral};
use crate::namespace::resolve_namespace;

/// Identity of a declaration across pipeline passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId {
    file: String,
    path: String,
    ordinal: usize,
}

impl DeclarationId {
    pub fn new(file: impl Into<String>, path: impl Into<String>, ordinal: usize) -> Self {
        Self {
            file: file.into(),
            path: path.into(),
            ordinal,
        }
    }

    /// Identity for a declaration handed over without a file, such as a
    /// macro input.
    pub fn inline(name: impl Into<String>) -> Self {
        Self::new("<inline>", name, 0)
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Distinguishes several declarations sharing a path, such as two
    /// marked `impl` blocks of the same type.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.path)?;
        if self.ordinal > 0 {
            write!(f, "#{}", self.ordinal)?;
        }
        Ok(())
    }
}

/// One lexical scope enclosing a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Module defined by the file itself, as a dotted path (`a.b`)
    FileModule(String),
    /// Inline `mod name { .. }`
    Module(String),
    Function(String),
    Impl(String),
    Trait(String),
    Block,
}

impl Scope {
    /// Name of a module-like scope.
    pub fn namespace_name(&self) -> Option<&str> {
        match self {
            Self::FileModule(name) | Self::Module(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        self.namespace_name().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    /// Unit variants have a constant discriminant; variants with fields do not.
    pub has_constant_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    /// Integral type from `#[repr(..)]`, if any
    pub repr: Option<String>,
    pub variants: Vec<EnumVariant>,
}

impl EnumDecl {
    pub fn from_item(item: &ItemEnum) -> Self {
        Self {
            name: item.ident.unraw().to_string(),
            repr: integral_repr(&item.attrs),
            variants: item
                .variants
                .iter()
                .map(|variant| EnumVariant {
                    name: variant.ident.unraw().to_string(),
                    has_constant_value: matches!(variant.fields, Fields::Unit),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConstant {
    pub name: String,
    /// Value when the constant is integral and evaluable
    pub value: Option<i128>,
}

/// A type with associated constants: the inherent `impl` block of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub constants: Vec<ClassConstant>,
}

impl ClassDecl {
    /// `None` for trait impls and impls of types without a plain name.
    pub fn from_impl(item: &ItemImpl) -> Option<Self> {
        if item.trait_.is_some() {
            return None;
        }
        let name = self_type_name(&item.self_ty)?;
        let constants = item
            .items
            .iter()
            .filter_map(|impl_item| match impl_item {
                ImplItem::Const(constant) => Some(ClassConstant {
                    name: constant.ident.unraw().to_string(),
                    value: integral_type_name(&constant.ty)
                        .and_then(|_| evaluate(&constant.expr)),
                }),
                _ => None,
            })
            .collect();
        Some(Self { name, constants })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    Enum(EnumDecl),
    Class(ClassDecl),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclarationId,
    /// Enclosing scopes, outermost first
    pub scopes: Vec<Scope>,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn new(id: DeclarationId, scopes: Vec<Scope>, kind: DeclarationKind) -> Self {
        Self { id, scopes, kind }
    }

    pub fn from_item(id: DeclarationId, scopes: Vec<Scope>, item: &Item) -> Self {
        let kind = match item {
            Item::Enum(item_enum) => DeclarationKind::Enum(EnumDecl::from_item(item_enum)),
            Item::Impl(item_impl) => match ClassDecl::from_impl(item_impl) {
                Some(class) => DeclarationKind::Class(class),
                None => DeclarationKind::Other(item_name(item).unwrap_or_default()),
            },
            other => DeclarationKind::Other(item_name(other).unwrap_or_default()),
        };
        Self::new(id, scopes, kind)
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            DeclarationKind::Enum(decl) => &decl.name,
            DeclarationKind::Class(decl) => &decl.name,
            DeclarationKind::Other(name) => name,
        }
    }

    pub fn namespace(&self) -> String {
        resolve_namespace(&self.scopes)
    }
}

/// First integral type named in `#[repr(..)]`.
fn integral_repr(attrs: &[Attribute]) -> Option<String> {
    let mut repr = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                let name = ident.to_string();
                if repr.is_none() && is_integral(&name) {
                    repr = Some(name);
                }
            }
            // align(N), packed(N)
            if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<proc_macro2::TokenStream>()?;
            }
            Ok(())
        });
        if parsed.is_err() {
            continue;
        }
    }
    repr
}

pub(crate) fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.unraw().to_string()),
        Type::Paren(paren) => self_type_name(&paren.elem),
        Type::Group(group) => self_type_name(&group.elem),
        _ => None,
    }
}

/// Name of an item, where it has one.
pub fn item_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Const(item) => &item.ident,
        Item::Enum(item) => &item.ident,
        Item::ExternCrate(item) => &item.ident,
        Item::Fn(item) => &item.sig.ident,
        Item::Macro(item) => item.ident.as_ref()?,
        Item::Mod(item) => &item.ident,
        Item::Static(item) => &item.ident,
        Item::Struct(item) => &item.ident,
        Item::Trait(item) => &item.ident,
        Item::TraitAlias(item) => &item.ident,
        Item::Type(item) => &item.ident,
        Item::Union(item) => &item.ident,
        Item::Impl(item) => return self_type_name(&item.self_ty),
        _ => return None,
    };
    Some(ident.unraw().to_string())
}

/// Whether `name` can be spelled as an identifier, raw if it is a keyword.
pub fn is_identifier(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
        || syn::parse_str::<syn::Ident>(&format!("r#{name}")).is_ok()
}

/// Outer attributes of an item.
pub fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::ExternCrate(item) => &item.attrs,
        Item::Fn(item) => &item.attrs,
        Item::ForeignMod(item) => &item.attrs,
        Item::Impl(item) => &item.attrs,
        Item::Macro(item) => &item.attrs,
        Item::Mod(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Trait(item) => &item.attrs,
        Item::TraitAlias(item) => &item.attrs,
        Item::Type(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        Item::Use(item) => &item.attrs,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_enum_repr_and_variants() {
        let item: Item = parse_quote! {
            #[derive(Debug)]
            #[repr(C, align(8), u64)]
            enum SampleLongIDs {
                OrderID,
                Tagged(u8),
                LineID = 7,
            }
        };
        let id = DeclarationId::inline("SampleLongIDs");
        let declaration = Declaration::from_item(id, vec![], &item);

        let DeclarationKind::Enum(decl) = &declaration.kind else {
            panic!("expected enum, got {:?}", declaration.kind);
        };
        assert_eq!(decl.repr.as_deref(), Some("u64"));
        let constant: Vec<_> = decl
            .variants
            .iter()
            .filter(|v| v.has_constant_value)
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(constant, ["OrderID", "LineID"]);
    }

    #[test]
    fn test_enum_without_repr() {
        let item: ItemEnum = parse_quote!(enum E { A });
        assert_eq!(EnumDecl::from_item(&item).repr, None);
    }

    #[test]
    fn test_inherent_impl_is_class() {
        let item: Item = parse_quote! {
            impl SampleKeys {
                pub const NAME_STRING: usize = 64;
                pub const LABEL: &'static str = "label";
                pub const COMPUTED: u16 = 8 * 4;
                pub fn helper() {}
            }
        };
        let id = DeclarationId::inline("SampleKeys");
        let declaration = Declaration::from_item(id, vec![], &item);

        let DeclarationKind::Class(class) = &declaration.kind else {
            panic!("expected class, got {:?}", declaration.kind);
        };
        assert_eq!(class.name, "SampleKeys");
        assert_eq!(
            class.constants,
            vec![
                ClassConstant { name: "NAME_STRING".into(), value: Some(64) },
                ClassConstant { name: "LABEL".into(), value: None },
                ClassConstant { name: "COMPUTED".into(), value: Some(32) },
            ]
        );
    }

    #[test]
    fn test_trait_impl_and_struct_are_other() {
        let trait_impl: Item = parse_quote!(impl Default for SampleKeys { });
        let declaration = Declaration::from_item(DeclarationId::inline("x"), vec![], &trait_impl);
        assert_eq!(declaration.kind, DeclarationKind::Other("SampleKeys".into()));

        let item_struct: Item = parse_quote!(struct SampleKeys;);
        let declaration = Declaration::from_item(DeclarationId::inline("x"), vec![], &item_struct);
        assert_eq!(declaration.name(), "SampleKeys");
        assert!(matches!(declaration.kind, DeclarationKind::Other(_)));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("NameString"));
        assert!(is_identifier("type"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("Self"));
    }

    #[test]
    fn test_declaration_id_display() {
        let first = DeclarationId::new("src/lib.rs", "a::Keys", 0);
        let third = DeclarationId::new("src/lib.rs", "a::Keys", 2);
        assert_eq!(first.to_string(), "src/lib.rs:a::Keys");
        assert_eq!(third.to_string(), "src/lib.rs:a::Keys#2");
    }
}
