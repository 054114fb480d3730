use crate::declaration::{Declaration, DeclarationKind};
use crate::extract::ExtractOptions;
use crate::request::IdRequest;

/// One ID wrapper per enum variant with a constant value, in declaration
/// order, all over the enum's integral representation.
pub fn extract_id_request(
    declaration: &Declaration,
    options: &ExtractOptions,
) -> Option<IdRequest> {
    let DeclarationKind::Enum(decl) = &declaration.kind else {
        return None;
    };
    if decl.name.is_empty() {
        return None;
    }

    let integral_type_name = decl
        .repr
        .clone()
        .unwrap_or_else(|| options.default_integral_type.clone());
    let id_names = decl
        .variants
        .iter()
        .filter(|variant| variant.has_constant_value)
        .map(|variant| variant.name.clone());

    Some(IdRequest::new(
        declaration.namespace(),
        decl.name.clone(),
        integral_type_name,
        id_names,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclarationId, Scope};
    use syn::{Item, parse_quote};

    fn declaration(scopes: Vec<Scope>, item: Item) -> Declaration {
        Declaration::from_item(DeclarationId::new("src/lib.rs", "Test", 0), scopes, &item)
    }

    #[test]
    fn test_sample_ids_default_to_i32() {
        let decl = declaration(
            vec![Scope::FileModule("sample".into())],
            parse_quote!(pub enum SampleIDs { EntityID, ReferenceID }),
        );
        let request = extract_id_request(&decl, &ExtractOptions::default()).unwrap();

        assert_eq!(
            request,
            IdRequest::new("sample", "SampleIDs", "i32", ["EntityID", "ReferenceID"])
        );
    }

    #[test]
    fn test_repr_and_field_variants() {
        let decl = declaration(
            vec![],
            parse_quote! {
                #[repr(u16)]
                enum Ids { A, B(u8), C { x: u8 }, D = 4 }
            },
        );
        let request = extract_id_request(&decl, &ExtractOptions::default()).unwrap();

        assert_eq!(request.integral_type_name, "u16");
        assert_eq!(request.id_names.to_vec(), vec!["A".to_string(), "D".to_string()]);
        assert_eq!(request.namespace, "");
    }

    #[test]
    fn test_configured_default_and_empty_enum() {
        let options = ExtractOptions {
            default_integral_type: "i64".into(),
        };
        let decl = declaration(vec![], parse_quote!(enum Empty {}));
        let request = extract_id_request(&decl, &options).unwrap();

        assert_eq!(request.integral_type_name, "i64");
        assert!(request.id_names.is_empty());
    }

    #[test]
    fn test_non_enum_is_none() {
        let decl = declaration(vec![], parse_quote!(struct NotAnEnum;));
        assert_eq!(extract_id_request(&decl, &ExtractOptions::default()), None);
    }
}
