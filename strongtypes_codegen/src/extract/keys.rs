use heck::ToUpperCamelCase;

use crate::attributes::KeyOptions;
use crate::declaration::{Declaration, DeclarationKind, is_identifier};
use crate::request::{KeyRequest, KeySpec};

/// One key wrapper per integral constant of the class whose value is a
/// non-negative integer, named in UpperCamelCase.
pub fn extract_key_request(declaration: &Declaration, options: &KeyOptions) -> Option<KeyRequest> {
    let DeclarationKind::Class(decl) = &declaration.kind else {
        return None;
    };
    if decl.name.is_empty() {
        return None;
    }

    let keys = decl.constants.iter().filter_map(|constant| {
        let max_length = u64::try_from(constant.value?).ok()?;
        let name = constant.name.to_upper_camel_case();
        is_identifier(&name).then(|| KeySpec::new(name, max_length))
    });

    Some(KeyRequest::new(
        declaration.namespace(),
        decl.name.clone(),
        options.is_unicode,
        options.is_case_sensitive,
        keys,
    ))
}
