//! Namespace resolution from a declaration's lexical scopes.

use crate::declaration::Scope;

/// Dotted module path of a declaration whose enclosing scopes are `scopes`
/// (outermost first).
///
/// Starts at the innermost module-like scope and keeps collecting while the
/// parent is module-like too; any other scope in between ends the chain.
/// Returns an empty string when no module-like scope exists.
pub fn resolve_namespace(scopes: &[Scope]) -> String {
    let Some(innermost) = scopes.iter().rposition(Scope::is_namespace) else {
        return String::new();
    };

    let mut segments: Vec<&str> = scopes[..=innermost]
        .iter()
        .rev()
        .map_while(Scope::namespace_name)
        .filter(|name| !name.is_empty())
        .collect();
    segments.reverse();
    segments.join(".")
}
