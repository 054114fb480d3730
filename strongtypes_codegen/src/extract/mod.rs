//! Extraction of generation requests from declarations.
//!
//! Extraction never fails: a declaration of the wrong kind yields `None`,
//! and members whose values cannot be resolved are left out.

mod ids;
mod keys;

pub use ids::extract_id_request;
pub use keys::extract_key_request;

use crate::constant::DEFAULT_INTEGRAL_TYPE;
use crate::declaration::Declaration;
use crate::request::GenerationRequest;
use crate::scan::Marker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Integral type used when a marked enum has no integral `#[repr(..)]`
    pub default_integral_type: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_integral_type: DEFAULT_INTEGRAL_TYPE.to_string(),
        }
    }
}

/// Runs the extraction rule matching `marker`.
pub fn extract(
    declaration: &Declaration,
    marker: &Marker,
    options: &ExtractOptions,
) -> Option<GenerationRequest> {
    match marker {
        Marker::Ids => extract_id_request(declaration, options).map(Into::into),
        Marker::Keys(key_options) => {
            extract_key_request(declaration, key_options).map(Into::into)
        }
    }
}

