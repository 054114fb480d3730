//! Build-script configuration.

use std::path::PathBuf;

use typed_builder::TypedBuilder;

use crate::constant::{DEFAULT_INTEGRAL_TYPE, is_integral};
use crate::emit::EmitOptions;
use crate::error::{CodegenError, CodegenResult};
use crate::extract::ExtractOptions;
use crate::scan::Markers;

/// Configuration of a [`Generator`](crate::Generator).
///
/// # Examples
///
/// ```
/// use strongtypes_codegen::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .out_dir("target/generated")
///     .default_integral_type("i64")
///     .build();
/// assert_eq!(config.support_crate, "::strongtypes");
/// assert!(config.extract_options().is_ok());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct GeneratorConfig {
    /// Directory generated units and the index are written to
    #[builder(setter(into))]
    pub out_dir: PathBuf,

    /// Path generated code uses to reach the runtime support crate
    #[builder(default = "::strongtypes".to_string(), setter(into))]
    pub support_crate: String,

    /// Integral type of ID wrappers whose enum has no integral `#[repr(..)]`
    #[builder(default = DEFAULT_INTEGRAL_TYPE.to_string(), setter(into))]
    pub default_integral_type: String,

    /// Attribute name marking ID enums
    #[builder(default = "strong_ids".to_string(), setter(into))]
    pub ids_marker: String,

    /// Attribute name marking key constant tables
    #[builder(default = "strong_keys".to_string(), setter(into))]
    pub keys_marker: String,

    /// Derive serde traits on generated wrappers
    #[builder(default = true)]
    pub derive_serde: bool,

    /// Dotted module path of the scanned source root, empty for a crate root
    #[builder(default, setter(into))]
    pub root_module: String,

    /// File name of the index that includes every unit
    #[builder(default = "strongtypes.g.rs".to_string(), setter(into))]
    pub index_file: String,
}

impl GeneratorConfig {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::builder().out_dir(out_dir).build()
    }

    pub fn emit_options(&self) -> CodegenResult<EmitOptions> {
        let support_crate = syn::parse_str::<syn::Path>(&self.support_crate)
            .map_err(|_| CodegenError::InvalidSupportPath(self.support_crate.clone()))?;
        Ok(EmitOptions {
            support_crate,
            derive_serde: self.derive_serde,
        })
    }

    pub fn extract_options(&self) -> CodegenResult<ExtractOptions> {
        if !is_integral(&self.default_integral_type) {
            return Err(CodegenError::InvalidIntegralType(self.default_integral_type.clone()));
        }
        Ok(ExtractOptions {
            default_integral_type: self.default_integral_type.clone(),
        })
    }

    pub fn markers(&self) -> Markers {
        Markers {
            ids: self.ids_marker.clone(),
            keys: self.keys_marker.clone(),
        }
    }
}
