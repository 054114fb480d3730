use std::path::PathBuf;

use thiserror::Error;

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Host-side failures. Extraction itself never fails; anything it cannot
/// understand is left out of the generated output instead.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
    #[error("generated code for {unit} is not valid Rust: {source}")]
    Render {
        unit: String,
        #[source]
        source: syn::Error,
    },
    #[error("invalid support crate path `{0}`")]
    InvalidSupportPath(String),
    #[error("`{0}` is not an integral type")]
    InvalidIntegralType(String),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
