//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use strongtypes::prelude::*;
//! ```
//!
//! Brings in the attribute macros, the configurator traits generated code
//! implements, and the registry and model builder they are consumed by.

pub use crate::configurator::{PropertyCollation, PropertyConfigurator, ValueConverter};
pub use crate::error::KeyLengthError;
pub use crate::key::StringComparison;
pub use crate::model::{ModelConfigurationBuilder, PropertyConvention};
pub use crate::registry::ServiceRegistry;
pub use strongtypes_macros::{strong_ids, strong_keys};
