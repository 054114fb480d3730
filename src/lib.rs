//! # strongtypes
//!
//! Strongly typed identifier and key wrappers for persistence models.
//!
//! Two attribute macros generate the wrappers:
//!
//! - [`strong_ids`] on an enum turns every unit variant into a numeric ID
//!   newtype over the enum's `#[repr(..)]` type (`i32` when absent).
//! - [`strong_keys`] on an inherent `impl` block turns every integer `const`
//!   into a string key newtype whose maximum length is the constant's value.
//!
//! Each wrapper gets a configurator (value conversion plus model rules) and
//! every marked declaration gets a `{Name}Dependencies` type that registers
//! the configurators into a [`ServiceRegistry`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strongtypes::prelude::*;
//!
//! #[strong_ids]
//! #[repr(i64)]
//! pub enum OrderIDs {
//!     OrderID,
//!     LineID,
//! }
//!
//! pub struct CommonKeys;
//!
//! #[strong_keys(unicode)]
//! impl CommonKeys {
//!     pub const NAME_STRING: usize = 64;
//!     pub const DESCRIPTION_STRING: usize = 256;
//! }
//!
//! let order = OrderID::new(42);
//! let name = NameString::new("Widget")?;
//! assert!(NameString::new("x".repeat(65)).is_err());
//!
//! let mut services = ServiceRegistry::new();
//! OrderIDsDependencies::add_configurators(&mut services);
//! CommonKeysDependencies::add_configurators(&mut services);
//!
//! let mut model = ModelConfigurationBuilder::new();
//! model.apply(&services);
//! assert_eq!(model.convention::<NameString>().unwrap().max_length, Some(64));
//! ```
//!
//! Build scripts that prefer generated files over attribute expansion can use
//! the `strongtypes_codegen` crate directly.

pub mod configurator;
pub mod error;
pub mod key;
pub mod model;
pub mod prelude;
pub mod registry;

pub use configurator::{PropertyCollation, PropertyConfigurator, ValueConverter, boxed};
pub use error::KeyLengthError;
pub use key::StringComparison;
pub use model::{
    COLLATION_ANNOTATION, ModelConfigurationBuilder, PropertiesConfigurationBuilder,
    PropertyConvention,
};
pub use registry::{ServiceDescriptor, ServiceRegistry};
pub use strongtypes_macros::{strong_ids, strong_keys};

#[doc(hidden)]
pub mod __private {
    //! Re-exports used by generated code so users don't need to depend on
    //! these crates themselves. Do not use directly.

    /// Serialization framework
    pub use serde;
}
