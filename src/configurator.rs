//! Configurator traits implemented by generated code.
//!
//! A configurator pairs the conversion between a strong wrapper and its
//! primitive storage representation with the model rules the persistence
//! layer applies to properties of that wrapper type.

use std::any::TypeId;

use crate::model::{ModelConfigurationBuilder, PropertiesConfigurationBuilder};

/// To/from provider conversion between a wrapper and its stored value.
pub trait ValueConverter {
    /// The strong wrapper type
    type Model;
    /// The primitive type handed to storage
    type Provider;
    /// Failure when a stored value cannot become a wrapper
    type Error;

    fn convert_to_provider(&self, model: &Self::Model) -> Self::Provider;

    fn convert_from_provider(&self, provider: Self::Provider) -> Result<Self::Model, Self::Error>;
}

/// Capability every configurator is registered under.
pub trait PropertyConfigurator: Send + Sync + 'static {
    /// Type of the wrapper this configurator converts.
    fn convert_type(&self) -> TypeId;

    fn convert_type_name(&self) -> &'static str;

    /// Type of the configurator itself; registries deduplicate on it.
    fn converter(&self) -> TypeId;

    fn converter_name(&self) -> &'static str;

    /// Applies conversion and storage rules for the wrapper type.
    fn configure_properties<'a>(
        &self,
        builder: &'a mut ModelConfigurationBuilder,
    ) -> PropertiesConfigurationBuilder<'a>;

    fn as_collation(&self) -> Option<&dyn PropertyCollation> {
        None
    }

    fn as_collation_mut(&mut self) -> Option<&mut dyn PropertyCollation> {
        None
    }
}

/// String key configurators additionally expose their storage rules and an
/// overridable collation.
pub trait PropertyCollation: PropertyConfigurator {
    fn is_case_sensitive(&self) -> bool;

    /// Wide (NVARCHAR) rather than narrow (VARCHAR) storage.
    fn is_unicode(&self) -> bool;

    fn max_length(&self) -> usize;

    /// Collation annotation; blank means the storage default.
    fn collation(&self) -> &str;

    fn set_collation(&mut self, collation: String);
}

/// Constructor used by generated registration tables.
pub fn boxed<C>() -> Box<dyn PropertyConfigurator>
where
    C: PropertyConfigurator + Default,
{
    Box::new(C::default())
}
