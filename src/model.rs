//! Model-building API consumed by configurators.
//!
//! [`ModelConfigurationBuilder`] keeps one [`PropertyConvention`] per wrapper
//! type. Configurators reach it through
//! [`ModelConfigurationBuilder::properties`] and chain rules on the returned
//! [`PropertiesConfigurationBuilder`].

use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, HashMap};

use crate::configurator::PropertyConfigurator;
use crate::registry::ServiceRegistry;

/// Annotation key carrying a collation override.
pub const COLLATION_ANNOTATION: &str = "Relational:Collation";

/// Storage rules collected for every property of one wrapper type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyConvention {
    pub type_name: &'static str,
    pub is_unicode: Option<bool>,
    pub max_length: Option<usize>,
    pub converter: Option<TypeId>,
    pub converter_name: Option<&'static str>,
    pub annotations: BTreeMap<String, String>,
}

impl PropertyConvention {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            is_unicode: None,
            max_length: None,
            converter: None,
            converter_name: None,
            annotations: BTreeMap::new(),
        }
    }

    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }

    pub fn collation(&self) -> Option<&str> {
        self.annotation(COLLATION_ANNOTATION)
    }
}

#[derive(Debug, Default)]
pub struct ModelConfigurationBuilder {
    conventions: HashMap<TypeId, PropertyConvention>,
}

impl ModelConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convention builder for every property of type `T`.
    pub fn properties<T: 'static>(&mut self) -> PropertiesConfigurationBuilder<'_> {
        let convention = self
            .conventions
            .entry(TypeId::of::<T>())
            .or_insert_with(|| PropertyConvention::new(type_name::<T>()));
        PropertiesConfigurationBuilder { convention }
    }

    /// Runs every registered configurator against this builder.
    pub fn apply(&mut self, registry: &ServiceRegistry) -> &mut Self {
        for configurator in registry.configurators() {
            configurator.configure_properties(self);
        }
        self
    }

    pub fn apply_configurator(&mut self, configurator: &dyn PropertyConfigurator) -> &mut Self {
        configurator.configure_properties(self);
        self
    }

    pub fn convention<T: 'static>(&self) -> Option<&PropertyConvention> {
        self.conventions.get(&TypeId::of::<T>())
    }

    pub fn convention_by_id(&self, type_id: TypeId) -> Option<&PropertyConvention> {
        self.conventions.get(&type_id)
    }

    pub fn conventions(&self) -> impl Iterator<Item = &PropertyConvention> {
        self.conventions.values()
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }
}

/// Chained rules for one wrapper type.
#[derive(Debug)]
pub struct PropertiesConfigurationBuilder<'a> {
    convention: &'a mut PropertyConvention,
}

impl<'a> PropertiesConfigurationBuilder<'a> {
    pub fn are_unicode(self, is_unicode: bool) -> Self {
        self.convention.is_unicode = Some(is_unicode);
        self
    }

    pub fn have_max_length(self, max_length: usize) -> Self {
        self.convention.max_length = Some(max_length);
        self
    }

    /// Records `C` as the value converter for these properties.
    pub fn have_conversion<C: 'static>(self) -> Self {
        self.convention.converter = Some(TypeId::of::<C>());
        self.convention.converter_name = Some(type_name::<C>());
        self
    }

    pub fn have_annotation(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.convention.annotations.insert(name.into(), value.into());
        self
    }

    pub fn convention(&self) -> &PropertyConvention {
        &*self.convention
    }
}
