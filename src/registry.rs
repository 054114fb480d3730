//! Singleton registry that generated `{Name}Dependencies` types register
//! their configurators into.

use std::any::TypeId;
use std::fmt;

use log::{debug, trace};

use crate::configurator::{PropertyCollation, PropertyConfigurator};

/// One registered configurator instance.
pub struct ServiceDescriptor {
    implementation_type: TypeId,
    implementation_name: &'static str,
    instance: Box<dyn PropertyConfigurator>,
}

impl ServiceDescriptor {
    pub fn implementation_type(&self) -> TypeId {
        self.implementation_type
    }

    pub fn implementation_name(&self) -> &'static str {
        self.implementation_name
    }

    pub fn instance(&self) -> &dyn PropertyConfigurator {
        self.instance.as_ref()
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("implementation_name", &self.implementation_name)
            .field("convert_type", &self.instance.convert_type_name())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `configurator` unconditionally.
    pub fn add_singleton(&mut self, configurator: Box<dyn PropertyConfigurator>) -> &mut Self {
        debug!(
            "Registering configurator {} for {}",
            configurator.converter_name(),
            configurator.convert_type_name()
        );
        self.services.push(ServiceDescriptor {
            implementation_type: configurator.converter(),
            implementation_name: configurator.converter_name(),
            instance: configurator,
        });
        self
    }

    /// Registers `configurator` unless one of the same type is already
    /// present. Returns whether it was added.
    pub fn try_add_singleton(&mut self, configurator: Box<dyn PropertyConfigurator>) -> bool {
        if self.contains(configurator.converter()) {
            trace!(
                "Configurator {} already registered",
                configurator.converter_name()
            );
            return false;
        }
        self.add_singleton(configurator);
        true
    }

    pub fn contains(&self, implementation_type: TypeId) -> bool {
        self.services
            .iter()
            .any(|service| service.implementation_type == implementation_type)
    }

    pub fn contains_type<C: PropertyConfigurator>(&self) -> bool {
        self.contains(TypeId::of::<C>())
    }

    pub fn find(&self, implementation_type: TypeId) -> Option<&dyn PropertyConfigurator> {
        self.services
            .iter()
            .find(|service| service.implementation_type == implementation_type)
            .map(|service| service.instance.as_ref())
    }

    pub fn find_mut(
        &mut self,
        implementation_type: TypeId,
    ) -> Option<&mut (dyn PropertyConfigurator + 'static)> {
        self.services
            .iter_mut()
            .find(|service| service.implementation_type == implementation_type)
            .map(|service| service.instance.as_mut())
    }

    /// Collation settings of the registered configurator `C`, if it is a key
    /// configurator.
    pub fn collation_mut<C: PropertyConfigurator>(
        &mut self,
    ) -> Option<&mut dyn PropertyCollation> {
        self.find_mut(TypeId::of::<C>())
            .and_then(|configurator| configurator.as_collation_mut())
    }

    pub fn configurators(&self) -> impl Iterator<Item = &dyn PropertyConfigurator> {
        self.services.iter().map(|service| service.instance.as_ref())
    }

    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelConfigurationBuilder, PropertiesConfigurationBuilder};

    struct Probe;

    #[derive(Default)]
    struct ProbeConfigurator;

    impl PropertyConfigurator for ProbeConfigurator {
        fn convert_type(&self) -> TypeId {
            TypeId::of::<Probe>()
        }

        fn convert_type_name(&self) -> &'static str {
            "Probe"
        }

        fn converter(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn converter_name(&self) -> &'static str {
            "ProbeConfigurator"
        }

        fn configure_properties<'a>(
            &self,
            builder: &'a mut ModelConfigurationBuilder,
        ) -> PropertiesConfigurationBuilder<'a> {
            builder.properties::<Probe>().have_conversion::<Self>()
        }
    }

    #[test]
    fn test_try_add_is_idempotent() {
        let mut registry = ServiceRegistry::new();
        assert!(registry.try_add_singleton(crate::boxed::<ProbeConfigurator>()));
        assert!(!registry.try_add_singleton(crate::boxed::<ProbeConfigurator>()));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_type::<ProbeConfigurator>());
    }

    #[test]
    fn test_add_singleton_does_not_deduplicate() {
        let mut registry = ServiceRegistry::new();
        registry
            .add_singleton(Box::new(ProbeConfigurator))
            .add_singleton(Box::new(ProbeConfigurator));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_non_key_configurator_has_no_collation() {
        let mut registry = ServiceRegistry::new();
        registry.add_singleton(Box::new(ProbeConfigurator));
        assert!(registry.collation_mut::<ProbeConfigurator>().is_none());
        assert!(registry.find(TypeId::of::<ProbeConfigurator>()).is_some());
    }
}
