//! Generation requests: the normalised, value-comparable records extracted
//! from marked declarations. They are both the cache key and the emitter
//! input.

use crate::sequence::EquatableSeq;

/// Output category, used as the first segment of generated unit names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr)]
pub enum Category {
    #[strum(serialize = "StrongIDs")]
    StrongIds,
    #[strum(serialize = "StrongKeys")]
    StrongKeys,
}

/// `{Category}.{TypeName}.g`
pub fn unit_name(category: Category, type_name: &str) -> String {
    format!("{category}.{type_name}.g")
}

/// Numeric ID wrappers requested by a marked enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdRequest {
    /// Dotted module path, empty at the top level
    pub namespace: String,
    /// Name of the marked enum
    pub type_name: String,
    /// Integral type every wrapper holds
    pub integral_type_name: String,
    /// Wrapper names in declaration order
    pub id_names: EquatableSeq<String>,
}

impl IdRequest {
    pub fn new<I, S>(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        integral_type_name: impl Into<String>,
        id_names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
            integral_type_name: integral_type_name.into(),
            id_names: id_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unit_name(&self) -> String {
        unit_name(Category::StrongIds, &self.type_name)
    }
}

/// One string key wrapper and its maximum length in characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub name: String,
    pub max_length: u64,
}

impl KeySpec {
    pub fn new(name: impl Into<String>, max_length: u64) -> Self {
        Self {
            name: name.into(),
            max_length,
        }
    }
}

/// String key wrappers requested by a marked constant table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyRequest {
    pub namespace: String,
    pub type_name: String,
    pub is_unicode: bool,
    pub is_case_sensitive: bool,
    pub keys: EquatableSeq<KeySpec>,
}

impl KeyRequest {
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        is_unicode: bool,
        is_case_sensitive: bool,
        keys: impl IntoIterator<Item = KeySpec>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
            is_unicode,
            is_case_sensitive,
            keys: keys.into_iter().collect(),
        }
    }

    pub fn unit_name(&self) -> String {
        unit_name(Category::StrongKeys, &self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationRequest {
    Ids(IdRequest),
    Keys(KeyRequest),
}

impl GenerationRequest {
    pub fn category(&self) -> Category {
        match self {
            Self::Ids(_) => Category::StrongIds,
            Self::Keys(_) => Category::StrongKeys,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Ids(request) => &request.type_name,
            Self::Keys(request) => &request.type_name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Ids(request) => &request.namespace,
            Self::Keys(request) => &request.namespace,
        }
    }

    pub fn unit_name(&self) -> String {
        unit_name(self.category(), self.type_name())
    }
}

impl From<IdRequest> for GenerationRequest {
    fn from(request: IdRequest) -> Self {
        Self::Ids(request)
    }
}

impl From<KeyRequest> for GenerationRequest {
    fn from(request: KeyRequest) -> Self {
        Self::Keys(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_names() {
        let ids = IdRequest::new("sample", "SampleIDs", "i32", ["EntityID"]);
        assert_eq!(ids.unit_name(), "StrongIDs.SampleIDs.g");

        let keys = KeyRequest::new("", "SampleKeys", false, false, []);
        assert_eq!(
            GenerationRequest::from(keys).unit_name(),
            "StrongKeys.SampleKeys.g"
        );
    }

    #[test]
    fn test_equality_covers_every_field() {
        let base = KeyRequest::new("a", "Keys", true, false, [KeySpec::new("Name", 64)]);

        assert_eq!(base, base.clone());
        let mut flipped = base.clone();
        flipped.is_case_sensitive = true;
        assert_ne!(base, flipped);

        let longer = KeyRequest::new("a", "Keys", true, false, [KeySpec::new("Name", 65)]);
        assert_ne!(base, longer);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::StrongIds.to_string(), "StrongIDs");
        assert_eq!(Category::StrongKeys.as_ref(), "StrongKeys");
    }
}
