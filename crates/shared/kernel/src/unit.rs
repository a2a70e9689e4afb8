use crate::configuration::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Immutable unit identifier.
///
/// Hashes and compares exactly like the underlying `str`, so sets and maps keyed by
/// `UnitName` can be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitName(Arc<str>);

impl UnitName {
    /// Validates and wraps a unit name.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidName`] for an empty name or one containing
    /// whitespace or control characters.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ConfigurationError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(ConfigurationError::InvalidName {
                message: "unit name cannot be empty".into(),
                context: None,
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigurationError::InvalidName {
                message: format!("unit name {name:?} contains whitespace or control characters")
                    .into(),
                context: None,
            });
        }
        Ok(Self(Arc::from(name)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UnitName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UnitName {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UnitName {
    type Error = ConfigurationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitName> for String {
    fn from(value: UnitName) -> Self {
        value.0.as_ref().to_owned()
    }
}

/// A unit as handed over by dependency resolution.
///
/// Only [`ResolvedUnit::name`] matters for domain mapping; `requires` is carried along
/// for consumers that need the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    name: UnitName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    requires: Vec<UnitName>,
}

impl ResolvedUnit {
    #[must_use]
    pub const fn new(name: UnitName) -> Self {
        Self { name, requires: Vec::new() }
    }

    /// Replaces the direct dependencies of this unit.
    #[must_use]
    pub fn with_requires(mut self, requires: impl IntoIterator<Item = UnitName>) -> Self {
        self.requires = requires.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn name(&self) -> &UnitName {
        &self.name
    }

    #[must_use]
    pub fn requires(&self) -> &[UnitName] {
        &self.requires
    }
}

impl From<UnitName> for ResolvedUnit {
    fn from(name: UnitName) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashSet;

    #[test]
    fn rejects_malformed_names() {
        assert!(UnitName::new("").is_err());
        assert!(UnitName::new("net http").is_err());
        assert!(UnitName::new("sql\n").is_err());
        assert!(UnitName::new("xml.crypto").is_ok());
    }

    #[test]
    fn set_lookup_by_str() {
        let mut set = FxHashSet::default();
        set.insert(UnitName::new("base").unwrap());
        assert!(set.contains("base"));
        assert!(!set.contains("sql"));
    }

    #[test]
    fn deserialization_validates() {
        let ok: UnitName = serde_json::from_str("\"sql\"").unwrap();
        assert_eq!(ok.as_str(), "sql");
        assert!(serde_json::from_str::<UnitName>("\"\"").is_err());
    }
}
