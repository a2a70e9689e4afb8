//! Resolved unit configurations.
//!
//! A [`Configuration`] is produced by an external dependency-resolution step. This crate
//! only reads the unit names; the ordering is kept so consumers can define units in the
//! order they were resolved.

use crate::unit::{ResolvedUnit, UnitName};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[loadmap_derive::loadmap_error]
pub enum ConfigurationError {
    #[error("Invalid unit name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Duplicate unit{}: {message}", format_context(.context))]
    DuplicateUnit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// An ordered, duplicate-free set of resolved units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
    units: Vec<ResolvedUnit>,
}

#[derive(Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    units: Vec<ResolvedUnit>,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ConfigurationError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.units)
    }
}

impl Configuration {
    /// Builds a configuration, keeping the given order.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::DuplicateUnit`] when two units share a name.
    pub fn new(units: impl IntoIterator<Item = ResolvedUnit>) -> Result<Self, ConfigurationError> {
        let units: Vec<ResolvedUnit> = units.into_iter().collect();

        let mut seen = FxHashSet::default();
        for unit in &units {
            if !seen.insert(unit.name().as_str()) {
                return Err(ConfigurationError::DuplicateUnit {
                    message: format!("unit '{}' appears more than once", unit.name()).into(),
                    context: None,
                });
            }
        }

        Ok(Self { units })
    }

    /// Convenience constructor for dependency-free units.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidName`] for a malformed name and
    /// [`ConfigurationError::DuplicateUnit`] for a repeated one.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let units = names
            .into_iter()
            .map(|name| UnitName::new(name).map(ResolvedUnit::new))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(units)
    }

    pub fn units(&self) -> impl ExactSizeIterator<Item = &ResolvedUnit> {
        self.units.iter()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &UnitName> {
        self.units.iter().map(ResolvedUnit::name)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ResolvedUnit> {
        self.units.iter().find(|unit| unit.name().as_str() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
