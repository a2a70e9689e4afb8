//! # Unit Definition
//!
//! Places every unit of a configuration into a loading domain, as suggested by a
//! [`UnitResolver`]. A resolver answering `None` asks for the boot domain.
//!
//! Placement into a privileged domain (boot or platform) is only honored when the
//! resolver passes the trust gate. A trusted resolver must also stay consistent with
//! the membership table: `None` is only valid for boot units.

use crate::configuration::Configuration;
use crate::membership::MembershipTable;
use crate::resolver::UnitResolver;
use crate::trust::is_builtin_resolver;
use crate::unit::UnitName;
use fxhash::FxHashMap;
use loadmap_domain::domains::{DomainSet, DomainTag};
use std::borrow::Cow;
use tracing::{debug, warn};

#[loadmap_derive::loadmap_error]
pub enum DefinitionError {
    #[error("Untrusted resolver cannot place units in privileged domains{}: {message}", format_context(.context))]
    UntrustedPlacement { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unit has no domain{}: {message}", format_context(.context))]
    UnmappedUnit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A unit together with the domain it was defined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedUnit {
    name: UnitName,
    domain: DomainTag,
    native_access: bool,
}

impl DefinedUnit {
    #[must_use]
    pub const fn name(&self) -> &UnitName {
        &self.name
    }

    #[must_use]
    pub const fn domain(&self) -> DomainTag {
        self.domain
    }

    /// Whether native-level access is enabled for this unit.
    #[must_use]
    pub const fn native_access(&self) -> bool {
        self.native_access
    }
}

/// The units of one configuration, each placed in a domain.
#[derive(Debug)]
pub struct UnitLayer {
    units: Vec<DefinedUnit>,
    index: FxHashMap<UnitName, usize>,
    domains: DomainSet,
}

impl UnitLayer {
    /// Defines the units of `cf` using `resolver` and the built-in membership table.
    ///
    /// # Errors
    /// * [`DefinitionError::UntrustedPlacement`] if `resolver` is not the built-in
    ///   resolver and asks for a boot or platform placement.
    /// * [`DefinitionError::UnmappedUnit`] if the built-in resolver has no domain for a
    ///   unit that is not a boot unit (the resolver was built for another configuration).
    pub fn define(cf: &Configuration, resolver: &dyn UnitResolver) -> Result<Self, DefinitionError> {
        Self::define_with_table(MembershipTable::builtin(), cf, resolver)
    }

    pub(crate) fn define_with_table(
        table: &MembershipTable,
        cf: &Configuration,
        resolver: &dyn UnitResolver,
    ) -> Result<Self, DefinitionError> {
        let trusted = is_builtin_resolver(resolver);

        let mut units = Vec::with_capacity(cf.len());
        let mut index = FxHashMap::default();
        let mut domains = DomainSet::empty();

        for name in cf.names() {
            let domain = resolver.resolve(name.as_str()).map_or(DomainTag::Boot, |d| d.tag());

            if domain.is_privileged() && !trusted {
                warn!(unit = %name, domain = %domain, "Refusing privileged placement from untrusted resolver");
                return Err(DefinitionError::UntrustedPlacement {
                    message: format!("unit '{name}' cannot be defined to the {domain} domain").into(),
                    context: None,
                });
            }

            if domain == DomainTag::Boot && !table.boot().contains(name.as_str()) {
                return Err(DefinitionError::UnmappedUnit {
                    message: format!("unit '{name}' is neither mapped nor a boot unit").into(),
                    context: None,
                });
            }

            index.insert(name.clone(), units.len());
            domains |= DomainSet::from_tag(domain);
            units.push(DefinedUnit {
                name: name.clone(),
                domain,
                native_access: table.has_native_access(name.as_str()),
            });
        }

        debug!(units = units.len(), trusted, "Defined unit layer");

        Ok(Self { units, index, domains })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DefinedUnit> {
        self.index.get(name).map(|&i| &self.units[i])
    }

    #[must_use]
    pub fn domain_of(&self, name: &str) -> Option<DomainTag> {
        self.get(name).map(DefinedUnit::domain)
    }

    /// Units defined to `tag`, in configuration order.
    pub fn units_in(&self, tag: DomainTag) -> impl Iterator<Item = &DefinedUnit> {
        self.units.iter().filter(move |unit| unit.domain == tag)
    }

    /// All units in configuration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DefinedUnit> {
        self.units.iter()
    }

    /// Domains that received at least one unit.
    #[must_use]
    pub const fn domains(&self) -> DomainSet {
        self.domains
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoadingDomain;
    use crate::membership::table;
    use crate::resolver::BuiltinResolver;

    fn fixture() -> (MembershipTable, Configuration) {
        let t = table(&["A"], &["B"], &["C"]);
        let cf = Configuration::from_names(["A", "B", "C"]).unwrap();
        (t, cf)
    }

    #[test]
    fn builtin_resolver_defines_all_domains() {
        let (t, cf) = fixture();
        let resolver = BuiltinResolver::with_table(&t, &cf);
        let layer = UnitLayer::define_with_table(&t, &cf, &resolver).unwrap();

        assert_eq!(layer.domain_of("A"), Some(DomainTag::Boot));
        assert_eq!(layer.domain_of("B"), Some(DomainTag::Platform));
        assert_eq!(layer.domain_of("C"), Some(DomainTag::Application));
        assert_eq!(layer.domains(), DomainSet::ALL);
        assert!(layer.get("C").unwrap().native_access());
        assert!(!layer.get("B").unwrap().native_access());
    }

    #[test]
    fn untrusted_platform_placement_is_refused() {
        let (t, cf) = fixture();
        let original = BuiltinResolver::with_table(&t, &cf);
        let look_alike = move |name: &str| original.resolve(name);

        let err = UnitLayer::define_with_table(&t, &cf, &look_alike).unwrap_err();
        assert!(matches!(err, DefinitionError::UntrustedPlacement { .. }));
    }

    #[test]
    fn untrusted_boot_placement_is_refused() {
        let t = table(&["A"], &[], &[]);
        let cf = Configuration::from_names(["A"]).unwrap();
        let absent = |_: &str| -> Option<&'static LoadingDomain> { None };

        let err = UnitLayer::define_with_table(&t, &cf, &absent).unwrap_err();
        assert!(matches!(err, DefinitionError::UntrustedPlacement { .. }));
    }

    #[test]
    fn untrusted_application_placement_is_allowed() {
        let (t, cf) = fixture();
        let everything_app = |_: &str| Some(LoadingDomain::application());

        let layer = UnitLayer::define_with_table(&t, &cf, &everything_app).unwrap();
        assert_eq!(layer.units_in(DomainTag::Application).count(), 3);
        assert_eq!(layer.domains(), DomainSet::APPLICATION);
    }

    #[test]
    fn resolver_for_other_configuration_is_unmapped() {
        let (t, cf) = fixture();
        let other = Configuration::from_names(["A", "B"]).unwrap();
        let resolver = BuiltinResolver::with_table(&t, &other);

        let err = UnitLayer::define_with_table(&t, &cf, &resolver).unwrap_err();
        assert!(matches!(err, DefinitionError::UnmappedUnit { .. }));
    }

    #[test]
    fn layer_keeps_configuration_order() {
        let t = table(&["A"], &["B"], &[]);
        let cf = Configuration::from_names(["C", "A", "B"]).unwrap();
        let resolver = BuiltinResolver::with_table(&t, &cf);
        let layer = UnitLayer::define_with_table(&t, &cf, &resolver).unwrap();

        let order: Vec<&str> = layer.iter().map(|u| u.name().as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }
}
