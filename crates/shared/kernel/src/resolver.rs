//! # Unit Resolver
//!
//! Maps the units of one [`Configuration`] to the built-in loading domains.
//!
//! For every unit in the configuration:
//! 1. **Boot** units are left out of the map; their domain is implicit.
//! 2. **Platform** units are recorded as [`DomainTag::Platform`].
//! 3. Everything else is recorded as [`DomainTag::Application`], including units the
//!    membership table has never heard of. Unknown units get the least privilege.
//!
//! Lookups return the live [`LoadingDomain`] handle, or `None` for names absent from the
//! map (boot units *and* names outside the configuration; use the membership table to
//! tell them apart).

use crate::configuration::Configuration;
use crate::domain::LoadingDomain;
use crate::membership::MembershipTable;
use crate::unit::UnitName;
use fxhash::FxHashMap;
use loadmap_domain::domains::DomainTag;
use std::any::Any;
use tracing::debug;

/// Lookup from unit name to loading domain.
///
/// Implemented by [`BuiltinResolver`] and by any closure
/// `Fn(&str) -> Option<&'static LoadingDomain>`. Only the former passes
/// [`crate::trust::is_builtin_resolver`].
pub trait UnitResolver: Any + Send + Sync {
    fn resolve(&self, name: &str) -> Option<&'static LoadingDomain>;
}

impl<F> UnitResolver for F
where
    F: Fn(&str) -> Option<&'static LoadingDomain> + Send + Sync + 'static,
{
    fn resolve(&self, name: &str) -> Option<&'static LoadingDomain> {
        self(name)
    }
}

/// The resolver produced by [`mapping_function`].
///
/// Immutable after construction and safe to share across threads without locking.
/// There is no public constructor: holding one proves it was built here.
#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinResolver {
    map: FxHashMap<UnitName, DomainTag>,
}

impl BuiltinResolver {
    pub(crate) fn with_table(table: &MembershipTable, cf: &Configuration) -> Self {
        let map: FxHashMap<UnitName, DomainTag> = cf
            .names()
            .filter_map(|name| match table.classify(name.as_str()) {
                DomainTag::Boot => None,
                tag => Some((name.clone(), tag)),
            })
            .collect();

        debug!(
            units = cf.len(),
            mapped = map.len(),
            boot = cf.len() - map.len(),
            "Built unit resolver"
        );

        Self { map }
    }

    /// The recorded domain of `name`; never [`DomainTag::Boot`].
    #[must_use]
    pub fn domain_tag(&self, name: &str) -> Option<DomainTag> {
        self.map.get(name).copied()
    }

    /// Recorded entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitName, DomainTag)> {
        self.map.iter().map(|(name, tag)| (name, *tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl UnitResolver for BuiltinResolver {
    fn resolve(&self, name: &str) -> Option<&'static LoadingDomain> {
        self.domain_tag(name).and_then(LoadingDomain::for_tag)
    }
}

/// Builds the resolver for the units of `cf` against the built-in membership table.
#[must_use]
pub fn mapping_function(cf: &Configuration) -> BuiltinResolver {
    BuiltinResolver::with_table(MembershipTable::builtin(), cf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::table;

    #[test]
    fn maps_boot_platform_and_application_units() {
        let t = table(&["A"], &["B"], &[]);
        let cf = Configuration::from_names(["A", "B", "C"]).unwrap();
        let resolver = BuiltinResolver::with_table(&t, &cf);

        assert_eq!(resolver.resolve("A"), None);
        assert_eq!(resolver.resolve("B"), Some(LoadingDomain::platform()));
        assert_eq!(resolver.resolve("C"), Some(LoadingDomain::application()));
        assert_eq!(resolver.resolve("Z"), None);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn empty_table_defaults_to_application() {
        let cf = Configuration::from_names(["X"]).unwrap();
        let resolver = BuiltinResolver::with_table(&MembershipTable::empty(), &cf);

        assert_eq!(resolver.resolve("X"), Some(LoadingDomain::application()));
        assert_eq!(resolver.domain_tag("X"), Some(DomainTag::Application));
    }

    #[test]
    fn platform_member_outside_configuration_is_absent() {
        let t = table(&[], &["B"], &[]);
        let cf = Configuration::from_names(["C"]).unwrap();
        let resolver = BuiltinResolver::with_table(&t, &cf);

        assert_eq!(resolver.resolve("B"), None);
    }

    #[test]
    fn native_access_does_not_change_domain() {
        let t = table(&["A"], &["B"], &["A", "B", "C"]);
        let cf = Configuration::from_names(["A", "B", "C"]).unwrap();
        let resolver = BuiltinResolver::with_table(&t, &cf);

        assert_eq!(resolver.domain_tag("A"), None);
        assert_eq!(resolver.domain_tag("B"), Some(DomainTag::Platform));
        assert_eq!(resolver.domain_tag("C"), Some(DomainTag::Application));
    }

    #[test]
    fn construction_ignores_order() {
        let t = table(&["A"], &["B"], &[]);
        let forward = Configuration::from_names(["A", "B", "C", "D"]).unwrap();
        let reverse = Configuration::from_names(["D", "C", "B", "A"]).unwrap();

        assert_eq!(
            BuiltinResolver::with_table(&t, &forward),
            BuiltinResolver::with_table(&t, &reverse)
        );
    }

    #[test]
    fn resolver_is_shareable_across_threads() {
        let t = table(&["A"], &["B"], &[]);
        let cf = Configuration::from_names(["A", "B", "C"]).unwrap();
        let resolver = std::sync::Arc::new(BuiltinResolver::with_table(&t, &cf));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = std::sync::Arc::clone(&resolver);
                std::thread::spawn(move || resolver.resolve("B").map(LoadingDomain::tag))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(DomainTag::Platform));
        }
    }
}
