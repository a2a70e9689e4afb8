//! # Domain Membership Table
//!
//! The boot, platform and native-access unit sets. The built-in table is generated at
//! build time from the membership manifest (see `build.rs`), published once through a
//! [`OnceLock`] and never mutated afterwards.
//!
//! A table whose lists were never populated is legal: every lookup then reports
//! "not boot, not platform" and resolution falls back to the application domain.

use crate::unit::UnitName;
use fxhash::FxHashSet;
use loadmap_domain::domains::DomainTag;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/membership.rs"));
}

/// A set of unit names, queryable by `&str`.
pub type UnitSet = FxHashSet<UnitName>;

#[loadmap_derive::loadmap_error]
pub enum MembershipError {
    #[error("Boot and platform membership overlap{}: {message}", format_context(.context))]
    Overlap { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

static BUILTIN: OnceLock<MembershipTable> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipTable {
    boot: UnitSet,
    platform: UnitSet,
    native_access: UnitSet,
}

impl MembershipTable {
    /// Builds a table, checking that no unit is both boot and platform.
    ///
    /// # Errors
    /// Returns [`MembershipError::Overlap`] naming the offending units.
    pub fn new(
        boot: impl IntoIterator<Item = UnitName>,
        platform: impl IntoIterator<Item = UnitName>,
        native_access: impl IntoIterator<Item = UnitName>,
    ) -> Result<Self, MembershipError> {
        let table = Self {
            boot: boot.into_iter().collect(),
            platform: platform.into_iter().collect(),
            native_access: native_access.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// A table with no members.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table compiled into this build.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            let table = Self {
                boot: collect_names(generated::BOOT_UNITS),
                platform: collect_names(generated::PLATFORM_UNITS),
                native_access: collect_names(generated::NATIVE_ACCESS_UNITS),
            };

            if let Err(e) = table.validate() {
                error!(error = %e, "Built-in membership table violates boot/platform disjointness");
            }
            if table.boot.is_empty() && table.platform.is_empty() {
                warn!("Built-in membership table is empty; all units resolve to the application domain");
            }
            debug!(
                boot = table.boot.len(),
                platform = table.platform.len(),
                native_access = table.native_access.len(),
                "Membership table published"
            );
            table
        })
    }

    /// Checks the boot/platform disjointness invariant.
    ///
    /// # Errors
    /// Returns [`MembershipError::Overlap`] listing the units found in both sets.
    pub fn validate(&self) -> Result<(), MembershipError> {
        let mut overlap: Vec<&str> =
            self.boot.iter().filter(|n| self.platform.contains(*n)).map(UnitName::as_str).collect();
        if overlap.is_empty() {
            return Ok(());
        }
        overlap.sort_unstable();
        Err(MembershipError::Overlap { message: overlap.join(", ").into(), context: None })
    }

    #[must_use]
    pub const fn boot(&self) -> &UnitSet {
        &self.boot
    }

    #[must_use]
    pub const fn platform(&self) -> &UnitSet {
        &self.platform
    }

    #[must_use]
    pub const fn native_access(&self) -> &UnitSet {
        &self.native_access
    }

    /// Domain a unit belongs to according to this table alone.
    ///
    /// Names found in neither privileged set are application units.
    #[must_use]
    pub fn classify(&self, name: &str) -> DomainTag {
        if self.boot.contains(name) {
            DomainTag::Boot
        } else if self.platform.contains(name) {
            DomainTag::Platform
        } else {
            DomainTag::Application
        }
    }

    #[must_use]
    pub fn has_native_access(&self, name: &str) -> bool {
        self.native_access.contains(name)
    }
}

/// Names of the units defined to the boot domain.
pub fn boot_units() -> &'static UnitSet {
    MembershipTable::builtin().boot()
}

/// Names of the units defined to the platform domain.
pub fn platform_units() -> &'static UnitSet {
    MembershipTable::builtin().platform()
}

/// Names of the units permitted to perform native access.
pub fn native_access_units() -> &'static UnitSet {
    MembershipTable::builtin().native_access()
}

fn collect_names(names: &[&str]) -> UnitSet {
    // build.rs already rejected malformed names
    names.iter().filter_map(|name| UnitName::new(name).ok()).collect()
}

#[cfg(test)]
pub(crate) fn table(boot: &[&str], platform: &[&str], native_access: &[&str]) -> MembershipTable {
    MembershipTable::new(
        boot.iter().map(|n| UnitName::new(n).unwrap()),
        platform.iter().map(|n| UnitName::new(n).unwrap()),
        native_access.iter().map(|n| UnitName::new(n).unwrap()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<UnitName> {
        list.iter().map(|n| UnitName::new(n).unwrap()).collect()
    }

    #[test]
    fn rejects_boot_platform_overlap() {
        let err = MembershipTable::new(names(&["a", "b"]), names(&["b", "c"]), names(&[]))
            .unwrap_err();
        assert!(matches!(err, MembershipError::Overlap { ref message, .. } if message == "b"));
    }

    #[test]
    fn native_access_may_overlap_domains() {
        let t = table(&["a"], &["b"], &["a", "b", "c"]);
        assert!(t.has_native_access("a"));
        assert!(t.has_native_access("c"));
        assert!(!t.has_native_access("d"));
    }

    #[test]
    fn classify_defaults_to_application() {
        let t = table(&["a"], &["b"], &[]);
        assert_eq!(t.classify("a"), DomainTag::Boot);
        assert_eq!(t.classify("b"), DomainTag::Platform);
        assert_eq!(t.classify("unknown"), DomainTag::Application);
        assert_eq!(MembershipTable::empty().classify("a"), DomainTag::Application);
    }

    #[test]
    fn builtin_table_is_published_once() {
        let first = MembershipTable::builtin();
        let second = MembershipTable::builtin();
        assert!(std::ptr::eq(first, second));
        assert!(first.validate().is_ok());
        assert!(std::ptr::eq(boot_units(), first.boot()));
    }
}
