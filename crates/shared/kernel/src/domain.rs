//! Live handles of the built-in loading domains.
//!
//! Exactly two handles exist for the lifetime of the process: the platform domain and
//! the application domain. The boot domain has no handle; it is represented by `None`
//! wherever a handle is expected.

use loadmap_domain::domains::DomainTag;
use std::fmt;
use std::ptr;

static PLATFORM: LoadingDomain =
    LoadingDomain { name: "platform", tag: DomainTag::Platform, parent: None };

static APPLICATION: LoadingDomain =
    LoadingDomain { name: "app", tag: DomainTag::Application, parent: Some(&PLATFORM) };

/// Handle to a built-in loading domain.
///
/// Handles cannot be constructed outside this module; compare them by identity.
#[derive(Debug)]
pub struct LoadingDomain {
    name: &'static str,
    tag: DomainTag,
    parent: Option<&'static Self>,
}

impl LoadingDomain {
    #[must_use]
    pub fn platform() -> &'static Self {
        &PLATFORM
    }

    #[must_use]
    pub fn application() -> &'static Self {
        &APPLICATION
    }

    /// Handle for a domain tag; `None` for [`DomainTag::Boot`].
    #[must_use]
    pub fn for_tag(tag: DomainTag) -> Option<&'static Self> {
        match tag {
            DomainTag::Boot => None,
            DomainTag::Platform => Some(Self::platform()),
            DomainTag::Application => Some(Self::application()),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn tag(&self) -> DomainTag {
        self.tag
    }

    /// Delegation parent; `None` means the boot domain.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static Self> {
        self.parent
    }
}

impl PartialEq for LoadingDomain {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for LoadingDomain {}

impl fmt::Display for LoadingDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
