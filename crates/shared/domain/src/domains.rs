use crate::constants::{APPLICATION, BOOT, PLATFORM};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The built-in loading domains a unit can be placed in.
///
/// Declaration order is privilege order: `Boot` is the most trusted domain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainTag {
    Boot,
    Platform,
    Application,
}

impl DomainTag {
    /// Boot and platform placements require a trusted resolver.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        DomainSet::PRIVILEGED.contains(DomainSet::from_tag(self))
    }

    /// Literal marker stored for this domain; equal to the `Display` output.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Boot => BOOT,
            Self::Platform => PLATFORM,
            Self::Application => APPLICATION,
        }
    }
}

bitflags! {
    /// A set of loading domains.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DomainSet: u8 {
        const BOOT = 1 << 0;
        const PLATFORM = 1 << 1;
        const APPLICATION = 1 << 2;

        const PRIVILEGED = Self::BOOT.bits() | Self::PLATFORM.bits();
        const ALL = Self::PRIVILEGED.bits() | Self::APPLICATION.bits();
    }
}

impl DomainSet {
    #[must_use]
    pub const fn from_tag(tag: DomainTag) -> Self {
        match tag {
            DomainTag::Boot => Self::BOOT,
            DomainTag::Platform => Self::PLATFORM,
            DomainTag::Application => Self::APPLICATION,
        }
    }

    #[must_use]
    pub const fn contains_tag(self, tag: DomainTag) -> bool {
        self.contains(Self::from_tag(tag))
    }
}

impl From<DomainTag> for DomainSet {
    fn from(tag: DomainTag) -> Self {
        Self::from_tag(tag)
    }
}

impl FromIterator<DomainTag> for DomainSet {
    fn from_iter<I: IntoIterator<Item = DomainTag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, tag| set | Self::from_tag(tag))
    }
}

impl Serialize for DomainSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for DomainSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}
