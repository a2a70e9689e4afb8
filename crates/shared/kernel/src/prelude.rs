pub use crate::configuration::{Configuration, ConfigurationError};
pub use crate::definition::{DefinedUnit, DefinitionError, UnitLayer};
pub use crate::domain::LoadingDomain;
pub use crate::membership::{
    MembershipError, MembershipTable, UnitSet, boot_units, native_access_units, platform_units,
};
pub use crate::resolver::{BuiltinResolver, UnitResolver, mapping_function};
pub use crate::trust::is_builtin_resolver;
pub use crate::unit::{ResolvedUnit, UnitName};
pub use loadmap_domain::domains::{DomainSet, DomainTag};
