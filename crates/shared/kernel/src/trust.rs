//! # Trust Gate
//!
//! Only resolvers built by [`crate::resolver::mapping_function`] may place units in the
//! boot or platform domain. The check is on the concrete type behind the trait object,
//! not on what the resolver returns: a hand-built resolver with an identical mapping is
//! still untrusted. [`BuiltinResolver`] has no public constructor, so its type identity
//! cannot be forged.

use crate::resolver::{BuiltinResolver, UnitResolver};
use std::any::Any;

/// Returns `true` iff `resolver` is a [`BuiltinResolver`].
#[must_use]
pub fn is_builtin_resolver(resolver: &dyn UnitResolver) -> bool {
    let resolver: &dyn Any = resolver;
    resolver.is::<BuiltinResolver>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::domain::LoadingDomain;
    use crate::membership::table;
    use fxhash::FxHashMap;
    use loadmap_domain::domains::DomainTag;
    use std::sync::Arc;

    /// Same contents as a built-in resolver, different provenance.
    #[derive(Debug)]
    struct LookAlike(FxHashMap<String, DomainTag>);

    impl UnitResolver for LookAlike {
        fn resolve(&self, name: &str) -> Option<&'static LoadingDomain> {
            self.0.get(name).copied().and_then(LoadingDomain::for_tag)
        }
    }

    fn builtin() -> BuiltinResolver {
        let t = table(&["A"], &["B"], &[]);
        BuiltinResolver::with_table(&t, &Configuration::from_names(["A", "B", "C"]).unwrap())
    }

    #[test]
    fn builtin_resolver_is_trusted() {
        let resolver = builtin();
        assert!(is_builtin_resolver(&resolver));

        let shared: Arc<dyn UnitResolver> = Arc::new(builtin());
        assert!(is_builtin_resolver(shared.as_ref()));
    }

    #[test]
    fn look_alike_with_identical_mapping_is_untrusted() {
        let original = builtin();
        let copy = LookAlike(original.iter().map(|(n, t)| (n.as_str().to_owned(), t)).collect());

        for name in ["A", "B", "C", "Z"] {
            assert_eq!(copy.resolve(name), original.resolve(name));
        }
        assert!(!is_builtin_resolver(&copy));
    }

    #[test]
    fn closures_are_untrusted() {
        let original = builtin();
        let closure = move |name: &str| original.resolve(name);

        assert_eq!(closure.resolve("B"), Some(LoadingDomain::platform()));
        assert!(!is_builtin_resolver(&closure));
    }
}
