//! # Kernel
//!
//! Maps resolved units to the built-in loading domains and guards privileged placement.
//!
//! * [`membership`]: boot, platform and native-access sets compiled in at build time.
//! * [`resolver`]: per-configuration resolver ([`mapping_function`]).
//! * [`trust`]: the provenance check ([`is_builtin_resolver`]).
//! * [`definition`]: places units into domains, refusing untrusted privileged placement.
//!
//! ## Example
//! ```rust
//! use loadmap_kernel::prelude::*;
//!
//! let cf = Configuration::from_names(["base", "sql", "demo.app"]).unwrap();
//! let resolver = mapping_function(&cf);
//!
//! assert!(is_builtin_resolver(&resolver));
//! assert_eq!(resolver.resolve("demo.app"), Some(LoadingDomain::application()));
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod configuration;
pub mod definition;
pub mod domain;
pub mod membership;
pub mod prelude;
pub mod resolver;
pub mod trust;
pub mod unit;

pub use loadmap_domain as vocabulary;
pub use resolver::mapping_function;
pub use trust::is_builtin_resolver;
