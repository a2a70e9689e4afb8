//! Facade crate for loadmap.
//! Re-exports the domain vocabulary and the kernel (membership, resolver, trust gate).
//! Keep this crate thin: it should compose other crates, not implement mapping logic.
//!
//! ## Usage
//! ```rust
//! use loadmap::prelude::*;
//!
//! let cf = Configuration::from_names(["base", "demo.app"]).unwrap();
//! let layer = UnitLayer::define(&cf, &mapping_function(&cf)).unwrap();
//! assert_eq!(layer.domain_of("demo.app"), Some(DomainTag::Application));
//! ```

pub use loadmap_domain as domain;
pub use loadmap_kernel as kernel;

pub mod prelude {
    pub use loadmap_domain::config::{LoadmapConfig, LogFormat, LoggingConfig};
    pub use loadmap_kernel::prelude::*;
}
