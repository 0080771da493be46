//! # wirebox
//!
//! A dependency-injection container. Roles (plain types or trait objects)
//! are bound to fixed instances or to component types; the bindings are
//! validated as a graph once, and a read-only [`Context`] then builds fresh
//! components on every lookup.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wirebox::prelude::*;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock(u64);
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! impl Injectable for Scheduler {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::builder::<Self>()
//!             .inject_constructor([Role::of::<dyn Clock>()], |mut args| {
//!                 Ok(Self {
//!                     clock: args.take::<dyn Clock>()?,
//!                 })
//!             })
//!             .build()
//!     }
//! }
//!
//! # fn main() -> wirebox::Result<()> {
//! let mut registry = BindingRegistry::new();
//! registry
//!     .bind_instance::<dyn Clock>(Arc::new(FixedClock(42)))?
//!     .bind_type::<Scheduler, Scheduler>()?;
//!
//! let context = registry.finalize()?;
//! let scheduler = context.get::<Scheduler>()?.expect("bound");
//! assert_eq!(scheduler.clock.now(), 42);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - roles, resolved values, injection metadata, errors
//! - `infrastructure` - registry, descriptors, validation, context, config, logging

/// Domain layer - roles, values, injection metadata and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wirebox_domain::*;
}

/// Infrastructure layer - container engine, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wirebox_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;
pub use wirebox_domain::implements;

// Re-export the container entry points at the crate root
pub use infrastructure::{
    BindingRegistry, ComponentDescriptor, ConfigLoader, ContainerConfig, Context, RebindPolicy,
};

/// Everything needed to describe components and wire a container
pub mod prelude {
    pub use crate::implements;
    pub use wirebox_domain::{
        Args, Error, Implements, Injectable, Provider, Result, Role, TypeInfo, TypeKey,
    };
    pub use wirebox_infrastructure::{BindingRegistry, Context, RebindPolicy};
}
