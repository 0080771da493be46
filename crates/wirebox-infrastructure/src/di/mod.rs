//! Dependency Injection Engine
//!
//! Binding, validation and construction of component graphs.
//!
//! ## Flow
//!
//! ```text
//! BindingRegistry::bind_*  ──►  BindingRegistry::finalize  ──►  Context::resolve
//!        │                              │                              │
//!        ▼                              ▼                              ▼
//! ComponentDescriptor::new      DependencyValidator          ComponentDescriptor::get
//! (shape checks, bind time)     (missing roles, cycles)      (construct, fields, methods)
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`descriptor`] | Injection plan for one concrete type |
//! | [`registry`] | Bindings accumulated before finalization |
//! | [`validator`] | Missing-dependency and cycle detection |
//! | [`context`] | Runtime resolution over the frozen bindings |

pub mod context;
pub mod descriptor;
pub mod registry;
pub mod validator;

pub use context::Context;
pub use descriptor::ComponentDescriptor;
pub use registry::{Binding, BindingRegistry, ComponentBinding, Upcast};
pub use validator::DependencyValidator;
