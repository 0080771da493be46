//! # Infrastructure Layer
//!
//! The container engine and the technical concerns around it.
//!
//! ### Container
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Binding registry, component descriptors, graph validation, runtime context |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered container configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extensions for foreign errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{ConfigLoader, ContainerConfig, RebindPolicy};
pub use di::{BindingRegistry, ComponentDescriptor, Context};
pub use error_ext::ErrorContext;
