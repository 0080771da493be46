//! Configuration types

pub mod app;
pub mod bindings;
pub mod logging;

pub use app::ContainerConfig;
pub use bindings::{BindingsConfig, RebindPolicy};
pub use logging::LoggingConfig;
