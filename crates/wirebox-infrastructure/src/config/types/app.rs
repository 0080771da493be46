//! Main container configuration

use serde::{Deserialize, Serialize};

use super::bindings::BindingsConfig;
use super::logging::LoggingConfig;

/// Container configuration
///
/// Only policies and observability are configured here; bindings themselves
/// are always declared in code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Binding registry settings
    pub bindings: BindingsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
