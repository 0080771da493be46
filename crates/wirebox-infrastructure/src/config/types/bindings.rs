//! Binding registry configuration types

use serde::{Deserialize, Serialize};

/// What happens when a role that is already bound gets bound again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebindPolicy {
    /// The later binding silently replaces the earlier one
    #[default]
    Replace,
    /// The later binding replaces the earlier one and a warning is logged
    Warn,
    /// The later binding is refused with `Error::DuplicateBinding`
    Reject,
}

/// Binding registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    /// Rebind policy
    pub rebind: RebindPolicy,
}
