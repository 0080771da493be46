//! Port traits
//!
//! The construction engine talks to whatever resolves roles through
//! [`Resolve`]. The runtime context implements it; tests can substitute a
//! stub that hands out fixed values.

use crate::error::Result;
use crate::role::Role;
use crate::value::Instance;

/// Resolves a role to a value
pub trait Resolve: Send + Sync {
    /// Resolve `role`
    ///
    /// Returns `Ok(None)` when the role is not configured; construction
    /// failures are reported as errors.
    fn resolve(&self, role: &Role) -> Result<Option<Instance>>;
}
