//! Context - the runtime resolver
//!
//! A [`Context`] is the frozen, validated set of bindings. Resolving never
//! writes anything: instance bindings are handed out as-is and component
//! bindings are constructed again on every lookup.
//!
//! Clones share the same bindings, so a context can be passed to other
//! threads or captured by deferred handles freely.

use std::sync::Arc;

use tracing::trace;
use wirebox_domain::error::{Error, Result};
use wirebox_domain::ports::Resolve;
use wirebox_domain::role::{Role, TypeKey};
use wirebox_domain::value::{DeferredHandle, Instance, Provider};

use crate::di::registry::{Binding, Bindings};

/// Read-only resolver over a validated registry
#[derive(Clone)]
pub struct Context {
    bindings: Arc<Bindings>,
}

impl Context {
    pub(crate) fn new(bindings: Bindings) -> Self {
        Self {
            bindings: Arc::new(bindings),
        }
    }

    /// Resolve `role`
    ///
    /// An unbound role yields `Ok(None)`. A deferred role yields a handle
    /// that resolves the wrapped type each time it is invoked.
    pub fn resolve(&self, role: &Role) -> Result<Option<Instance>> {
        trace!(role = %role, "Resolving");
        match *role {
            Role::Direct(key) => self
                .bindings
                .get(&key)
                .map(|binding| binding.provide(self))
                .transpose(),
            Role::Deferred(key) => Ok(self
                .bindings
                .contains_key(&key)
                .then(|| self.deferred(key))),
        }
    }

    fn deferred(&self, key: TypeKey) -> Instance {
        let context = self.clone();
        Instance::deferred(DeferredHandle::new(key, move || {
            context.resolve(&Role::Direct(key))
        }))
    }

    /// Resolve role `R` to a typed value
    pub fn get<R>(&self) -> Result<Option<Arc<R>>>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        self.resolve(&Role::of::<R>())?
            .map(|instance| {
                instance
                    .downcast::<R>()
                    .ok_or_else(|| Error::type_mismatch(TypeKey::of::<R>()))
            })
            .transpose()
    }

    /// Deferred handle to role `R`, if `R` is bound
    pub fn get_provider<R>(&self) -> Result<Option<Provider<R>>>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        Ok(self
            .resolve(&Role::deferred::<R>())?
            .and_then(|instance| instance.as_deferred().cloned())
            .map(Provider::new))
    }

    /// Whether `role` has a binding
    pub fn contains(&self, role: TypeKey) -> bool {
        self.bindings.contains_key(&role)
    }

    /// Bound roles, in registration order
    pub fn roles(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.bindings.keys().copied()
    }

    /// The binding of `role`, if any
    pub fn binding(&self, role: TypeKey) -> Option<&Binding> {
        self.bindings.get(&role)
    }
}

impl Resolve for Context {
    fn resolve(&self, role: &Role) -> Result<Option<Instance>> {
        Context::resolve(self, role)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("roles", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}
