//! Binding Registry
//!
//! Accumulates bindings before the container is finalized.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = BindingRegistry::new();
//! registry
//!     .bind_instance::<dyn Clock>(Arc::new(SystemClock))?
//!     .bind_type::<dyn Scheduler, CronScheduler>()?;
//!
//! let context = registry.finalize()?;
//! let scheduler = context.get::<dyn Scheduler>()?;
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use wirebox_domain::error::{Error, IllegalComponentReason, Result};
use wirebox_domain::introspection::{Implements, Injectable, Object, TypeInfo};
use wirebox_domain::ports::Resolve;
use wirebox_domain::role::{Role, TypeKey};
use wirebox_domain::value::Instance;

use crate::config::{ContainerConfig, RebindPolicy};
use crate::di::context::Context;
use crate::di::descriptor::ComponentDescriptor;
use crate::di::validator::DependencyValidator;

/// Converts a constructed component into the value of the role it is bound under
pub type Upcast = Arc<dyn Fn(Object) -> Result<Instance> + Send + Sync>;

/// Bindings keyed by role, in registration order
pub(crate) type Bindings = IndexMap<TypeKey, Binding>;

/// What a role is bound to
#[derive(Clone)]
pub enum Binding {
    /// A fixed, already constructed value
    Instance(Instance),
    /// A component type built on every lookup
    Component(ComponentBinding),
}

impl Binding {
    /// Roles this binding needs, deferred roles included
    pub fn dependencies(&self) -> &[Role] {
        match self {
            Self::Instance(_) => &[],
            Self::Component(component) => component.descriptor.dependencies(),
        }
    }

    pub(crate) fn provide(&self, resolver: &dyn Resolve) -> Result<Instance> {
        match self {
            Self::Instance(instance) => Ok(instance.clone()),
            Self::Component(component) => component.instantiate(resolver),
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Binding::Instance"),
            Self::Component(component) => f
                .debug_tuple("Binding::Component")
                .field(&component.descriptor)
                .finish(),
        }
    }
}

/// A component descriptor plus the upcast into its role
#[derive(Clone)]
pub struct ComponentBinding {
    descriptor: ComponentDescriptor,
    upcast: Upcast,
}

impl ComponentBinding {
    /// Pair a descriptor with its upcast
    pub fn new(descriptor: ComponentDescriptor, upcast: Upcast) -> Self {
        Self { descriptor, upcast }
    }

    /// The injection plan
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    fn instantiate(&self, resolver: &dyn Resolve) -> Result<Instance> {
        (self.upcast)(self.descriptor.get(resolver)?)
    }
}

/// Mutable set of bindings, frozen into a [`Context`] by [`finalize`](Self::finalize)
///
/// Binding a role that is already bound replaces the earlier binding (the
/// role keeps its original registration position). [`RebindPolicy`] can make
/// that noisy or reject it.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Bindings,
    rebind: RebindPolicy,
}

impl BindingRegistry {
    /// Empty registry with the default rebind policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry honouring the binding section of `config`
    pub fn with_config(config: &ContainerConfig) -> Self {
        Self::new().with_rebind_policy(config.bindings.rebind)
    }

    /// Set the rebind policy
    pub fn with_rebind_policy(mut self, rebind: RebindPolicy) -> Self {
        self.rebind = rebind;
        self
    }

    /// Bind role `R` to a fixed instance
    pub fn bind_instance<R>(&mut self, instance: Arc<R>) -> Result<&mut Self>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        self.insert(TypeKey::of::<R>(), Binding::Instance(Instance::of(instance)))
    }

    /// Bind role `R` to the component type `C`
    ///
    /// The descriptor for `C` is built now, so illegal shapes are reported
    /// here and nothing is recorded for `R`. `C::type_info()` must describe
    /// `C` itself.
    pub fn bind_type<R, C>(&mut self) -> Result<&mut Self>
    where
        R: ?Sized + Send + Sync + 'static,
        C: Injectable + Implements<R>,
    {
        let info = C::type_info();
        let component = TypeKey::of::<C>();
        if info.key() != component {
            return Err(Error::illegal_component(
                component,
                IllegalComponentReason::MismatchedTypeInfo {
                    expected: component,
                    described: info.key(),
                },
            ));
        }

        let upcast: Upcast = Arc::new(|object: Object| -> Result<Instance> {
            let component = object
                .downcast::<C>()
                .map_err(|_| Error::type_mismatch(TypeKey::of::<C>()))?;
            Ok(Instance::of::<R>(<C as Implements<R>>::into_role(
                Arc::from(component),
            )))
        });
        self.bind_component(TypeKey::of::<R>(), &info, upcast)
    }

    /// Bind `role` to the type described by `info`, converted with `upcast`
    pub fn bind_component(
        &mut self,
        role: TypeKey,
        info: &TypeInfo,
        upcast: Upcast,
    ) -> Result<&mut Self> {
        let descriptor = ComponentDescriptor::new(info)?;
        self.insert(
            role,
            Binding::Component(ComponentBinding::new(descriptor, upcast)),
        )
    }

    fn insert(&mut self, role: TypeKey, binding: Binding) -> Result<&mut Self> {
        if self.bindings.contains_key(&role) {
            match self.rebind {
                RebindPolicy::Replace => debug!(role = %role, "Replacing existing binding"),
                RebindPolicy::Warn => warn!(role = %role, "Role bound twice, replacing"),
                RebindPolicy::Reject => return Err(Error::duplicate_binding(role)),
            }
        }
        debug!(role = %role, binding = ?binding, "Recorded binding");
        self.bindings.insert(role, binding);
        Ok(self)
    }

    /// Whether `role` has a binding
    pub fn is_bound(&self, role: TypeKey) -> bool {
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

    /// Number of bound roles
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Validate the dependency graph and freeze the bindings into a [`Context`]
    pub fn finalize(self) -> Result<Context> {
        DependencyValidator::new(&self.bindings).validate()?;
        info!(bindings = self.bindings.len(), "Context finalized");
        Ok(Context::new(self.bindings))
    }
}
