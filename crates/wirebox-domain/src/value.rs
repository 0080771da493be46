//! Resolved values
//!
//! [`Instance`] is the type-erased value the container hands around; it
//! always wraps an `Arc<R>` for the role `R` it was resolved for, or a
//! [`DeferredHandle`] when a deferred role was requested. [`Args`] is the
//! ordered list of resolved values given to one injection point, with typed
//! extraction.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::role::{Role, TypeKey};

/// A resolved, type-erased value
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap a value shared under role `R`
    pub fn of<R: ?Sized + Send + Sync + 'static>(value: Arc<R>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// Wrap a deferred handle
    pub fn deferred(handle: DeferredHandle) -> Self {
        Self {
            value: Arc::new(handle),
        }
    }

    /// The wrapped value as `Arc<R>`, if it was stored under `R`
    pub fn downcast<R: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<R>> {
        self.value.downcast_ref::<Arc<R>>().cloned()
    }

    /// The wrapped deferred handle, if this instance holds one
    pub fn as_deferred(&self) -> Option<&DeferredHandle> {
        self.value.downcast_ref::<DeferredHandle>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("deferred", &self.as_deferred().is_some())
            .finish_non_exhaustive()
    }
}

impl<R: ?Sized + Send + Sync + 'static> From<Provider<R>> for Instance {
    fn from(provider: Provider<R>) -> Self {
        Self::deferred(provider.handle)
    }
}

type ResolveFn = dyn Fn() -> Result<Option<Instance>> + Send + Sync;

/// Untyped deferred resolution of one type
///
/// Every call to [`DeferredHandle::resolve`] runs the resolution again; nothing
/// is cached.
#[derive(Clone)]
pub struct DeferredHandle {
    target: TypeKey,
    resolve: Arc<ResolveFn>,
}

impl DeferredHandle {
    /// Create a handle that resolves `target` by calling `resolve`
    pub fn new<F>(target: TypeKey, resolve: F) -> Self
    where
        F: Fn() -> Result<Option<Instance>> + Send + Sync + 'static,
    {
        Self {
            target,
            resolve: Arc::new(resolve),
        }
    }

    /// The type this handle resolves
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Resolve the target now
    pub fn resolve(&self) -> Result<Option<Instance>> {
        (self.resolve)()
    }

    /// Whether both handles share the same resolution closure
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.resolve, &other.resolve)
    }
}

impl fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredHandle")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Typed deferred handle to a role `R`
///
/// Injected wherever a component asks for `Role::deferred::<R>()`. Holding a
/// provider does not construct anything; [`Provider::get`] does, every time
/// it is called.
pub struct Provider<R: ?Sized> {
    handle: DeferredHandle,
    _role: PhantomData<fn() -> Arc<R>>,
}

impl<R: ?Sized + Send + Sync + 'static> Provider<R> {
    /// Typed view over an untyped handle
    pub fn new(handle: DeferredHandle) -> Self {
        Self {
            handle,
            _role: PhantomData,
        }
    }

    /// Provider backed by a plain closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Result<Arc<R>> + Send + Sync + 'static,
    {
        Self::new(DeferredHandle::new(TypeKey::of::<R>(), move || {
            f().map(|value| Some(Instance::of(value)))
        }))
    }

    /// Resolve `R` now
    pub fn get(&self) -> Result<Arc<R>> {
        let target = self.handle.target();
        self.handle
            .resolve()?
            .ok_or_else(|| Error::unresolved(Role::Direct(target)))?
            .downcast::<R>()
            .ok_or_else(|| Error::type_mismatch(TypeKey::of::<R>()))
    }

    /// Whether both providers share the same underlying handle
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.handle.ptr_eq(&other.handle)
    }
}

impl<R: ?Sized> Clone for Provider<R> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _role: PhantomData,
        }
    }
}

impl<R: ?Sized> fmt::Debug for Provider<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Provider").field(&self.handle.target).finish()
    }
}

/// Resolved values for one injection point, in parameter order
#[derive(Debug)]
pub struct Args {
    values: std::vec::IntoIter<Instance>,
}

impl Args {
    /// Arguments from already-resolved values
    pub fn new(values: Vec<Instance>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// No arguments
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of arguments not taken yet
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Take the next argument as `Arc<R>`
    pub fn take<R: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<R>> {
        self.next_value(TypeKey::of::<R>())?
            .downcast::<R>()
            .ok_or_else(|| Error::type_mismatch(TypeKey::of::<R>()))
    }

    /// Take the next argument as a deferred handle to `R`
    pub fn take_provider<R: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Provider<R>> {
        let instance = self.next_value(TypeKey::of::<Provider<R>>())?;
        let handle = instance
            .as_deferred()
            .filter(|handle| handle.target() == TypeKey::of::<R>())
            .ok_or_else(|| Error::type_mismatch(TypeKey::of::<Provider<R>>()))?;
        Ok(Provider::new(handle.clone()))
    }

    fn next_value(&mut self, expected: TypeKey) -> Result<Instance> {
        self.values
            .next()
            .ok_or_else(|| Error::missing_argument(expected))
    }
}
