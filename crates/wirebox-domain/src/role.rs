//! Roles - the identifiers dependencies are requested by
//!
//! A [`Role`] is either a plain type (`Direct`) or a deferred handle to a
//! type (`Deferred`). The validator and the resolver branch on the variant;
//! only `Direct` edges take part in cycle detection.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a Rust type
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T` (trait objects allowed)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, as reported by [`std::any::type_name`]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// What a dependency is requested as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The value bound to the type itself
    Direct(TypeKey),
    /// A handle that resolves the type later, on demand
    Deferred(TypeKey),
}

impl Role {
    /// Direct role for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Direct(TypeKey::of::<T>())
    }

    /// Deferred-handle role wrapping `T`
    pub fn deferred<T: ?Sized + 'static>() -> Self {
        Self::Deferred(TypeKey::of::<T>())
    }

    /// The wrapped type, for both kinds
    pub fn inner(&self) -> TypeKey {
        match *self {
            Self::Direct(key) | Self::Deferred(key) => key,
        }
    }

    /// Whether this is a deferred-handle role
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<TypeKey> for Role {
    fn from(key: TypeKey) -> Self {
        Self::Direct(key)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(key) => write!(f, "{key}"),
            Self::Deferred(key) => write!(f, "Provider<{key}>"),
        }
    }
}
