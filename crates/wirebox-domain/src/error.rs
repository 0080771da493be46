//! Error handling types

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::role::{Role, TypeKey};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by wrapping variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the wirebox container
#[derive(Error, Debug)]
pub enum Error {
    /// A concrete type cannot yield a valid injection plan (raised at bind time)
    #[error("Illegal component {component}: {reason}")]
    IllegalComponent {
        /// The type whose shape was rejected
        component: TypeKey,
        /// Which shape rule was violated
        reason: IllegalComponentReason,
    },

    /// A bound role depends on a role that has no binding (raised at finalize time)
    #[error("Dependency not found: {component} requires {dependency}")]
    DependencyNotFound {
        /// The role whose dependency is missing
        component: TypeKey,
        /// The missing role
        dependency: TypeKey,
    },

    /// A direct dependency chain revisits a role already on the path (raised at finalize time)
    #[error("Cyclic dependencies found: {}", CyclePath(components))]
    CyclicDependency {
        /// Roles on the cycle, in walk order
        components: Vec<TypeKey>,
    },

    /// A constructor, field setter or injection method failed while building a component
    #[error("Failed to construct {component}: {source}")]
    Construction {
        /// The component being built
        component: TypeKey,
        /// The underlying failure
        #[source]
        source: BoxedSource,
    },

    /// A role required during construction resolved to nothing
    #[error("Required role {role} resolved to nothing")]
    Unresolved {
        /// The role that could not be resolved
        role: Role,
    },

    /// A resolved value does not have the requested type
    #[error("Type mismatch: resolved value is not a {expected}")]
    TypeMismatch {
        /// The type that was requested
        expected: TypeKey,
    },

    /// An injection point asked for more arguments than were resolved for it
    #[error("Missing argument of type {expected}")]
    MissingArgument {
        /// The type of the argument that was asked for
        expected: TypeKey,
    },

    /// A role was bound twice while the strict rebind policy is active
    #[error("Role {role} is already bound")]
    DuplicateBinding {
        /// The role that was bound twice
        role: TypeKey,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

/// Why a component type was rejected by the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalComponentReason {
    /// The type is abstract
    Abstract,
    /// The type is an interface
    Interface,
    /// More than one constructor carries the injection marker
    AmbiguousConstructors {
        /// Number of marked constructors found
        count: usize,
    },
    /// No marked constructor and no no-argument constructor
    NoUsableConstructor,
    /// A marked field is immutable
    ImmutableField {
        /// Name of the offending field
        field: &'static str,
    },
    /// A marked method declares its own type parameters
    GenericMethod {
        /// Name of the offending method
        method: &'static str,
    },
    /// The metadata supplied for a type describes a different type
    MismatchedTypeInfo {
        /// The type the metadata was requested for
        expected: TypeKey,
        /// The type the metadata actually describes
        described: TypeKey,
    },
}

impl fmt::Display for IllegalComponentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abstract => write!(f, "type is abstract"),
            Self::Interface => write!(f, "type is an interface"),
            Self::AmbiguousConstructors { count } => {
                write!(f, "{count} constructors carry the injection marker")
            }
            Self::NoUsableConstructor => {
                write!(f, "no injection constructor and no no-argument constructor")
            }
            Self::ImmutableField { field } => write!(f, "injected field `{field}` is immutable"),
            Self::GenericMethod { method } => {
                write!(f, "injected method `{method}` declares type parameters")
            }
            Self::MismatchedTypeInfo {
                expected,
                described,
            } => write!(f, "type info for {expected} describes {described}"),
        }
    }
}

struct CyclePath<'a>(&'a [TypeKey]);

impl fmt::Display for CyclePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.0 {
            write!(f, "{key} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

// Container error creation methods
impl Error {
    /// Create an illegal component error
    pub fn illegal_component(component: TypeKey, reason: IllegalComponentReason) -> Self {
        Self::IllegalComponent { component, reason }
    }

    /// Create a dependency not found error
    pub fn dependency_not_found(component: TypeKey, dependency: TypeKey) -> Self {
        Self::DependencyNotFound {
            component,
            dependency,
        }
    }

    /// Create a cyclic dependency error
    pub fn cyclic_dependency(components: Vec<TypeKey>) -> Self {
        Self::CyclicDependency { components }
    }

    /// Create a duplicate binding error
    pub fn duplicate_binding(role: TypeKey) -> Self {
        Self::DuplicateBinding { role }
    }
}

// Resolution error creation methods
impl Error {
    /// Wrap a failure raised while constructing `component`
    pub fn construction<E: Into<BoxedSource>>(component: TypeKey, source: E) -> Self {
        Self::Construction {
            component,
            source: source.into(),
        }
    }

    /// Create an unresolved role error
    pub fn unresolved(role: Role) -> Self {
        Self::Unresolved { role }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: TypeKey) -> Self {
        Self::TypeMismatch { expected }
    }

    /// Create a missing argument error
    pub fn missing_argument(expected: TypeKey) -> Self {
        Self::MissingArgument { expected }
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Queries
impl Error {
    /// Roles on the reported cycle, if this is a cyclic dependency error
    pub fn cycle(&self) -> Option<HashSet<TypeKey>> {
        match self {
            Self::CyclicDependency { components } => Some(components.iter().copied().collect()),
            _ => None,
        }
    }

    /// Whether this error was raised while validating a component's shape
    pub fn is_illegal_component(&self) -> bool {
        matches!(self, Self::IllegalComponent { .. })
    }
}
