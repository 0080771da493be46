//! Injection metadata
//!
//! Rust has no runtime reflection, so every component type describes itself
//! through a [`TypeInfo`]: its kind (concrete, abstract, interface), its
//! declared constructors, fields and methods, whether each carries the
//! injection marker, and the embedded supertype it extends, if any. The
//! container only ever looks at this metadata; how it is produced (by hand,
//! by a macro, by a code generator) is up to the caller.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wirebox_domain::{Injectable, Role, TypeInfo};
//!
//! trait Clock: Send + Sync {}
//!
//! struct Scheduler {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! impl Injectable for Scheduler {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::builder::<Self>()
//!             .inject_constructor([Role::of::<dyn Clock>()], |mut args| {
//!                 Ok(Self {
//!                     clock: args.take::<dyn Clock>()?,
//!                 })
//!             })
//!             .build()
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Error;
use crate::role::{Role, TypeKey};
use crate::value::Args;

/// A component under construction
pub type Object = Box<dyn Any + Send + Sync>;

type ConstructFn = dyn Fn(Args) -> anyhow::Result<Object> + Send + Sync;
type ApplyFn = dyn Fn(&mut dyn Any, Args) -> anyhow::Result<()> + Send + Sync;

/// A type that can describe its injection points
pub trait Injectable: Send + Sync + 'static {
    /// Metadata the descriptor is built from
    fn type_info() -> TypeInfo;
}

/// Conversion of a shared component into the role it is bound under
///
/// Every type implements it for itself. Trait-object roles are covered with
/// [`implements!`](crate::implements).
pub trait Implements<R: ?Sized + 'static> {
    /// Upcast to the role
    fn into_role(self: Arc<Self>) -> Arc<R>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
    fn into_role(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Implement [`Implements`] for trait-object roles
///
/// ```
/// use wirebox_domain::implements;
///
/// trait Clock: Send + Sync {}
/// trait Ticker: Send + Sync {}
///
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// impl Ticker for SystemClock {}
///
/// implements!(SystemClock => dyn Clock, dyn Ticker);
/// ```
#[macro_export]
macro_rules! implements {
    ($component:ty => $($role:ty),+ $(,)?) => {
        $(
            impl $crate::introspection::Implements<$role> for $component {
                fn into_role(
                    self: ::std::sync::Arc<Self>,
                ) -> ::std::sync::Arc<$role> {
                    self
                }
            }
        )+
    };
}

/// Kind of a described type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Can be instantiated
    Concrete,
    /// Only meant to be extended
    Abstract,
    /// Pure contract without state
    Interface,
}

/// A declared constructor
#[derive(Clone)]
pub struct Constructor {
    params: Vec<Role>,
    marked: bool,
    construct: Arc<ConstructFn>,
}

impl Constructor {
    /// Parameter roles in declaration order
    pub fn params(&self) -> &[Role] {
        &self.params
    }

    /// Whether the constructor carries the injection marker
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Run the constructor with resolved arguments
    pub fn construct(&self, args: Args) -> anyhow::Result<Object> {
        (self.construct)(args)
    }
}

/// A declared field
#[derive(Clone)]
pub struct Field {
    name: &'static str,
    role: Role,
    marked: bool,
    immutable: bool,
    assign: Arc<ApplyFn>,
}

impl Field {
    /// Field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Role the field is typed as
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the field carries the injection marker
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Whether the field cannot be assigned after construction
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Assign the resolved value to the field of `target`
    pub fn assign(&self, target: &mut dyn Any, args: Args) -> anyhow::Result<()> {
        (self.assign)(target, args)
    }
}

/// A declared method
#[derive(Clone)]
pub struct Method {
    name: &'static str,
    params: Vec<Role>,
    marked: bool,
    generic: bool,
    invoke: Arc<ApplyFn>,
}

impl Method {
    /// Method name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter roles in declaration order
    pub fn params(&self) -> &[Role] {
        &self.params
    }

    /// Whether the method carries the injection marker
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Whether the method declares its own type parameters
    pub fn is_generic(&self) -> bool {
        self.generic
    }

    /// Whether `other` has the same name and parameter roles
    pub fn same_signature(&self, other: &Method) -> bool {
        self.name == other.name && self.params == other.params
    }

    /// Invoke the method on `target` with resolved arguments
    pub fn invoke(&self, target: &mut dyn Any, args: Args) -> anyhow::Result<()> {
        (self.invoke)(target, args)
    }
}

/// Reaches an embedded supertype value inside a subtype value
pub trait Projection: Send + Sync {
    /// The supertype part of `object`, if `object` is the expected subtype
    fn project<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

struct Embedded<S, B> {
    project: fn(&mut S) -> &mut B,
}

impl<S: 'static, B: 'static> Projection for Embedded<S, B> {
    fn project<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        object
            .downcast_mut::<S>()
            .map(|sub| (self.project)(sub) as &mut dyn Any)
    }
}

/// The supertype a type extends
#[derive(Clone)]
pub struct Supertype {
    target: TypeKey,
    info: Box<TypeInfo>,
    projection: Arc<dyn Projection>,
}

impl Supertype {
    /// The type the projection reaches
    ///
    /// Equal to `info().key()` unless the supertype's metadata is malformed.
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Metadata of the supertype
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// How to reach the supertype part of a subtype value
    pub fn projection(&self) -> &Arc<dyn Projection> {
        &self.projection
    }
}

/// Injection metadata of one type
#[derive(Clone)]
pub struct TypeInfo {
    key: TypeKey,
    kind: TypeKind,
    constructors: Vec<Constructor>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    supertype: Option<Supertype>,
}

impl TypeInfo {
    /// Start describing the type `C`
    pub fn builder<C: Send + Sync + 'static>() -> TypeInfoBuilder<C> {
        TypeInfoBuilder {
            info: Self::empty(TypeKey::of::<C>(), TypeKind::Concrete),
            _component: PhantomData,
        }
    }

    /// Metadata for an interface type (usually a trait object)
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::empty(TypeKey::of::<T>(), TypeKind::Interface)
    }

    fn empty(key: TypeKey, kind: TypeKind) -> Self {
        Self {
            key,
            kind,
            constructors: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            supertype: None,
        }
    }

    /// The described type
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Kind of the described type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Constructors declared by the type itself
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Fields declared by the type itself
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Methods declared by the type itself
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The supertype, if the type extends one
    pub fn supertype(&self) -> Option<&Supertype> {
        self.supertype.as_ref()
    }

    /// This type followed by its ancestors, most specific first
    pub fn lineage(&self) -> impl Iterator<Item = &TypeInfo> {
        std::iter::successors(Some(self), |&info| info.supertype().map(Supertype::info))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("constructors", &self.constructors.len())
            .field("fields", &self.fields.len())
            .field("methods", &self.methods.len())
            .field("supertype", &self.supertype.as_ref().map(|s| s.info.key))
            .finish()
    }
}

/// Typed builder for [`TypeInfo`]
///
/// Closures receive the component as `C`; the builder erases them.
pub struct TypeInfoBuilder<C> {
    info: TypeInfo,
    _component: PhantomData<fn() -> C>,
}

impl<C: Send + Sync + 'static> TypeInfoBuilder<C> {
    /// Mark the type abstract
    pub fn mark_abstract(mut self) -> Self {
        self.info.kind = TypeKind::Abstract;
        self
    }

    /// Declare a constructor carrying the injection marker
    pub fn inject_constructor<P, F>(self, params: P, construct: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(Args) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        self.push_constructor(params, true, construct)
    }

    /// Declare a constructor without the marker
    pub fn constructor<P, F>(self, params: P, construct: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(Args) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        self.push_constructor(params, false, construct)
    }

    /// Declare the no-argument constructor via [`Default`]
    pub fn default_constructor(self) -> Self
    where
        C: Default,
    {
        self.push_constructor(std::iter::empty(), false, |_| Ok(C::default()))
    }

    fn push_constructor<P, F>(mut self, params: P, marked: bool, construct: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(Args) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        self.info.constructors.push(Constructor {
            params: params.into_iter().collect(),
            marked,
            construct: Arc::new(move |args: Args| construct(args).map(|c| Box::new(c) as Object)),
        });
        self
    }

    /// Declare a field carrying the injection marker
    pub fn inject_field<F>(mut self, name: &'static str, role: Role, assign: F) -> Self
    where
        F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.info.fields.push(Field {
            name,
            role,
            marked: true,
            immutable: false,
            assign: erase(assign),
        });
        self
    }

    /// Declare an immutable field carrying the injection marker
    ///
    /// Such a field can never be injected; the descriptor rejects the type.
    pub fn inject_immutable_field(mut self, name: &'static str, role: Role) -> Self {
        self.info.fields.push(Field {
            name,
            role,
            marked: true,
            immutable: true,
            assign: erase(move |_: &mut C, _| {
                Err(anyhow::anyhow!("field `{name}` is immutable"))
            }),
        });
        self
    }

    /// Declare a method carrying the injection marker
    pub fn inject_method<P, F>(self, name: &'static str, params: P, invoke: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_method(name, params, true, false, invoke)
    }

    /// Declare a method carrying the injection marker that has its own type parameters
    pub fn inject_generic_method<P, F>(self, name: &'static str, params: P, invoke: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_method(name, params, true, true, invoke)
    }

    /// Declare a method without the marker
    ///
    /// Only relevant when it overrides a marked supertype method.
    pub fn method<P, F>(self, name: &'static str, params: P, invoke: F) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_method(name, params, false, false, invoke)
    }

    fn push_method<P, F>(
        mut self,
        name: &'static str,
        params: P,
        marked: bool,
        generic: bool,
        invoke: F,
    ) -> Self
    where
        P: IntoIterator<Item = Role>,
        F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.info.methods.push(Method {
            name,
            params: params.into_iter().collect(),
            marked,
            generic,
            invoke: erase(invoke),
        });
        self
    }

    /// Extend `B`, embedded in `C` and reached through `project`
    pub fn extends<B: Injectable>(mut self, project: fn(&mut C) -> &mut B) -> Self {
        self.info.supertype = Some(Supertype {
            target: TypeKey::of::<B>(),
            info: Box::new(B::type_info()),
            projection: Arc::new(Embedded { project }),
        });
        self
    }

    /// Finish the description
    pub fn build(self) -> TypeInfo {
        self.info
    }
}

fn erase<C, F>(apply: F) -> Arc<ApplyFn>
where
    C: 'static,
    F: Fn(&mut C, Args) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(move |target: &mut dyn Any, args: Args| -> anyhow::Result<()> {
        let component = target
            .downcast_mut::<C>()
            .ok_or_else(|| Error::type_mismatch(TypeKey::of::<C>()))?;
        apply(component, args)
    })
}
