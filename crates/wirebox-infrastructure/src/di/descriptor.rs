//! Component Descriptor
//!
//! Turns the [`TypeInfo`] of one concrete type into a validated injection
//! plan: the constructor to call, the fields to assign and the methods to
//! invoke, in order, plus the flat list of roles the plan depends on.
//!
//! ## Ordering
//!
//! ```text
//! constructor params ─► fields (ancestors first) ─► methods (ancestors first)
//! ```
//!
//! The same order is used for [`ComponentDescriptor::dependencies`] and for
//! construction in [`ComponentDescriptor::get`].

use std::any::Any;
use std::sync::Arc;

use tracing::debug;
use wirebox_domain::error::{Error, IllegalComponentReason, Result};
use wirebox_domain::introspection::{
    Constructor, Field, Method, Object, Projection, TypeInfo, TypeKind,
};
use wirebox_domain::ports::Resolve;
use wirebox_domain::role::{Role, TypeKey};
use wirebox_domain::value::Args;

/// A member together with how deep in the lineage it was declared
///
/// Depth 0 is the concrete type, depth 1 its supertype, and so on.
#[derive(Clone)]
struct Inherited<M> {
    member: M,
    depth: usize,
}

/// Validated injection plan for one concrete type
#[derive(Clone)]
pub struct ComponentDescriptor {
    component: TypeKey,
    constructor: Constructor,
    fields: Vec<Inherited<Field>>,
    methods: Vec<Inherited<Method>>,
    /// Projection from depth `n` to depth `n + 1`
    projections: Vec<Arc<dyn Projection>>,
    dependencies: Vec<Role>,
}

impl ComponentDescriptor {
    /// Build the plan for `info`, rejecting shapes that cannot be injected
    pub fn new(info: &TypeInfo) -> Result<Self> {
        let component = info.key();
        let illegal = |reason| Error::illegal_component(component, reason);

        match info.kind() {
            TypeKind::Concrete => {}
            TypeKind::Abstract => return Err(illegal(IllegalComponentReason::Abstract)),
            TypeKind::Interface => return Err(illegal(IllegalComponentReason::Interface)),
        }

        if let Some(supertype) = info
            .lineage()
            .filter_map(TypeInfo::supertype)
            .find(|supertype| supertype.info().key() != supertype.target())
        {
            return Err(illegal(IllegalComponentReason::MismatchedTypeInfo {
                expected: supertype.target(),
                described: supertype.info().key(),
            }));
        }

        let constructor = select_constructor(info)?;
        let fields = collect_fields(info)?;
        let methods = collect_methods(info)?;
        let projections = info
            .lineage()
            .filter_map(|level| level.supertype())
            .map(|supertype| Arc::clone(supertype.projection()))
            .collect();

        let dependencies = constructor
            .params()
            .iter()
            .copied()
            .chain(fields.iter().map(|field| field.member.role()))
            .chain(
                methods
                    .iter()
                    .flat_map(|method| method.member.params().iter().copied()),
            )
            .collect();

        debug!(
            component = %component,
            constructor_params = constructor.params().len(),
            fields = fields.len(),
            methods = methods.len(),
            "Built component descriptor"
        );

        Ok(Self {
            component,
            constructor,
            fields,
            methods,
            projections,
            dependencies,
        })
    }

    /// The described type
    pub fn component(&self) -> TypeKey {
        self.component
    }

    /// Every role the plan needs, in construction order
    ///
    /// Deferred roles are kept as such.
    pub fn dependencies(&self) -> &[Role] {
        &self.dependencies
    }

    /// The types behind [`dependencies`](Self::dependencies), deferred roles unwrapped
    pub fn dependency_keys(&self) -> Vec<TypeKey> {
        self.dependencies.iter().map(Role::inner).collect()
    }

    /// Parameter roles of the chosen constructor
    pub fn constructor_params(&self) -> &[Role] {
        self.constructor.params()
    }

    /// Names of the injected fields, in assignment order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.member.name()).collect()
    }

    /// Names of the injected methods, in invocation order
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|method| method.member.name()).collect()
    }

    /// Build a fully wired instance, resolving every dependency through `resolver`
    pub fn get(&self, resolver: &dyn Resolve) -> Result<Object> {
        let args = self.resolve_args(resolver, self.constructor.params())?;
        let mut object = self
            .constructor
            .construct(args)
            .map_err(|e| Error::construction(self.component, e))?;

        for field in &self.fields {
            let args = self.resolve_args(resolver, std::slice::from_ref(&field.member.role()))?;
            let target = self.project(&mut *object, field.depth)?;
            field
                .member
                .assign(target, args)
                .map_err(|e| Error::construction(self.component, e))?;
        }

        for method in &self.methods {
            let args = self.resolve_args(resolver, method.member.params())?;
            let target = self.project(&mut *object, method.depth)?;
            method
                .member
                .invoke(target, args)
                .map_err(|e| Error::construction(self.component, e))?;
        }

        Ok(object)
    }

    fn resolve_args(&self, resolver: &dyn Resolve, roles: &[Role]) -> Result<Args> {
        roles
            .iter()
            .map(|role| {
                resolver
                    .resolve(role)?
                    .ok_or_else(|| Error::construction(self.component, Error::unresolved(*role)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Args::new)
    }

    fn project<'a>(&self, object: &'a mut dyn Any, depth: usize) -> Result<&'a mut dyn Any> {
        self.projections[..depth]
            .iter()
            .try_fold(object, |current, projection| {
                projection
                    .project(current)
                    .ok_or_else(|| Error::type_mismatch(self.component))
            })
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("component", &self.component)
            .field("constructor", &self.constructor.params())
            .field("fields", &self.field_names())
            .field("methods", &self.method_names())
            .finish()
    }
}

fn select_constructor(info: &TypeInfo) -> Result<Constructor> {
    let marked: Vec<&Constructor> = info
        .constructors()
        .iter()
        .filter(|constructor| constructor.is_marked())
        .collect();

    match marked.as_slice() {
        [constructor] => Ok((*constructor).clone()),
        [] => info
            .constructors()
            .iter()
            .find(|constructor| constructor.params().is_empty())
            .cloned()
            .ok_or_else(|| {
                Error::illegal_component(info.key(), IllegalComponentReason::NoUsableConstructor)
            }),
        _ => Err(Error::illegal_component(
            info.key(),
            IllegalComponentReason::AmbiguousConstructors {
                count: marked.len(),
            },
        )),
    }
}

/// Marked fields of the whole lineage, most general type first
fn collect_fields(info: &TypeInfo) -> Result<Vec<Inherited<Field>>> {
    let levels: Vec<&TypeInfo> = info.lineage().collect();
    let mut fields = Vec::new();

    for (depth, level) in levels.iter().enumerate().rev() {
        for field in level.fields().iter().filter(|field| field.is_marked()) {
            if field.is_immutable() {
                return Err(Error::illegal_component(
                    info.key(),
                    IllegalComponentReason::ImmutableField {
                        field: field.name(),
                    },
                ));
            }
            fields.push(Inherited {
                member: field.clone(),
                depth,
            });
        }
    }

    Ok(fields)
}

/// Marked methods of the whole lineage, most general type first
///
/// The lineage is scanned most specific first. A method is dropped when a more
/// specific level already declared the same signature: with the marker it was
/// recorded there, without it the override switched injection off.
fn collect_methods(info: &TypeInfo) -> Result<Vec<Inherited<Method>>> {
    let mut declared: Vec<&Method> = Vec::new();
    let mut levels: Vec<Vec<Inherited<Method>>> = Vec::new();

    for (depth, level) in info.lineage().enumerate() {
        let mut injected = Vec::new();
        for method in level.methods() {
            let overridden = declared.iter().any(|seen| seen.same_signature(method));
            if method.is_marked() && !overridden {
                if method.is_generic() {
                    return Err(Error::illegal_component(
                        info.key(),
                        IllegalComponentReason::GenericMethod {
                            method: method.name(),
                        },
                    ));
                }
                injected.push(Inherited {
                    member: method.clone(),
                    depth,
                });
            }
        }
        declared.extend(level.methods());
        levels.push(injected);
    }

    Ok(levels.into_iter().rev().flatten().collect())
}
