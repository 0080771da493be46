//! Dependency Graph Validator
//!
//! Proves a set of bindings can be resolved before anything is constructed.
//!
//! Every bound role is walked depth first, in registration order, with the
//! chain of roles currently being visited kept on a path stack:
//!
//! - a direct dependency must be bound and must not already be on the path;
//! - a deferred dependency only has to be bound. It is resolved later, on
//!   demand, so it never takes part in a construction cycle.

use std::collections::HashSet;

use tracing::trace;
use wirebox_domain::error::{Error, Result};
use wirebox_domain::role::{Role, TypeKey};

use crate::di::registry::{Binding, Bindings};

/// Walks the bindings of one registry
pub struct DependencyValidator<'a> {
    bindings: &'a Bindings,
    /// Roles whose whole dependency subgraph is known to be sound
    verified: HashSet<TypeKey>,
}

impl<'a> DependencyValidator<'a> {
    pub(crate) fn new(bindings: &'a Bindings) -> Self {
        Self {
            bindings,
            verified: HashSet::new(),
        }
    }

    /// Report the first missing dependency or cycle found
    pub fn validate(mut self) -> Result<()> {
        let bindings = self.bindings;
        for (&component, binding) in bindings {
            let mut path = vec![component];
            self.visit(component, binding, &mut path)?;
        }
        Ok(())
    }

    fn visit(
        &mut self,
        component: TypeKey,
        binding: &'a Binding,
        path: &mut Vec<TypeKey>,
    ) -> Result<()> {
        if self.verified.contains(&component) {
            return Ok(());
        }
        let bindings = self.bindings;
        trace!(component = %component, depth = path.len(), "Checking dependencies");

        for dependency in binding.dependencies() {
            match *dependency {
                Role::Deferred(inner) => {
                    if !bindings.contains_key(&inner) {
                        return Err(Error::dependency_not_found(component, inner));
                    }
                }
                Role::Direct(key) => {
                    let Some(next) = bindings.get(&key) else {
                        return Err(Error::dependency_not_found(component, key));
                    };
                    if let Some(start) = path.iter().position(|visiting| *visiting == key) {
                        return Err(Error::cyclic_dependency(path[start..].to_vec()));
                    }
                    path.push(key);
                    self.visit(key, next, path)?;
                    path.pop();
                }
            }
        }

        self.verified.insert(component);
        Ok(())
    }
}
