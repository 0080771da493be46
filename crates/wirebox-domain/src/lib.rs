//! # Domain Layer
//!
//! Core types of the wirebox dependency-injection container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`role`] | Type keys and the direct / deferred roles dependencies are requested by |
//! | [`value`] | Type-erased resolved values, deferred handles, injection arguments |
//! | [`introspection`] | Per-type injection metadata and the `Injectable` contract |
//! | [`ports`] | The `Resolve` port construction goes through |
//! | [`error`] | The container error taxonomy |
//!
//! Nothing here builds or validates a graph; that lives in
//! `wirebox-infrastructure`.

pub mod error;
pub mod introspection;
pub mod ports;
pub mod role;
pub mod value;

pub use error::{Error, IllegalComponentReason, Result};
pub use introspection::{
    Constructor, Field, Implements, Injectable, Method, Object, Projection, Supertype, TypeInfo,
    TypeInfoBuilder, TypeKind,
};
pub use ports::Resolve;
pub use role::{Role, TypeKey};
pub use value::{Args, DeferredHandle, Instance, Provider};
