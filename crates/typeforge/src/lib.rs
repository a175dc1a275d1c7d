// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typeforge - metadata-driven object construction
//!
//! Builds objects from type metadata registered at startup instead of from
//! types known at the call site.
//!
//! # Features
//!
//! - **TypeDescriptor**: registered constructors and named fields of a type
//! - **Recursive instantiation**: wire a whole object graph from its root type
//! - **Config population**: fill a default instance from `key=value` text
//! - **Introspection**: describe constructors/fields, snapshot field values
//!
//! # Example
//!
//! ```rust
//! use typeforge::{
//!     instantiate_as, HashMapTypeRegistry, TypeDescriptorBuilder,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Engine;
//!
//! #[derive(Debug)]
//! struct Car {
//!     engine: Engine,
//!     max_speed: i32,
//! }
//!
//! let mut registry = HashMapTypeRegistry::new();
//! registry
//!     .register(TypeDescriptorBuilder::<Engine>::new().constructor(Engine::default).build()?)?;
//! registry.register(
//!     TypeDescriptorBuilder::<Car>::new()
//!         .constructor1(|engine: Engine| Car { engine, max_speed: 0 })
//!         .build()?,
//! )?;
//!
//! let car: Car = instantiate_as(&registry)?;
//! assert_eq!(car.max_speed, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Config text is one `key=value` pair per line; array fields take a
//! comma-separated list:
//!
//! ```text
//! PORT=8080
//! LEVELS=1,2,3
//! ```

mod builder;
mod convert;
mod descriptor;
mod error;
mod inspect;
mod instantiate;
mod parse;
mod populate;
mod registry;
mod resolver;
mod value;

pub use builder::TypeDescriptorBuilder;
pub use convert::{FromValue, IntoValue, Scalar};
pub use descriptor::{
    ArgumentError, Args, ConstructorDescriptor, DeclaredKind, FieldDescriptor, Instance,
    TypeDescriptor, TypeKey, ValueKind,
};
pub use error::{ConstructError, RegistryError, ScalarParseError};
pub use inspect::{inspect, FieldSnapshot};
pub use instantiate::{construct_with, construct_with_as, instantiate, instantiate_as};
pub use parse::{parse_scalar, split_array};
pub use populate::{ConfigEntry, ConfigPopulator, PopulateOptions, UnknownFieldPolicy};
pub use registry::{HashMapTypeRegistry, TypeRegistry};
pub use resolver::{resolve_by_arity, resolve_first};
pub use value::{ArrayValue, Value};
