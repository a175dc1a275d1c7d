// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: maps a type's identity to its descriptor.
//!
//! A registry is filled once at startup and read-only afterwards; the
//! engines only ever take `&impl TypeRegistry`.

use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::error::RegistryError;
use std::any::TypeId;
use std::collections::HashMap;

/// Registry that resolves a [`TypeId`] to its [`TypeDescriptor`].
///
/// # Example
///
/// ```
/// use typeforge::{HashMapTypeRegistry, TypeDescriptorBuilder, TypeKey, TypeRegistry};
///
/// #[derive(Default)]
/// struct Board;
///
/// let mut registry = HashMapTypeRegistry::new();
/// registry.register(TypeDescriptorBuilder::<Board>::new().constructor(Board::default).build()?)?;
///
/// let desc = registry.lookup(TypeKey::of::<Board>()).expect("registered");
/// assert_eq!(desc.constructors().len(), 1);
/// # Ok::<(), typeforge::RegistryError>(())
/// ```
pub trait TypeRegistry {
    /// Look up a [`TypeDescriptor`] by type key.
    ///
    /// Returns `None` if the type is unknown.
    fn lookup(&self, key: TypeKey) -> Option<&TypeDescriptor>;
}

/// Simple [`HashMap`]-backed [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct HashMapTypeRegistry {
    types: HashMap<TypeId, TypeDescriptor>,
}

impl HashMapTypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own type key.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<(), RegistryError> {
        let key = descriptor.key();
        if self.types.contains_key(&key.id()) {
            return Err(RegistryError::DuplicateType(key));
        }
        log::debug!("registered type {}", key);
        self.types.insert(key.id(), descriptor);
        Ok(())
    }

    /// Descriptor registered for `T`.
    pub fn get<T: 'static>(&self) -> Option<&TypeDescriptor> {
        self.types.get(&TypeId::of::<T>())
    }

    /// Iterate over every registered descriptor (unordered).
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeRegistry for HashMapTypeRegistry {
    fn lookup(&self, key: TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(&key.id())
    }
}
