// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field introspection on live instances.

use crate::descriptor::{TypeKey, ValueKind};
use crate::error::ConstructError;
use crate::registry::TypeRegistry;
use crate::value::Value;
use std::any::Any;
use std::fmt;

/// Current value of one readable field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub name: String,
    pub kind: ValueKind,
    pub is_array: bool,
    pub value: Value,
}

impl fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.is_array { "[]" } else { "" };
        write!(
            f,
            "Field name: {}, type: {}{}, value: {}",
            self.name, self.kind, suffix, self.value
        )
    }
}

/// Read every field of `instance` that was registered with a getter, in
/// declaration order.
pub fn inspect<T, R>(registry: &R, instance: &T) -> Result<Vec<FieldSnapshot>, ConstructError>
where
    T: Any,
    R: TypeRegistry + ?Sized,
{
    let ty = TypeKey::of::<T>();
    let desc = registry
        .lookup(ty)
        .ok_or(ConstructError::UnregisteredType(ty))?;

    let mut snapshots = Vec::new();
    for field in desc.fields() {
        let value = match field.get(instance) {
            Some(Some(value)) => value,
            Some(None) => return Err(ConstructError::InstanceTypeMismatch(ty)),
            None => continue,
        };
        snapshots.push(FieldSnapshot {
            name: field.name().to_string(),
            kind: field.kind(),
            is_array: field.is_array(),
            value,
        });
    }
    Ok(snapshots)
}
