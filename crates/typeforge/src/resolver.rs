// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor selection.

use crate::descriptor::{ConstructorDescriptor, TypeDescriptor};
use crate::error::ConstructError;

/// First constructor in declaration order, whatever its parameters.
pub fn resolve_first(desc: &TypeDescriptor) -> Result<&ConstructorDescriptor, ConstructError> {
    desc.constructors()
        .first()
        .ok_or(ConstructError::NoConstructorsDeclared(desc.key()))
}

/// First declared constructor taking exactly `arity` parameters.
pub fn resolve_by_arity(
    desc: &TypeDescriptor,
    arity: usize,
) -> Result<&ConstructorDescriptor, ConstructError> {
    desc.constructors()
        .iter()
        .find(|c| c.arity() == arity)
        .ok_or(ConstructError::NoMatchingConstructor {
            ty: desc.key(),
            arity,
        })
}
