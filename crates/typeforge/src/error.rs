// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.

use crate::descriptor::{DeclaredKind, TypeKey, ValueKind};
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Errors raised while building or registering type descriptors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type {0} is already registered")]
    DuplicateType(TypeKey),

    #[error("field {field} is declared twice on {ty}")]
    DuplicateField { ty: TypeKey, field: String },

    #[error("field {field} of {ty} has unsupported type {kind}")]
    UnsupportedFieldType {
        ty: TypeKey,
        field: String,
        kind: DeclaredKind,
    },

    #[error("field {field} of {ty} is declared {declared} but its accessor takes {accessor}")]
    KindMismatch {
        ty: TypeKey,
        field: String,
        declared: DeclaredKind,
        accessor: ValueKind,
    },

    #[error("getter on {0} has no field to attach to")]
    DanglingGetter(TypeKey),
}

/// Failure to turn text into a scalar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScalarParseError {
    #[error("invalid integer: {0}")]
    InvalidInt(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    InvalidFloat(#[from] ParseFloatError),

    #[error("number too large to fit in {0}")]
    FloatOverflow(ValueKind),
}

/// Errors returned by instantiation, population and inspection.
#[derive(Debug, Error)]
pub enum ConstructError {
    #[error("no constructor has been declared for {0}")]
    NoConstructorsDeclared(TypeKey),

    #[error("{ty} has no constructor taking {arity} arguments")]
    NoMatchingConstructor { ty: TypeKey, arity: usize },

    #[error("type {0} is not registered")]
    UnregisteredType(TypeKey),

    #[error("cyclic constructor dependency: {}", format_path(.path))]
    CyclicDependency { path: Vec<TypeKey> },

    #[error("argument {index} of {ty} constructor is not a {expected}")]
    ArgumentMismatch {
        ty: TypeKey,
        index: usize,
        expected: &'static str,
    },

    #[error("constructed value is not a {0}")]
    InstanceTypeMismatch(TypeKey),

    #[error("cannot parse {raw:?} for field {field} of {ty}: {cause}")]
    ParseError {
        ty: TypeKey,
        field: String,
        raw: String,
        #[source]
        cause: ScalarParseError,
    },

    #[error("property {key} is not supported by {ty}")]
    UnknownField { ty: TypeKey, key: String },

    #[error("field {field} of {ty} rejected the value handed to it")]
    FieldTypeMismatch { ty: TypeKey, field: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_path(path: &[TypeKey]) -> String {
    path.iter()
        .map(TypeKey::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Left;
    struct Right;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = ConstructError::CyclicDependency {
            path: vec![TypeKey::of::<Left>(), TypeKey::of::<Right>(), TypeKey::of::<Left>()],
        };
        assert_eq!(
            err.to_string(),
            "cyclic constructor dependency: Left -> Right -> Left"
        );
    }

    #[test]
    fn test_parse_error_names_field_and_text() {
        let cause = "x1".parse::<i32>().map_err(ScalarParseError::from).unwrap_err();
        let err = ConstructError::ParseError {
            ty: TypeKey::of::<Left>(),
            field: "PORT".into(),
            raw: "x1".into(),
            cause,
        };
        let msg = err.to_string();
        assert!(msg.contains("PORT"));
        assert!(msg.contains("\"x1\""));
        assert!(msg.contains("Left"));
    }
}
