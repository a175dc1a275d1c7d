// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parsed field values.

use crate::descriptor::ValueKind;
use std::fmt;

/// A value destined for (or read from) a registered field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I32(i32),
    I16(i16),
    I64(i64),
    F64(f64),
    F32(f32),
    String(String),
    Array(ArrayValue),
}

impl Value {
    /// Scalar kind (element kind for arrays).
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::I32(_) => ValueKind::I32,
            Self::I16(_) => ValueKind::I16,
            Self::I64(_) => ValueKind::I64,
            Self::F64(_) => ValueKind::F64,
            Self::F32(_) => ValueKind::F32,
            Self::String(_) => ValueKind::String,
            Self::Array(arr) => arr.kind(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i16.
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Self::I16(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as array.
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Array(arr) => write!(f, "{}", arr),
        }
    }
}

/// Fixed-length array of one scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    I32(Box<[i32]>),
    I16(Box<[i16]>),
    I64(Box<[i64]>),
    F64(Box<[f64]>),
    F32(Box<[f32]>),
    String(Box<[String]>),
}

macro_rules! collect_scalars {
    ($values:expr, $variant:ident) => {
        $values
            .into_iter()
            .map(|v| match v {
                Value::$variant(x) => Some(x),
                _ => None,
            })
            .collect::<Option<Box<[_]>>>()
            .map(ArrayValue::$variant)
    };
}

impl ArrayValue {
    /// Gather scalars of `kind` into an array, in order.
    ///
    /// Returns `None` if any element is not a `kind` scalar.
    pub fn from_scalars(kind: ValueKind, values: Vec<Value>) -> Option<Self> {
        match kind {
            ValueKind::I32 => collect_scalars!(values, I32),
            ValueKind::I16 => collect_scalars!(values, I16),
            ValueKind::I64 => collect_scalars!(values, I64),
            ValueKind::F64 => collect_scalars!(values, F64),
            ValueKind::F32 => collect_scalars!(values, F32),
            ValueKind::String => collect_scalars!(values, String),
        }
    }

    /// Element kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::I32(_) => ValueKind::I32,
            Self::I16(_) => ValueKind::I16,
            Self::I64(_) => ValueKind::I64,
            Self::F64(_) => ValueKind::F64,
            Self::F32(_) => ValueKind::F32,
            Self::String(_) => ValueKind::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::I32(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` as a scalar value.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::I32(v) => v.get(index).copied().map(Value::I32),
            Self::I16(v) => v.get(index).copied().map(Value::I16),
            Self::I64(v) => v.get(index).copied().map(Value::I64),
            Self::F64(v) => v.get(index).copied().map(Value::F64),
            Self::F32(v) => v.get(index).copied().map(Value::F32),
            Self::String(v) => v.get(index).cloned().map(Value::String),
        }
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.len() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(elem) = self.get(i) {
                write!(f, "{}", elem)?;
            }
        }
        f.write_str("]")
    }
}
