// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversions between [`Value`] and plain Rust field types.

use crate::descriptor::ValueKind;
use crate::value::{ArrayValue, Value};

/// Trait for converting from Value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

/// Trait for converting to Value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// A Rust type backing one parseable scalar kind.
pub trait Scalar: FromValue + IntoValue + 'static {
    const KIND: ValueKind;

    /// Unwrap an array of this kind.
    fn from_array(array: ArrayValue) -> Option<Vec<Self>>;

    /// Wrap items as an array of this kind.
    fn into_array(items: Vec<Self>) -> ArrayValue;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl Scalar for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_array(array: ArrayValue) -> Option<Vec<Self>> {
                match array {
                    ArrayValue::$variant(items) => Some(items.into_vec()),
                    _ => None,
                }
            }

            fn into_array(items: Vec<Self>) -> ArrayValue {
                ArrayValue::$variant(items.into_boxed_slice())
            }
        }
    };
}

impl_scalar!(i32, I32);
impl_scalar!(i16, I16);
impl_scalar!(i64, I64);
impl_scalar!(f64, F64);
impl_scalar!(f32, F32);
impl_scalar!(String, String);

impl<T: Scalar> FromValue for Vec<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(array) => T::from_array(array),
            _ => None,
        }
    }
}

impl<T: Scalar> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(T::into_array(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(i32::from_value(Value::I32(5)), Some(5));
        assert_eq!(i32::from_value(Value::I64(5)), None);
        assert_eq!(2.5f32.into_value(), Value::F32(2.5));
        assert_eq!("abc".into_value(), Value::String("abc".into()));
        assert_eq!(<String as Scalar>::KIND, ValueKind::String);
    }

    #[test]
    fn test_vec_conversions() {
        let value = vec![1i64, 2, 3].into_value();
        assert_eq!(value.kind(), ValueKind::I64);
        assert_eq!(Vec::<i64>::from_value(value), Some(vec![1, 2, 3]));

        let wrong = vec![1i32].into_value();
        assert_eq!(Vec::<i64>::from_value(wrong), None);
        assert_eq!(Vec::<i32>::from_value(Value::I32(1)), None);
    }
}
