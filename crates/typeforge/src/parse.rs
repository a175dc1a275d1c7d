// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar parsing, dispatched through a per-kind table.

use crate::descriptor::ValueKind;
use crate::error::ScalarParseError;
use crate::value::Value;

type ParseFn = fn(&str) -> Result<Value, ScalarParseError>;

// Indexed by `ValueKind::index`.
static PARSERS: [ParseFn; ValueKind::ALL.len()] = [
    parse_i32, parse_i16, parse_i64, parse_f64, parse_f32, parse_string,
];

/// Parse `text` as a scalar of `kind`.
///
/// Strings are returned unchanged (no trimming).
pub fn parse_scalar(kind: ValueKind, text: &str) -> Result<Value, ScalarParseError> {
    PARSERS[kind.index()](text)
}

/// Split an array value on `,`, dropping trailing empty tokens.
pub fn split_array(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split(',').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

fn parse_i32(text: &str) -> Result<Value, ScalarParseError> {
    Ok(Value::I32(text.parse()?))
}

fn parse_i16(text: &str) -> Result<Value, ScalarParseError> {
    Ok(Value::I16(text.parse()?))
}

fn parse_i64(text: &str) -> Result<Value, ScalarParseError> {
    Ok(Value::I64(text.parse()?))
}

fn parse_f64(text: &str) -> Result<Value, ScalarParseError> {
    let v: f64 = text.parse()?;
    if v.is_infinite() && !is_infinity_literal(text) {
        return Err(ScalarParseError::FloatOverflow(ValueKind::F64));
    }
    Ok(Value::F64(v))
}

fn parse_f32(text: &str) -> Result<Value, ScalarParseError> {
    let v: f32 = text.parse()?;
    if v.is_infinite() && !is_infinity_literal(text) {
        return Err(ScalarParseError::FloatOverflow(ValueKind::F32));
    }
    Ok(Value::F32(v))
}

fn parse_string(text: &str) -> Result<Value, ScalarParseError> {
    Ok(Value::String(text.to_string()))
}

fn is_infinity_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}
