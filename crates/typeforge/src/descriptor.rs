// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime construction.

use crate::value::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A constructed object, owned by whoever requested it.
pub type Instance = Box<dyn Any>;

pub(crate) type InvokeFn = Box<dyn Fn(Args) -> Result<Instance, ArgumentError> + Send + Sync>;
pub(crate) type SetFn =
    Box<dyn Fn(&mut dyn Any, Value) -> Result<(), ValueMismatch> + Send + Sync>;
pub(crate) type GetFn = Box<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Setter or getter was handed a target or value of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValueMismatch;

/// Identity of a constructable type.
///
/// Equality and hashing use the [`TypeId`] only; the name is for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the Rust type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name(std::any::type_name::<T>()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

/// Scalar kinds the config parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    I32,
    I16,
    I64,
    F64,
    F32,
    String,
}

impl ValueKind {
    /// Every kind, in parser table order.
    pub const ALL: [ValueKind; 6] = [
        Self::I32,
        Self::I16,
        Self::I64,
        Self::F64,
        Self::F32,
        Self::String,
    ];

    /// Position in [`ValueKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::I32 => 0,
            Self::I16 => 1,
            Self::I64 => 2,
            Self::F64 => 3,
            Self::F32 => 4,
            Self::String => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::I32 => "int32",
            Self::I16 => "int16",
            Self::I64 => "int64",
            Self::F64 => "float64",
            Self::F32 => "float32",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind a field is declared with at registration.
///
/// Wider than [`ValueKind`]; declaring a field with a kind that has no
/// parser is rejected when the type is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl DeclaredKind {
    /// Parseable kind, if any.
    pub fn value_kind(self) -> Option<ValueKind> {
        match self {
            Self::I16 => Some(ValueKind::I16),
            Self::I32 => Some(ValueKind::I32),
            Self::I64 => Some(ValueKind::I64),
            Self::F32 => Some(ValueKind::F32),
            Self::F64 => Some(ValueKind::F64),
            Self::String => Some(ValueKind::String),
            Self::Bool | Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::I8 | Self::Char => {
                None
            }
        }
    }
}

impl fmt::Display for DeclaredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Char => "char",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// A constructor argument could not be taken as the expected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    /// Zero-based argument position.
    pub index: usize,
    /// Name of the type the constructor asked for.
    pub expected: &'static str,
}

/// Ordered, already-constructed constructor arguments.
pub struct Args {
    values: std::vec::IntoIter<Instance>,
    index: usize,
}

impl Args {
    pub(crate) fn new(values: Vec<Instance>) -> Self {
        Self {
            values: values.into_iter(),
            index: 0,
        }
    }

    /// Number of arguments not yet taken.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Take the next argument as `A`.
    pub fn take<A: Any>(&mut self) -> Result<A, ArgumentError> {
        let index = self.index;
        self.index += 1;
        let mismatch = ArgumentError {
            index,
            expected: TypeKey::of::<A>().name(),
        };
        let value = self.values.next().ok_or_else(|| mismatch.clone())?;
        value.downcast::<A>().map(|boxed| *boxed).map_err(|_| mismatch)
    }
}

/// One declared constructor: parameter types plus how to call it.
pub struct ConstructorDescriptor {
    params: Vec<TypeKey>,
    invoke: InvokeFn,
}

impl ConstructorDescriptor {
    pub(crate) fn new(params: Vec<TypeKey>, invoke: InvokeFn) -> Self {
        Self { params, invoke }
    }

    /// Parameter types in declaration order.
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Call the constructor with one value per parameter, in order.
    pub fn invoke(&self, args: Vec<Instance>) -> Result<Instance, ArgumentError> {
        (self.invoke)(Args::new(args))
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

/// Named, settable field of a type.
pub struct FieldDescriptor {
    name: String,
    kind: ValueKind,
    is_array: bool,
    setter: SetFn,
    getter: Option<GetFn>,
}

impl FieldDescriptor {
    pub(crate) fn new(name: String, kind: ValueKind, is_array: bool, setter: SetFn) -> Self {
        Self {
            name,
            kind,
            is_array,
            setter,
            getter: None,
        }
    }

    pub(crate) fn set_getter(&mut self, getter: GetFn) {
        self.getter = Some(getter);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scalar kind (element kind for arrays).
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Whether the field can be read back for inspection.
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub(crate) fn set(&self, target: &mut dyn Any, value: Value) -> Result<(), ValueMismatch> {
        (self.setter)(target, value)
    }

    pub(crate) fn get(&self, target: &dyn Any) -> Option<Option<Value>> {
        self.getter.as_ref().map(|get| get(target))
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_array", &self.is_array)
            .finish_non_exhaustive()
    }
}

/// Registered metadata for one constructable type.
#[derive(Debug)]
pub struct TypeDescriptor {
    key: TypeKey,
    constructors: Vec<ConstructorDescriptor>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub(crate) fn new(
        key: TypeKey,
        constructors: Vec<ConstructorDescriptor>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            key,
            constructors,
            fields,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Constructors in declaration order.
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} has {} declared constructors",
            self.key,
            self.constructors.len()
        )?;
        for ctor in &self.constructors {
            writeln!(f, "  {}", ctor)?;
        }
        writeln!(f, "{} has {} fields", self.key, self.fields.len())?;
        for field in &self.fields {
            let suffix = if field.is_array { "[]" } else { "" };
            writeln!(f, "  {}: {}{}", field.name, field.kind, suffix)?;
        }
        Ok(())
    }
}
