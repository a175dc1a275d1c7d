// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.
//!
//! The builder is where a type grants the engine access to its
//! constructors and fields: everything registered here can be invoked
//! regardless of the type's own visibility rules.

use crate::convert::{IntoValue, Scalar};
use crate::descriptor::{
    ArgumentError, Args, ConstructorDescriptor, DeclaredKind, FieldDescriptor, GetFn, Instance,
    SetFn, TypeDescriptor, TypeKey, ValueKind, ValueMismatch,
};
use crate::error::RegistryError;
use crate::value::Value;
use std::any::Any;
use std::marker::PhantomData;

/// Builder for creating TypeDescriptor instances for `T`.
///
/// Registration errors are deferred: the first one is reported by
/// [`build`](Self::build).
pub struct TypeDescriptorBuilder<T> {
    key: TypeKey,
    constructors: Vec<ConstructorDescriptor>,
    fields: Vec<FieldDescriptor>,
    error: Option<RegistryError>,
    _marker: PhantomData<fn() -> T>,
}

macro_rules! typed_constructor {
    ($(#[$doc:meta])* $method:ident => $($arg:ident $var:ident),+) => {
        $(#[$doc])*
        pub fn $method<$($arg: Any,)+ F>(self, f: F) -> Self
        where
            F: Fn($($arg),+) -> T + Send + Sync + 'static,
        {
            let params = vec![$(TypeKey::of::<$arg>()),+];
            self.raw_constructor(params, move |mut args: Args| {
                $(let $var = args.take::<$arg>()?;)+
                Ok(f($($var),+))
            })
        }
    };
}

impl<T: Any> TypeDescriptorBuilder<T> {
    /// Create a new builder for `T`.
    pub fn new() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructors: Vec::new(),
            fields: Vec::new(),
            error: None,
            _marker: PhantomData,
        }
    }

    /// Add a zero-argument constructor.
    pub fn constructor<F>(self, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.raw_constructor(Vec::new(), move |_args: Args| Ok(f()))
    }

    typed_constructor!(
        /// Add a one-argument constructor.
        constructor1 => A a
    );
    typed_constructor!(
        /// Add a two-argument constructor.
        constructor2 => A a, B b
    );
    typed_constructor!(
        /// Add a three-argument constructor.
        constructor3 => A a, B b, C c
    );
    typed_constructor!(
        /// Add a four-argument constructor.
        constructor4 => A a, B b, C c, D d
    );

    /// Add a constructor that takes its arguments from [`Args`] itself.
    ///
    /// `params` must list the type of each argument `f` takes, in order.
    pub fn raw_constructor<F>(mut self, params: Vec<TypeKey>, f: F) -> Self
    where
        F: Fn(Args) -> Result<T, ArgumentError> + Send + Sync + 'static,
    {
        let invoke = Box::new(move |args: Args| f(args).map(|v| Box::new(v) as Instance));
        self.constructors
            .push(ConstructorDescriptor::new(params, invoke));
        self
    }

    /// Add a scalar field assigned through `set`.
    pub fn field<V, F>(self, name: impl Into<String>, kind: DeclaredKind, set: F) -> Self
    where
        V: Scalar,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let setter: SetFn = Box::new(move |target: &mut dyn Any, value: Value| {
            let target = target.downcast_mut::<T>().ok_or(ValueMismatch)?;
            let value = V::from_value(value).ok_or(ValueMismatch)?;
            set(target, value);
            Ok(())
        });
        self.push_field(name.into(), kind, V::KIND, false, setter)
    }

    /// Add an array field whose elements are of `kind`.
    pub fn array_field<V, F>(self, name: impl Into<String>, kind: DeclaredKind, set: F) -> Self
    where
        V: Scalar,
        F: Fn(&mut T, Vec<V>) + Send + Sync + 'static,
    {
        let setter: SetFn = Box::new(move |target: &mut dyn Any, value: Value| {
            let target = target.downcast_mut::<T>().ok_or(ValueMismatch)?;
            let items = match value {
                Value::Array(array) => V::from_array(array).ok_or(ValueMismatch)?,
                _ => return Err(ValueMismatch),
            };
            set(target, items);
            Ok(())
        });
        self.push_field(name.into(), kind, V::KIND, true, setter)
    }

    /// Make the most recently added field readable for inspection.
    pub fn getter<V, F>(mut self, get: F) -> Self
    where
        V: IntoValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let getter: GetFn = Box::new(move |target: &dyn Any| {
            target.downcast_ref::<T>().map(|t| get(t).into_value())
        });
        if let Some(field) = self.fields.last_mut() {
            field.set_getter(getter);
            return self;
        }
        let key = self.key;
        self.fail(RegistryError::DanglingGetter(key));
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> Result<TypeDescriptor, RegistryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(TypeDescriptor::new(
                self.key,
                self.constructors,
                self.fields,
            )),
        }
    }

    fn push_field(
        mut self,
        name: String,
        declared: DeclaredKind,
        accessor: ValueKind,
        is_array: bool,
        setter: SetFn,
    ) -> Self {
        if self.fields.iter().any(|f| f.name() == name) {
            let err = RegistryError::DuplicateField {
                ty: self.key,
                field: name,
            };
            self.fail(err);
            return self;
        }
        let kind = match declared.value_kind() {
            Some(kind) => kind,
            None => {
                let err = RegistryError::UnsupportedFieldType {
                    ty: self.key,
                    field: name,
                    kind: declared,
                };
                self.fail(err);
                return self;
            }
        };
        if kind != accessor {
            let err = RegistryError::KindMismatch {
                ty: self.key,
                field: name,
                declared,
                accessor,
            };
            self.fail(err);
            return self;
        }
        self.fields
            .push(FieldDescriptor::new(name, kind, is_array, setter));
        self
    }

    fn fail(&mut self, err: RegistryError) {
        self.error.get_or_insert(err);
    }
}

impl<T: Any> Default for TypeDescriptorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
