// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive instantiation of object graphs.
//!
//! Each type is built through its first declared constructor. Parameters are
//! built depth-first, in declaration order, before the parent constructor
//! runs. Any failure drops whatever was already built and is returned as is.

use crate::descriptor::{ArgumentError, ConstructorDescriptor, Instance, TypeKey};
use crate::error::ConstructError;
use crate::registry::TypeRegistry;
use crate::resolver::{resolve_by_arity, resolve_first};
use std::any::Any;

/// Build a full object graph rooted at `root`.
pub fn instantiate<R>(registry: &R, root: TypeKey) -> Result<Instance, ConstructError>
where
    R: TypeRegistry + ?Sized,
{
    let mut path = Vec::new();
    instantiate_on_path(registry, root, &mut path)
}

/// Typed form of [`instantiate`].
pub fn instantiate_as<T, R>(registry: &R) -> Result<T, ConstructError>
where
    T: Any,
    R: TypeRegistry + ?Sized,
{
    let instance = instantiate(registry, TypeKey::of::<T>())?;
    downcast(instance)
}

/// Build `ty` with caller-supplied arguments.
///
/// The constructor is the first one declared with `args.len()` parameters.
pub fn construct_with<R>(
    registry: &R,
    ty: TypeKey,
    args: Vec<Instance>,
) -> Result<Instance, ConstructError>
where
    R: TypeRegistry + ?Sized,
{
    let desc = registry
        .lookup(ty)
        .ok_or(ConstructError::UnregisteredType(ty))?;
    let ctor = resolve_by_arity(desc, args.len())?;
    invoke(ty, ctor, args)
}

/// Typed form of [`construct_with`].
pub fn construct_with_as<T, R>(registry: &R, args: Vec<Instance>) -> Result<T, ConstructError>
where
    T: Any,
    R: TypeRegistry + ?Sized,
{
    let instance = construct_with(registry, TypeKey::of::<T>(), args)?;
    downcast(instance)
}

fn instantiate_on_path<R>(
    registry: &R,
    ty: TypeKey,
    path: &mut Vec<TypeKey>,
) -> Result<Instance, ConstructError>
where
    R: TypeRegistry + ?Sized,
{
    if path.contains(&ty) {
        let mut cycle = path.clone();
        cycle.push(ty);
        return Err(ConstructError::CyclicDependency { path: cycle });
    }

    log::debug!("creating object of type {}", ty);
    let desc = registry
        .lookup(ty)
        .ok_or(ConstructError::UnregisteredType(ty))?;
    let ctor = resolve_first(desc)?;

    path.push(ty);
    let mut args = Vec::with_capacity(ctor.arity());
    for param in ctor.params() {
        args.push(instantiate_on_path(registry, *param, path)?);
    }
    path.pop();

    log::debug!("invoking {}{}", ty, ctor);
    invoke(ty, ctor, args)
}

pub(crate) fn invoke(
    ty: TypeKey,
    ctor: &ConstructorDescriptor,
    args: Vec<Instance>,
) -> Result<Instance, ConstructError> {
    ctor.invoke(args)
        .map_err(|ArgumentError { index, expected }| ConstructError::ArgumentMismatch {
            ty,
            index,
            expected,
        })
}

pub(crate) fn downcast<T: Any>(instance: Instance) -> Result<T, ConstructError> {
    instance
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| ConstructError::InstanceTypeMismatch(TypeKey::of::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HashMapTypeRegistry, TypeDescriptorBuilder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Inner {
        serial: usize,
    }

    #[derive(Debug)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Pair {
        first: Inner,
        second: Outer,
    }

    struct Orphan;

    fn registry(counter: Arc<AtomicUsize>) -> HashMapTypeRegistry {
        let mut registry = HashMapTypeRegistry::new();
        let serials = counter;
        registry
            .register(
                TypeDescriptorBuilder::<Inner>::new()
                    .constructor(move || Inner {
                        serial: serials.fetch_add(1, Ordering::SeqCst),
                    })
                    .build()
                    .expect("inner"),
            )
            .expect("register inner");
        registry
            .register(
                TypeDescriptorBuilder::<Outer>::new()
                    .constructor1(|inner: Inner| Outer { inner })
                    .build()
                    .expect("outer"),
            )
            .expect("register outer");
        registry
            .register(
                TypeDescriptorBuilder::<Pair>::new()
                    .constructor2(|first: Inner, second: Outer| Pair { first, second })
                    .build()
                    .expect("pair"),
            )
            .expect("register pair");
        registry
    }

    #[test]
    fn test_leaf_is_constructed_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = registry(counter.clone());

        let inner: Inner = instantiate_as(&registry).expect("inner");
        assert_eq!(inner.serial, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_two_level_graph() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = registry(counter.clone());

        let outer: Outer = instantiate_as(&registry).expect("outer");
        assert_eq!(outer.inner, Inner { serial: 0 });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parameters_built_in_declared_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = registry(counter.clone());

        let pair: Pair = instantiate_as(&registry).expect("pair");
        assert_eq!(pair.first.serial, 0);
        assert_eq!(pair.second.inner.serial, 1);
    }

    #[test]
    fn test_missing_constructor_aborts_whole_graph() {
        struct Root;
        struct Hollow;

        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = registry(counter.clone());
        registry
            .register(TypeDescriptorBuilder::<Hollow>::new().build().expect("hollow"))
            .expect("register hollow");
        registry
            .register(
                TypeDescriptorBuilder::<Root>::new()
                    .constructor2(|_: Inner, _: Hollow| Root)
                    .build()
                    .expect("root"),
            )
            .expect("register root");

        let err = instantiate(&registry, TypeKey::of::<Root>()).unwrap_err();
        assert!(
            matches!(err, ConstructError::NoConstructorsDeclared(k) if k == TypeKey::of::<Hollow>())
        );
        // The Inner sibling was built and then dropped.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregistered_parameter() {
        struct Needy;

        let mut registry = HashMapTypeRegistry::new();
        registry
            .register(
                TypeDescriptorBuilder::<Needy>::new()
                    .constructor1(|_: Orphan| Needy)
                    .build()
                    .expect("needy"),
            )
            .expect("register");

        let err = instantiate(&registry, TypeKey::of::<Needy>()).unwrap_err();
        assert!(matches!(err, ConstructError::UnregisteredType(k) if k == TypeKey::of::<Orphan>()));
    }

    #[test]
    fn test_cycle_fails_fast() {
        struct Chicken;
        struct Egg;

        let mut registry = HashMapTypeRegistry::new();
        registry
            .register(
                TypeDescriptorBuilder::<Chicken>::new()
                    .constructor1(|_: Egg| Chicken)
                    .build()
                    .expect("chicken"),
            )
            .expect("register chicken");
        registry
            .register(
                TypeDescriptorBuilder::<Egg>::new()
                    .constructor1(|_: Chicken| Egg)
                    .build()
                    .expect("egg"),
            )
            .expect("register egg");

        match instantiate(&registry, TypeKey::of::<Chicken>()) {
            Err(ConstructError::CyclicDependency { path }) => {
                let names: Vec<_> = path.iter().map(|k| k.name()).collect();
                assert_eq!(names, vec!["Chicken", "Egg", "Chicken"]);
            }
            other => panic!("expected cycle, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_shared_dependency_is_not_a_cycle() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = registry(counter);
        // Inner appears twice in Pair's graph, on different paths.
        assert!(instantiate(&registry, TypeKey::of::<Pair>()).is_ok());
    }

    #[test]
    fn test_construct_with_matches_arity() {
        #[derive(Debug, PartialEq)]
        struct Server {
            port: i32,
            greeting: String,
        }

        let mut registry = HashMapTypeRegistry::new();
        registry
            .register(
                TypeDescriptorBuilder::<Server>::new()
                    .constructor(|| Server {
                        port: 0,
                        greeting: String::new(),
                    })
                    .constructor2(|port: i32, greeting: String| Server { port, greeting })
                    .build()
                    .expect("server"),
            )
            .expect("register");

        let server: Server = construct_with_as(
            &registry,
            vec![Box::new(8080i32), Box::new("Good Day!".to_string())],
        )
        .expect("construct");
        assert_eq!(
            server,
            Server {
                port: 8080,
                greeting: "Good Day!".into()
            }
        );

        let err = construct_with(&registry, TypeKey::of::<Server>(), vec![Box::new(1i32)])
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructError::NoMatchingConstructor { arity: 1, .. }
        ));

        let err = construct_with(
            &registry,
            TypeKey::of::<Server>(),
            vec![Box::new("8080".to_string()), Box::new("hi".to_string())],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConstructError::ArgumentMismatch {
                index: 0,
                expected: "i32",
                ..
            }
        ));
    }
}
