// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Config population from line-oriented `key=value` text.
//!
//! A line is a data line iff it splits on `=` into exactly two non-empty
//! parts; anything else is skipped without a diagnostic. Keys naming no
//! field are handled per [`UnknownFieldPolicy`]. A value that does not parse
//! aborts the whole load.

use crate::descriptor::{FieldDescriptor, Instance, TypeKey};
use crate::error::ConstructError;
use crate::instantiate::{downcast, invoke};
use crate::parse::{parse_scalar, split_array};
use crate::registry::TypeRegistry;
use crate::resolver::resolve_by_arity;
use crate::value::{ArrayValue, Value};
use std::any::Any;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// What to do with a key that names no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Log a warning and continue.
    #[default]
    Warn,
    /// Skip silently.
    Ignore,
    /// Abort with [`ConstructError::UnknownField`].
    Reject,
}

/// Population options.
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

/// One `key=value` pair taken from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> ConfigEntry<'a> {
    /// Parse a data line; `None` for anything that is not one.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut parts = line.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
                Some(Self { key, value })
            }
            _ => None,
        }
    }
}

/// Builds default instances and fills their fields from config text.
pub struct ConfigPopulator<'r, R: ?Sized> {
    registry: &'r R,
    options: PopulateOptions,
}

impl<'r, R> ConfigPopulator<'r, R>
where
    R: TypeRegistry + ?Sized,
{
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            options: PopulateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PopulateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PopulateOptions {
        &self.options
    }

    /// Build a `ty` through its zero-argument constructor and populate it
    /// from `reader`.
    pub fn load<B: BufRead>(&self, ty: TypeKey, reader: B) -> Result<Instance, ConstructError> {
        let desc = self
            .registry
            .lookup(ty)
            .ok_or(ConstructError::UnregisteredType(ty))?;
        let ctor = resolve_by_arity(desc, 0)?;
        let mut instance = invoke(ty, ctor, Vec::new())?;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let entry = match ConfigEntry::parse(&line) {
                Some(entry) => entry,
                None => continue,
            };

            let field = match desc.field(entry.key) {
                Some(field) => field,
                None => {
                    self.unknown_field(ty, entry.key, index + 1)?;
                    continue;
                }
            };

            let value = parse_field(ty, field, entry.value)?;
            field
                .set(&mut *instance, value)
                .map_err(|_| ConstructError::FieldTypeMismatch {
                    ty,
                    field: field.name().to_string(),
                })?;
        }

        Ok(instance)
    }

    /// Typed form of [`load`](Self::load).
    pub fn load_as<T: Any, B: BufRead>(&self, reader: B) -> Result<T, ConstructError> {
        let instance = self.load(TypeKey::of::<T>(), reader)?;
        downcast(instance)
    }

    /// Load `ty` from the file at `path`.
    ///
    /// The file is closed before this returns, on success or failure.
    pub fn load_path(
        &self,
        ty: TypeKey,
        path: impl AsRef<Path>,
    ) -> Result<Instance, ConstructError> {
        let path = path.as_ref();
        log::debug!("loading {} from {}", ty, path.display());
        let file = File::open(path)?;
        self.load(ty, BufReader::new(file))
    }

    /// Typed form of [`load_path`](Self::load_path).
    pub fn load_path_as<T: Any>(&self, path: impl AsRef<Path>) -> Result<T, ConstructError> {
        let instance = self.load_path(TypeKey::of::<T>(), path)?;
        downcast(instance)
    }

    fn unknown_field(&self, ty: TypeKey, key: &str, line: usize) -> Result<(), ConstructError> {
        match self.options.unknown_fields {
            UnknownFieldPolicy::Warn => {
                log::warn!("line {}: property {} is not supported by {}", line, key, ty);
                Ok(())
            }
            UnknownFieldPolicy::Ignore => Ok(()),
            UnknownFieldPolicy::Reject => Err(ConstructError::UnknownField {
                ty,
                key: key.to_string(),
            }),
        }
    }
}

fn parse_field(ty: TypeKey, field: &FieldDescriptor, raw: &str) -> Result<Value, ConstructError> {
    let fail = |text: &str, cause| ConstructError::ParseError {
        ty,
        field: field.name().to_string(),
        raw: text.to_string(),
        cause,
    };

    if !field.is_array() {
        return parse_scalar(field.kind(), raw).map_err(|e| fail(raw, e));
    }

    let items = split_array(raw)
        .into_iter()
        .map(|token| parse_scalar(field.kind(), token).map_err(|e| fail(token, e)))
        .collect::<Result<Vec<_>, _>>()?;
    ArrayValue::from_scalars(field.kind(), items)
        .map(Value::Array)
        .ok_or_else(|| ConstructError::FieldTypeMismatch {
            ty,
            field: field.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclaredKind, HashMapTypeRegistry, ScalarParseError, TypeDescriptorBuilder};
    use std::io::Cursor;

    #[derive(Debug, PartialEq)]
    struct ServerConfig {
        port: i32,
        greeting: String,
        levels: Vec<i32>,
        ratio: f32,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                port: 80,
                greeting: "hello".into(),
                levels: Vec::new(),
                ratio: 1.0,
            }
        }
    }

    struct NoDefault {
        _port: i32,
    }

    fn registry() -> HashMapTypeRegistry {
        let mut registry = HashMapTypeRegistry::new();
        registry
            .register(
                TypeDescriptorBuilder::<ServerConfig>::new()
                    .constructor(ServerConfig::default)
                    .field("PORT", DeclaredKind::I32, |c: &mut ServerConfig, v: i32| {
                        c.port = v
                    })
                    .field(
                        "NAME",
                        DeclaredKind::String,
                        |c: &mut ServerConfig, v: String| c.greeting = v,
                    )
                    .array_field(
                        "LEVELS",
                        DeclaredKind::I32,
                        |c: &mut ServerConfig, v: Vec<i32>| c.levels = v,
                    )
                    .field("RATIO", DeclaredKind::F32, |c: &mut ServerConfig, v: f32| {
                        c.ratio = v
                    })
                    .build()
                    .expect("server config"),
            )
            .expect("register");
        registry
            .register(
                TypeDescriptorBuilder::<NoDefault>::new()
                    .constructor1(|port: i32| NoDefault { _port: port })
                    .build()
                    .expect("no default"),
            )
            .expect("register");
        registry
    }

    fn load(text: &str) -> Result<ServerConfig, ConstructError> {
        let registry = registry();
        ConfigPopulator::new(&registry).load_as(Cursor::new(text))
    }

    #[test]
    fn test_entry_parse() {
        assert_eq!(
            ConfigEntry::parse("PORT=8080"),
            Some(ConfigEntry {
                key: "PORT",
                value: "8080"
            })
        );
        assert_eq!(ConfigEntry::parse("not_a_pair"), None);
        assert_eq!(ConfigEntry::parse("a=b=c"), None);
        assert_eq!(ConfigEntry::parse("a="), None);
        assert_eq!(ConfigEntry::parse("=b"), None);
        assert_eq!(ConfigEntry::parse(""), None);
    }

    #[test]
    fn test_scalar_field() {
        let config = load("PORT=8080\n").expect("load");
        assert_eq!(config.port, 8080);
        assert_eq!(config.greeting, "hello");
    }

    #[test]
    fn test_string_field_untrimmed() {
        let config = load("NAME=Good Day!\n").expect("load");
        assert_eq!(config.greeting, "Good Day!");

        let config = load("NAME= padded \n").expect("load");
        assert_eq!(config.greeting, " padded ");
    }

    #[test]
    fn test_array_field() {
        let config = load("LEVELS=1,2,3\n").expect("load");
        assert_eq!(config.levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_field_leaves_defaults() {
        let config = load("UNKNOWN=5\n").expect("load");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let config = load("not_a_pair\na=b=c\nPORT=\n\nPORT=81\n").expect("load");
        assert_eq!(config.port, 81);
    }

    #[test]
    fn test_crlf_lines() {
        let config = load("PORT=8080\r\nNAME=x\r\n").expect("load");
        assert_eq!(config.port, 8080);
        assert_eq!(config.greeting, "x");
    }

    #[test]
    fn test_later_lines_override() {
        let config = load("PORT=1\nPORT=2").expect("load");
        assert_eq!(config.port, 2);
    }

    #[test]
    fn test_parse_failure_is_fatal() {
        let err = load("PORT=80\nRATIO=fast\nNAME=late\n").unwrap_err();
        match err {
            ConstructError::ParseError {
                field, raw, cause, ..
            } => {
                assert_eq!(field, "RATIO");
                assert_eq!(raw, "fast");
                assert!(matches!(cause, ScalarParseError::InvalidFloat(_)));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let registry = registry();
        let bytes: &[u8] = b"PORT=1\n\xff\xfe=2\nPORT=3\n";
        let result = ConfigPopulator::new(&registry)
            .load(TypeKey::of::<ServerConfig>(), BufReader::new(bytes));
        match result {
            Err(ConstructError::Io(err)) => {
                assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("load returned an instance after a read failure"),
        }
    }

    #[test]
    fn test_array_parse_failure_names_token() {
        let err = load("LEVELS=1,x,3\n").unwrap_err();
        assert!(matches!(
            err,
            ConstructError::ParseError { ref raw, .. } if raw == "x"
        ));
    }

    #[test]
    fn test_requires_zero_arg_constructor() {
        let registry = registry();
        let err = ConfigPopulator::new(&registry)
            .load(TypeKey::of::<NoDefault>(), Cursor::new("PORT=1\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructError::NoMatchingConstructor { arity: 0, .. }
        ));
    }

    #[test]
    fn test_reject_policy() {
        let registry = registry();
        let populator = ConfigPopulator::new(&registry).with_options(PopulateOptions {
            unknown_fields: UnknownFieldPolicy::Reject,
        });
        let err = populator
            .load_as::<ServerConfig, _>(Cursor::new("PORT=1\nUNKNOWN=5\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructError::UnknownField { ref key, .. } if key == "UNKNOWN"
        ));
    }

    #[test]
    fn test_ignore_policy() {
        let registry = registry();
        let populator = ConfigPopulator::new(&registry).with_options(PopulateOptions {
            unknown_fields: UnknownFieldPolicy::Ignore,
        });
        assert_eq!(populator.options().unknown_fields, UnknownFieldPolicy::Ignore);
        let config: ServerConfig = populator
            .load_as(Cursor::new("UNKNOWN=5\nPORT=9\n"))
            .expect("load");
        assert_eq!(config.port, 9);
    }
}
