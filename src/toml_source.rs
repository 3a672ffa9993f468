//! A [`ConfigSource`] over `toml` values.
//!
//! `TomlSource` adapts configuration that has already been resolved
//! elsewhere (a confique-loaded struct, any `Serialize` value, a parsed
//! table) and adds the flag linking the binder needs. Lookups consult, from
//! highest to lowest priority:
//!
//! ```text
//! Overrides          .set()
//! Linked flag        only when the flag was explicitly set
//! Environment        .bind_env()
//! Configuration      from_table() / from_serialize() / load()
//! Defaults           .set_default()
//! Linked flag        its default value
//! ```
//!
//! Keys are dotted paths (`database.url`) and case-insensitive.

use std::collections::HashMap;

use confique::Config;
use serde::Serialize;
use toml::{Table, Value};
use tracing::{debug, trace, warn};

use crate::cast;
use crate::env;
use crate::error::BindError;
use crate::path;
use crate::source::ConfigSource;
use crate::types::Flag;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Override,
    Flag,
    Env,
    Config,
    Default,
    /// An unchanged linked flag, whose value is only its declared default.
    FlagDefault,
}

#[derive(Debug, Clone, Default)]
pub struct TomlSource {
    overrides: Table,
    env: Table,
    config: Table,
    defaults: Table,
    flags: HashMap<String, Flag>,
    env_prefix: Option<String>,
}

impl TomlSource {
    /// An empty source. Every getter returns its zero value until something is
    /// set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `table` as the configuration layer.
    pub fn from_table(table: Table) -> Self {
        Self {
            config: path::lowercase_keys(table),
            ..Self::default()
        }
    }

    /// Serialize `config` and use the result as the configuration layer.
    ///
    /// `None` fields are left out, so they read as unset.
    pub fn from_serialize<S: Serialize + ?Sized>(config: &S) -> Result<Self, BindError> {
        let value = Value::try_from(config).map_err(|e| BindError::InvalidValue {
            key: "<config>".into(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Table(table) => Ok(Self::from_table(table)),
            other => Err(BindError::InvalidValue {
                key: "<config>".into(),
                reason: format!("expected a table, got {}", other.type_str()),
            }),
        }
    }

    /// Run a confique builder (defaults, files, env, preloaded layers) and use
    /// the loaded config as the configuration layer.
    pub fn load<C: Config + Serialize>(builder: confique::Builder<C>) -> Result<Self, BindError> {
        let config = builder.load()?;
        Self::from_serialize(&config)
    }

    /// Set the prefix used by [`bind_env`](Self::bind_env).
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override `key` above every other layer.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), BindError> {
        path::insert(&mut self.overrides, key, value.into())
    }

    /// Give `key` a value used when no other layer has one.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> Result<(), BindError> {
        path::insert(&mut self.defaults, key, value.into())
    }

    /// Read the environment variable for `key` (see [`bind_env_from`](Self::bind_env_from))
    /// from the process environment.
    pub fn bind_env(&mut self, key: &str) -> Result<bool, BindError> {
        let name = env::var_name(self.env_prefix.as_deref(), key);
        let found = std::env::var(&name).ok().map(|value| (name, value));
        self.bind_env_from(key, found)
    }

    /// Snapshot the environment variable for `key` into the env layer.
    ///
    /// The variable name is `{PREFIX}_{KEY}`, uppercased, with `.` and `-`
    /// replaced by `_`. Returns whether a non-empty value was found.
    pub fn bind_env_from(
        &mut self,
        key: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<bool, BindError> {
        let name = env::var_name(self.env_prefix.as_deref(), key);
        match env::lookup(&name, vars) {
            Some(value) => {
                debug!(key, var = %name, "bound env var");
                path::insert(&mut self.env, key, Value::String(value))?;
                Ok(true)
            }
            None => {
                trace!(key, var = %name, "env var not set");
                Ok(false)
            }
        }
    }

    /// The resolved value for `key`, if any layer has one.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.resolve(key).map(|(value, _)| value)
    }

    fn resolve(&self, key: &str) -> Option<(&Value, Layer)> {
        let key = key.to_lowercase();
        let flag = self.flags.get(&key);
        if let Some(value) = path::get(&self.overrides, &key) {
            return Some((value, Layer::Override));
        }
        if let Some(flag) = flag.filter(|f| f.is_changed()) {
            return Some((flag.value(), Layer::Flag));
        }
        [
            (&self.env, Layer::Env),
            (&self.config, Layer::Config),
            (&self.defaults, Layer::Default),
        ]
        .into_iter()
        .find_map(|(table, layer)| path::get(table, &key).map(|value| (value, layer)))
        .or_else(|| flag.map(|f| (f.value(), Layer::FlagDefault)))
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn typed<T: Default>(
        &self,
        key: &str,
        expected: &'static str,
        convert: fn(&Value) -> Option<T>,
    ) -> T {
        let Some((value, layer)) = self.resolve(key) else {
            return T::default();
        };
        convert(value).unwrap_or_else(|| {
            // Flags without a declared default report an empty string.
            if layer == Layer::FlagDefault {
                trace!(key, expected, "flag default does not convert, using zero value");
                return T::default();
            }
            warn!(
                key,
                expected,
                found = value.type_str(),
                "config value does not convert, using zero value"
            );
            T::default()
        })
    }
}

impl ConfigSource for TomlSource {
    fn get_string(&self, key: &str) -> String {
        self.typed(key, "string", cast::to_string)
    }

    fn get_bool(&self, key: &str) -> bool {
        self.typed(key, "bool", cast::to_bool)
    }

    fn get_i64(&self, key: &str) -> i64 {
        self.typed(key, "i64", cast::to_i64)
    }

    fn get_u64(&self, key: &str) -> u64 {
        self.typed(key, "u64", cast::to_u64)
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        self.typed(key, "string list", cast::to_string_list)
    }

    fn get_int_list(&self, key: &str) -> Vec<i64> {
        self.typed(key, "integer list", cast::to_int_list)
    }

    fn link_flag(&mut self, key: &str, flag: Flag) {
        trace!(key, flag = flag.name(), "linking flag");
        self.flags.insert(key.to_lowercase(), flag);
    }
}
