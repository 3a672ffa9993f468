//! The two collaborators the binder reads from.
//!
//! Neither trait resolves anything on the binder's behalf beyond what its
//! methods state: precedence between a linked flag and stored values is owned
//! entirely by the [`ConfigSource`] implementation.

use crate::types::Flag;

/// A typed key-value configuration accessor.
///
/// Getters never fail. A key that is missing, or whose value cannot be
/// converted to the requested type, yields the type's zero value.
pub trait ConfigSource {
    fn get_string(&self, key: &str) -> String;

    fn get_bool(&self, key: &str) -> bool;

    fn get_i64(&self, key: &str) -> i64;

    fn get_u64(&self, key: &str) -> u64;

    fn get_string_list(&self, key: &str) -> Vec<String>;

    fn get_int_list(&self, key: &str) -> Vec<i64>;

    /// Link `flag` to `key`. Later reads of `key` prefer the flag's value when
    /// the flag was explicitly set.
    fn link_flag(&mut self, key: &str, flag: Flag);
}

/// Two-tier lookup of command-line flags by name.
pub trait FlagRegistry {
    /// Look up a flag in the primary tier (flags inherited by subcommands).
    fn lookup_primary(&self, name: &str) -> Option<Flag>;

    /// Look up a flag in the fallback tier (flags local to one command).
    fn lookup_fallback(&self, name: &str) -> Option<Flag>;
}
