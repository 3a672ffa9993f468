//! Bind configuration and command-line flags onto a plain struct, field by
//! field, from a short declaration next to the struct.
//!
//! Charmer connects two things most CLI programs already have: a typed
//! key-value configuration accessor ([`ConfigSource`]) and a set of parsed
//! flags ([`FlagRegistry`]). Each field declares the config key it reads and,
//! optionally, the flag that may override it:
//!
//! ```ignore
//! #[derive(Default)]
//! struct ServeArgs {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! impl Bind for ServeArgs {
//!     fn bindings(&mut self) -> Vec<Binding<'_>> {
//!         charmer::bindings!(self {
//!             host: flag = "host", key = "server.host";
//!             port: flag = "port", key = "server.port";
//!             tags: key = "server.tags";
//!         })
//!     }
//! }
//!
//! let mut args = ServeArgs::default();
//! Binder::new(&mut source).flags(&ClapFlags::new(&command, &matches)).bind(&mut args)?;
//! ```
//!
//! After `bind` returns, every tagged field holds the value the source
//! resolves for its key. Untagged fields are never touched.
//!
//! # Why charmer
//!
//! Programs that take both a config file and flags usually end up with the
//! same glue per setting: look up the flag, check whether the user typed it,
//! fall back to the config value, convert, assign. The glue grows with every
//! setting and drifts from the struct it fills.
//!
//! Charmer replaces it with one table per struct. The table names the fields,
//! their keys and their flags; the field's Rust type picks the getter. Add a
//! field and a line to the table and it is bound.
//!
//! # Binding rules
//!
//! [`bind`] walks the table in declaration order. For each entry:
//!
//! - **No key and no flag**: the field is skipped.
//! - **Flag without key**: fails with
//!   [`FlagTagRequiresConfigTag`](BindError::FlagTagRequiresConfigTag). A flag
//!   is always an override of a config key, never a standalone source.
//! - **Flag and key**: the flag is looked up in the primary tier (global
//!   args), then the fallback tier (local args), and linked to the key in the
//!   source. The source then lets a flag the user actually typed win over
//!   stored values.
//! - **Key**: the source is read with the getter for the field's type and the
//!   result is assigned.
//!
//! The first failure stops the walk. Fields already visited keep their new
//! values.
//!
//! # Supported field types
//!
//! | Field type                          | Getter                   |
//! |-------------------------------------|--------------------------|
//! | `String`                            | `get_string`             |
//! | `bool`                              | `get_bool`               |
//! | `i8` `i16` `i32` `i64` `isize`      | `get_i64`, narrowed      |
//! | `u8` `u16` `u32` `u64` `usize`      | `get_u64`, narrowed      |
//! | `Vec<String>`                       | `get_string_list`        |
//! | `Vec<i64>`                          | `get_int_list`           |
//! | `Vec<isize>`                        | `get_int_list`, narrowed |
//!
//! Narrowing is checked: a value that does not fit the field fails with
//! [`IntegerOverflow`](BindError::IntegerOverflow) and leaves the field
//! as it was. Sequences are replaced, not appended to.
//!
//! Other types can appear in a table but never bind. Vectors of other element
//! types fail with [`UnsupportedSliceElement`](BindError::UnsupportedSliceElement),
//! maps with [`NotImplemented`](BindError::NotImplemented), and everything
//! else (floats, `char`, `Box`, `Option`, nested structs) with
//! [`UnsupportedFieldType`](BindError::UnsupportedFieldType).
//!
//! # Targets
//!
//! [`bind`] takes anything convertible into a [`Target`]. A `&mut` borrow of
//! a [`Bind`] type is the only target that binds. Passing a value by move
//! ([`Target::owned`]) fails with [`NotAPointer`](BindError::NotAPointer), and
//! a borrow of a non-struct ([`Target::value`]) fails with
//! [`NotAStructPointer`](BindError::NotAStructPointer).
//!
//! # Config sources
//!
//! [`ConfigSource`] is a trait, so any store can back the binder. The crate
//! ships [`TomlSource`], which adapts configuration resolved elsewhere:
//!
//! - [`TomlSource::load`] runs a [confique](https://docs.rs/confique) builder
//!   (files, env, defaults) and serves the result.
//! - [`TomlSource::from_serialize`] and [`TomlSource::from_table`] adopt an
//!   existing struct or table.
//! - [`TomlSource::set`], [`TomlSource::set_default`] and
//!   [`TomlSource::bind_env`] add overrides, fallbacks and env vars.
//!
//! Lookups resolve overrides, then a typed linked flag, then env, then
//! config, then defaults, and finally the linked flag's own default. Keys are
//! dotted (`server.port`) and case-insensitive. Getters never fail: a missing
//! or unconvertible value reads as the type's zero value.
//!
//! # Flags
//!
//! [`FlagRegistry`] is the two-tier lookup the binder needs. With the `clap`
//! Cargo feature (on by default), [`ClapFlags`] serves a parsed clap
//! [`Command`](clap::Command). [`FlagSet`] is a framework-free registry for
//! other parsers and for tests.
//!
//! # Logging
//!
//! The binder reports through [`tracing`]: one `debug` event per bound field
//! and linked flag, `trace` for skipped fields, and `warn` from [`TomlSource`]
//! when a stored value cannot be converted. Install any subscriber to see
//! them.
//!
//! # Error handling
//!
//! All fallible operations return [`BindError`]. Messages name the field
//! and, where relevant, the flag, key or kind involved. See the [`error`]
//! module for the full set.

pub mod error;
pub mod types;

mod binder;
mod cast;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod field;
mod flags;
mod path;
mod source;
mod toml_source;

#[cfg(test)]
mod fixtures;

pub use binder::{Binder, bind};
#[cfg(feature = "clap")]
pub use cli::ClapFlags;
pub use error::BindError;
pub use field::{Bind, Binding, Element, Field, SignedSlot, Slot, Target, UnsignedSlot};
pub use flags::FlagSet;
pub use source::{ConfigSource, FlagRegistry};
pub use toml_source::TomlSource;
pub use types::{Flag, Kind};
