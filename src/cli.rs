//! Clap adapter for charmer.
//!
//! This module is the **optional integration layer** between the binder's
//! framework-agnostic [`FlagRegistry`] and the [clap](https://docs.rs/clap)
//! CLI parser. It is compiled only when the `clap` Cargo feature is enabled
//! (on by default).
//!
//! [`ClapFlags`] pairs a [`Command`] with the [`ArgMatches`] it produced.
//! Global args (`Arg::global(true)`) form the primary tier and every other
//! named arg forms the fallback tier. A flag is found by its long name, or by
//! its id when it has no long name.
//!
//! Only values typed on the command line count as changed. Defaults declared
//! with `default_value` are reported as the flag's unchanged value, so they
//! never shadow configuration.
//!
//! When binding a subcommand, pass the subcommand's `Command` from a built
//! tree (see [`Command::build`]) so that inherited global args are present.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use toml::Value;

use crate::source::FlagRegistry;
use crate::types::Flag;

/// A [`FlagRegistry`] over parsed clap arguments.
///
/// ```ignore
/// let command = Cli::command();
/// let matches = command.clone().get_matches();
/// let flags = ClapFlags::new(&command, &matches);
/// Binder::new(&mut source).flags(&flags).bind(&mut args)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClapFlags<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
}

impl<'a> ClapFlags<'a> {
    pub fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self { command, matches }
    }

    fn find(&self, name: &str, global: bool) -> Option<Flag> {
        let arg = self
            .command
            .get_arguments()
            .filter(|arg| !arg.is_positional() && arg.is_global_set() == global)
            .find(|arg| arg.get_long() == Some(name) || arg.get_id().as_str() == name)?;
        Some(self.flag(name, arg))
    }

    fn flag(&self, name: &str, arg: &Arg) -> Flag {
        let id = arg.get_id().as_str();
        let value = self.parsed(arg).unwrap_or_else(|| declared_default(arg));
        if self.matches.value_source(id) == Some(ValueSource::CommandLine) {
            Flag::changed(name, value)
        } else {
            Flag::new(name, value)
        }
    }

    /// The value clap stored for `arg`, whether typed or defaulted.
    fn parsed(&self, arg: &Arg) -> Option<Value> {
        let id = arg.get_id().as_str();
        match arg.get_action() {
            ArgAction::SetTrue | ArgAction::SetFalse => self
                .matches
                .try_get_one::<bool>(id)
                .ok()
                .flatten()
                .map(|b| Value::Boolean(*b)),
            ArgAction::Count => self
                .matches
                .try_get_one::<u8>(id)
                .ok()
                .flatten()
                .map(|n| Value::Integer(i64::from(*n))),
            action => {
                let raw: Vec<String> = self
                    .matches
                    .try_get_raw(id)
                    .ok()
                    .flatten()?
                    .map(|v| v.to_string_lossy().into_owned())
                    .collect();
                if matches!(action, ArgAction::Append) || raw.len() > 1 {
                    Some(Value::Array(raw.into_iter().map(Value::String).collect()))
                } else {
                    raw.into_iter().next().map(Value::String)
                }
            }
        }
    }
}

/// The value an arg reports when clap has nothing stored for it.
fn declared_default(arg: &Arg) -> Value {
    let mut defaults: Vec<Value> = arg
        .get_default_values()
        .iter()
        .map(|v| Value::String(v.to_string_lossy().into_owned()))
        .collect();
    match arg.get_action() {
        ArgAction::SetTrue => Value::Boolean(false),
        ArgAction::SetFalse => Value::Boolean(true),
        ArgAction::Count => Value::Integer(0),
        ArgAction::Append => Value::Array(defaults),
        _ if defaults.len() > 1 => Value::Array(defaults),
        _ => defaults.pop().unwrap_or_else(|| Value::String(String::new())),
    }
}

impl FlagRegistry for ClapFlags<'_> {
    fn lookup_primary(&self, name: &str) -> Option<Flag> {
        self.find(name, true)
    }

    fn lookup_fallback(&self, name: &str) -> Option<Flag> {
        self.find(name, false)
    }
}
