use std::fmt;

use toml::Value;

/// The kind of a struct field, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    /// A growable sequence (`Vec<T>`).
    Seq,
    /// A key-value mapping (`HashMap`, `BTreeMap`).
    Map,
    /// An owning pointer (`Box<T>`).
    Pointer,
    Option,
    Struct,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "String",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Char => "char",
            Kind::Seq => "Vec",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Option => "option",
            Kind::Struct => "struct",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handle to a command-line flag, as returned by a
/// [`FlagRegistry`](crate::FlagRegistry).
///
/// The handle is a snapshot: `value` is the flag's current value (its default
/// unless the user passed it) and `changed` records whether the user passed it
/// explicitly. Linking a handle into a [`ConfigSource`](crate::ConfigSource)
/// only lets the value win when `changed` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    name: String,
    value: Value,
    changed: bool,
}

impl Flag {
    /// A flag that has not been set, holding its declared default.
    pub fn new(name: &str, default: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: default.into(),
            changed: false,
        }
    }

    /// A flag that was explicitly set to `value`.
    pub fn changed(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            changed: true,
        }
    }

    /// Record an explicit value for this flag.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.value = value.into();
        self.changed = true;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_displays_rust_names() {
        assert_eq!(Kind::U8.to_string(), "u8");
        assert_eq!(Kind::Seq.to_string(), "Vec");
        assert_eq!(Kind::Pointer.to_string(), "pointer");
    }

    #[test]
    fn new_flag_is_unchanged() {
        let flag = Flag::new("flag", "flag-default");
        assert_eq!(flag.name(), "flag");
        assert_eq!(flag.value().as_str(), Some("flag-default"));
        assert!(!flag.is_changed());
    }

    #[test]
    fn set_marks_flag_changed() {
        let mut flag = Flag::new("port", 8080i64);
        flag.set(3000i64);
        assert_eq!(flag.value().as_integer(), Some(3000));
        assert!(flag.is_changed());
    }
}
