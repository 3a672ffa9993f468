//! An in-memory [`FlagRegistry`] with a persistent and a local tier.

use toml::Value;

use crate::source::FlagRegistry;
use crate::types::Flag;

/// Flags grouped into two tiers: persistent flags (inherited by
/// subcommands, looked up first) and local flags (looked up second).
///
/// Useful for apps that collect flags from something other than clap, and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    persistent: Vec<Flag>,
    local: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag to the persistent (primary) tier.
    pub fn persistent(mut self, flag: Flag) -> Self {
        self.persistent.push(flag);
        self
    }

    /// Add a flag to the local (fallback) tier.
    pub fn local(mut self, flag: Flag) -> Self {
        self.local.push(flag);
        self
    }

    /// Record an explicit value for the flag `name`, primary tier first.
    /// Returns `false` if no flag of that name exists.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let flag = self
            .persistent
            .iter_mut()
            .chain(self.local.iter_mut())
            .find(|f| f.name() == name);
        match flag {
            Some(flag) => {
                flag.set(value);
                true
            }
            None => false,
        }
    }
}

impl FlagRegistry for FlagSet {
    fn lookup_primary(&self, name: &str) -> Option<Flag> {
        self.persistent.iter().find(|f| f.name() == name).cloned()
    }

    fn lookup_fallback(&self, name: &str) -> Option<Flag> {
        self.local.iter().find(|f| f.name() == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_respects_tiers() {
        let flags = FlagSet::new()
            .persistent(Flag::new("verbose", false))
            .local(Flag::new("output", "out.txt"));

        assert!(flags.lookup_primary("verbose").is_some());
        assert!(flags.lookup_fallback("verbose").is_none());
        assert!(flags.lookup_primary("output").is_none());
        assert!(flags.lookup_fallback("output").is_some());
    }

    #[test]
    fn set_marks_flag_changed() {
        let mut flags = FlagSet::new().local(Flag::new("flag", "flag-default"));
        assert!(flags.set("flag", "flag-value"));

        let flag = flags.lookup_fallback("flag").unwrap();
        assert!(flag.is_changed());
        assert_eq!(flag.value().as_str(), Some("flag-value"));
    }

    #[test]
    fn set_prefers_persistent_tier() {
        let mut flags = FlagSet::new()
            .persistent(Flag::new("flag", "a"))
            .local(Flag::new("flag", "b"));
        flags.set("flag", "c");

        assert!(flags.lookup_primary("flag").unwrap().is_changed());
        assert!(!flags.lookup_fallback("flag").unwrap().is_changed());
    }

    #[test]
    fn set_unknown_flag_returns_false() {
        let mut flags = FlagSet::new();
        assert!(!flags.set("missing", 1i64));
    }
}
