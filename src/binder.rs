//! The binding routine: walk a struct's binding table and fill each tagged
//! field from a [`ConfigSource`], linking flags first where a field asks for
//! one.
//!
//! Fields are visited in declaration order and the first failure aborts the
//! call. Fields visited before the failure keep their new values; nothing is
//! rolled back.

use tracing::{debug, trace};

use crate::error::BindError;
use crate::field::{Binding, Target};
use crate::source::{ConfigSource, FlagRegistry};
use crate::types::Flag;

/// Populate `target` from `config`, linking flags from `flags` for fields that
/// carry a flag tag.
///
/// For each field in declaration order:
///
/// 1. A field with neither a key nor a flag tag is skipped.
/// 2. A flag tag without a key tag fails with
///    [`FlagTagRequiresConfigTag`](BindError::FlagTagRequiresConfigTag).
/// 3. A flag tag with no registry fails with
///    [`FlagRegistryRequired`](BindError::FlagRegistryRequired).
/// 4. The flag is looked up in the primary tier, then the fallback tier, and
///    linked to the field's key. Missing from both fails with
///    [`FlagNotFound`](BindError::FlagNotFound).
/// 5. The key is read with the getter matching the field's type and assigned.
pub fn bind<'t, C>(
    target: impl Into<Target<'t>>,
    config: &mut C,
    flags: Option<&dyn FlagRegistry>,
) -> Result<(), BindError>
where
    C: ConfigSource + ?Sized,
{
    let record = match target.into() {
        Target::Record(record) => record,
        Target::Value(slot) => return Err(BindError::NotAStructPointer { kind: slot.kind() }),
        Target::Owned(kind) => return Err(BindError::NotAPointer { kind }),
    };

    let mut bound = 0usize;
    for binding in record.bindings() {
        if bind_field(binding, config, flags)? {
            bound += 1;
        }
    }

    debug!(fields = bound, "bound struct");
    Ok(())
}

/// Bind one field. Returns `false` if the field was skipped.
fn bind_field<C>(
    binding: Binding<'_>,
    config: &mut C,
    flags: Option<&dyn FlagRegistry>,
) -> Result<bool, BindError>
where
    C: ConfigSource + ?Sized,
{
    let (field, key, flag, slot) = binding.into_parts();

    let key = match (key, flag) {
        (None, None) => {
            trace!(field, "skipping untagged field");
            return Ok(false);
        }
        (None, Some(flag)) => return Err(BindError::FlagTagRequiresConfigTag { field, flag }),
        (Some(key), _) => key,
    };

    if let Some(name) = flag {
        let registry = flags.ok_or(BindError::FlagRegistryRequired { field })?;
        let (handle, tier) =
            lookup_flag(registry, name).ok_or(BindError::FlagNotFound { field, flag: name })?;
        debug!(field, key, flag = name, tier, changed = handle.is_changed(), "linked flag");
        config.link_flag(key, handle);
    }

    let kind = slot.kind();
    slot.load(field, key, config)?;
    debug!(field, key, %kind, "bound field");
    Ok(true)
}

/// Primary tier first; the first hit wins.
fn lookup_flag(registry: &dyn FlagRegistry, name: &str) -> Option<(Flag, &'static str)> {
    if let Some(flag) = registry.lookup_primary(name) {
        return Some((flag, "primary"));
    }
    registry.lookup_fallback(name).map(|flag| (flag, "fallback"))
}

/// Reusable binding entry point holding the accessor and the optional flag
/// registry.
///
/// ```ignore
/// let mut source = TomlSource::from_serialize(&config)?;
/// Binder::new(&mut source).flags(&flags).bind(&mut args)?;
/// ```
pub struct Binder<'c> {
    config: &'c mut dyn ConfigSource,
    flags: Option<&'c dyn FlagRegistry>,
}

impl<'c> Binder<'c> {
    pub fn new(config: &'c mut dyn ConfigSource) -> Self {
        Self {
            config,
            flags: None,
        }
    }

    /// Supply the registry used for fields with a flag tag.
    pub fn flags(mut self, flags: &'c dyn FlagRegistry) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Bind `target`. May be called repeatedly; flag links accumulate in the
    /// accessor.
    pub fn bind<'t>(&mut self, target: impl Into<Target<'t>>) -> Result<(), BindError> {
        bind(target, &mut *self.config, self.flags)
    }
}
