//! The binding table: which fields of a struct are bound, under which tags,
//! and how each field's value is written.
//!
//! A type opts in by implementing [`Bind`], listing its fields in declaration
//! order. Each [`Binding`] carries the two optional tags (a config key and a
//! flag name) and a [`Slot`], a mutable borrow of the field tagged by its kind.
//! Slots are built through the [`Field`] trait, so the kind is chosen by the
//! field's static type:
//!
//! ```ignore
//! impl Bind for Args {
//!     fn bindings(&mut self) -> Vec<Binding<'_>> {
//!         bindings!(self {
//!             host: key = "server.host";
//!             port: key = "server.port", flag = "port";
//!             scratch;
//!         })
//!     }
//! }
//! ```
//!
//! A field listed without tags (like `scratch` above) is skipped by the
//! binder. Fields whose type has no [`Field`] impl can still be declared with
//! [`Binding::slot`] and an explicit [`Slot::Unsupported`] kind.

use std::collections::{BTreeMap, HashMap};
use std::num::TryFromIntError;

use crate::error::BindError;
use crate::source::ConfigSource;
use crate::types::Kind;

/// A struct whose fields can be bound.
pub trait Bind {
    /// The struct's binding table, in field declaration order.
    fn bindings(&mut self) -> Vec<Binding<'_>>;
}

/// One row of a binding table.
#[derive(Debug)]
pub struct Binding<'a> {
    field: &'static str,
    key: Option<&'static str>,
    flag: Option<&'static str>,
    slot: Slot<'a>,
}

impl<'a> Binding<'a> {
    /// An untagged binding for `value`, with the slot chosen by its type.
    pub fn new<F: Field>(field: &'static str, value: &'a mut F) -> Self {
        Self::slot(field, value.slot())
    }

    /// An untagged binding with an explicit slot.
    pub fn slot(field: &'static str, slot: Slot<'a>) -> Self {
        Self {
            field,
            key: None,
            flag: None,
            slot,
        }
    }

    /// Tag the field with the config key it is read from.
    pub fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    /// Tag the field with the flag whose explicit value overrides the config.
    pub fn flag(mut self, flag: &'static str) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn bind_key(&self) -> Option<&'static str> {
        self.key
    }

    pub fn flag_name(&self) -> Option<&'static str> {
        self.flag
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        &'static str,
        Option<&'static str>,
        Option<&'static str>,
        Slot<'a>,
    ) {
        (self.field, self.key, self.flag, self.slot)
    }
}

/// Build a binding table from `self`'s fields.
///
/// Each entry is `field` or `field: tag = value, ...` where `tag` is a
/// [`Binding`] builder method (`key`, `flag`). Entries are separated by `;`.
#[macro_export]
macro_rules! bindings {
    ($this:ident { $($field:ident $(: $($tag:ident = $value:expr),+)?);* $(;)? }) => {
        ::std::vec![$(
            $crate::Binding::new(::std::stringify!($field), &mut $this.$field)
                $($(.$tag($value))+)?
        ),*]
    };
}

/// A mutable borrow of one field, tagged by the field's kind.
///
/// The first seven variants are the bindable kinds; the last three describe
/// fields that are declared but can never be bound.
#[derive(Debug)]
pub enum Slot<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    Signed(SignedSlot<'a>),
    Unsigned(UnsignedSlot<'a>),
    TextSeq(&'a mut Vec<String>),
    IntSeq(&'a mut Vec<i64>),
    /// Native-width integers, narrowed element by element.
    IsizeSeq(&'a mut Vec<isize>),
    /// A sequence whose element kind is not supported.
    Seq(Kind),
    /// A mapping. Reserved, never bound.
    Map,
    Unsupported(Kind),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Text(_) => Kind::String,
            Slot::Bool(_) => Kind::Bool,
            Slot::Signed(slot) => slot.kind(),
            Slot::Unsigned(slot) => slot.kind(),
            Slot::TextSeq(_) | Slot::IntSeq(_) | Slot::IsizeSeq(_) | Slot::Seq(_) => Kind::Seq,
            Slot::Map => Kind::Map,
            Slot::Unsupported(kind) => *kind,
        }
    }

    /// Read `key` from `config` with the getter matching this slot's kind and
    /// write the result into the field.
    ///
    /// On error the field is left untouched.
    pub(crate) fn load<C: ConfigSource + ?Sized>(
        self,
        field: &'static str,
        key: &'static str,
        config: &C,
    ) -> Result<(), BindError> {
        match self {
            Slot::Text(v) => *v = config.get_string(key),
            Slot::Bool(v) => *v = config.get_bool(key),
            Slot::Signed(slot) => {
                let kind = slot.kind();
                let value = config.get_i64(key);
                slot.store(value)
                    .map_err(|_| BindError::IntegerOverflow {
                        field,
                        key,
                        value: value.to_string(),
                        kind,
                    })?;
            }
            Slot::Unsigned(slot) => {
                let kind = slot.kind();
                let value = config.get_u64(key);
                slot.store(value)
                    .map_err(|_| BindError::IntegerOverflow {
                        field,
                        key,
                        value: value.to_string(),
                        kind,
                    })?;
            }
            Slot::TextSeq(v) => *v = config.get_string_list(key),
            Slot::IntSeq(v) => *v = config.get_int_list(key),
            Slot::IsizeSeq(v) => {
                *v = config
                    .get_int_list(key)
                    .into_iter()
                    .map(|n| {
                        isize::try_from(n).map_err(|_| BindError::IntegerOverflow {
                            field,
                            key,
                            value: n.to_string(),
                            kind: Kind::Isize,
                        })
                    })
                    .collect::<Result<_, _>>()?;
            }
            Slot::Seq(kind) => return Err(BindError::UnsupportedSliceElement { field, kind }),
            Slot::Map => {
                return Err(BindError::NotImplemented {
                    field,
                    kind: Kind::Map,
                });
            }
            Slot::Unsupported(kind) => return Err(BindError::UnsupportedFieldType { field, kind }),
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SignedSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
}

impl SignedSlot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            SignedSlot::I8(_) => Kind::I8,
            SignedSlot::I16(_) => Kind::I16,
            SignedSlot::I32(_) => Kind::I32,
            SignedSlot::I64(_) => Kind::I64,
            SignedSlot::Isize(_) => Kind::Isize,
        }
    }

    fn store(self, value: i64) -> Result<(), TryFromIntError> {
        match self {
            SignedSlot::I8(v) => *v = i8::try_from(value)?,
            SignedSlot::I16(v) => *v = i16::try_from(value)?,
            SignedSlot::I32(v) => *v = i32::try_from(value)?,
            SignedSlot::I64(v) => *v = value,
            SignedSlot::Isize(v) => *v = isize::try_from(value)?,
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum UnsignedSlot<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
}

impl UnsignedSlot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            UnsignedSlot::U8(_) => Kind::U8,
            UnsignedSlot::U16(_) => Kind::U16,
            UnsignedSlot::U32(_) => Kind::U32,
            UnsignedSlot::U64(_) => Kind::U64,
            UnsignedSlot::Usize(_) => Kind::Usize,
        }
    }

    fn store(self, value: u64) -> Result<(), TryFromIntError> {
        match self {
            UnsignedSlot::U8(v) => *v = u8::try_from(value)?,
            UnsignedSlot::U16(v) => *v = u16::try_from(value)?,
            UnsignedSlot::U32(v) => *v = u32::try_from(value)?,
            UnsignedSlot::U64(v) => *v = value,
            UnsignedSlot::Usize(v) => *v = usize::try_from(value)?,
        }
        Ok(())
    }
}

/// A type that can appear as a field in a binding table.
pub trait Field {
    const KIND: Kind;

    fn slot(&mut self) -> Slot<'_>;
}

/// A type that can appear as the element of a `Vec` field.
///
/// Only `String`, `i64` and `isize` elements are bindable; every other element kind
/// produces a [`Slot::Seq`] that the binder rejects.
pub trait Element: Field + Sized {
    fn seq_slot(_seq: &mut Vec<Self>) -> Slot<'_> {
        Slot::Seq(Self::KIND)
    }
}

impl Field for String {
    const KIND: Kind = Kind::String;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }
}

impl Field for bool {
    const KIND: Kind = Kind::Bool;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

macro_rules! integer_fields {
    ($slot:ident :: $wrapper:ident { $($ty:ty => $variant:ident),* }) => {
        $(
            impl Field for $ty {
                const KIND: Kind = Kind::$variant;

                fn slot(&mut self) -> Slot<'_> {
                    Slot::$slot($wrapper::$variant(self))
                }
            }
        )*
    };
}

integer_fields!(Signed::SignedSlot {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize
});

integer_fields!(Unsigned::UnsignedSlot {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize
});

macro_rules! unsupported_fields {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl Field for $ty {
                const KIND: Kind = Kind::$variant;

                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported(Self::KIND)
                }
            }
        )*
    };
}

unsupported_fields!(f32 => F32, f64 => F64, char => Char);

impl<T: Element> Field for Vec<T> {
    const KIND: Kind = Kind::Seq;

    fn slot(&mut self) -> Slot<'_> {
        T::seq_slot(self)
    }
}

impl<K, V, S> Field for HashMap<K, V, S> {
    const KIND: Kind = Kind::Map;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Map
    }
}

impl<K, V> Field for BTreeMap<K, V> {
    const KIND: Kind = Kind::Map;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Map
    }
}

impl<T: ?Sized> Field for Box<T> {
    const KIND: Kind = Kind::Pointer;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(Kind::Pointer)
    }
}

impl<T> Field for Option<T> {
    const KIND: Kind = Kind::Option;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(Kind::Option)
    }
}

impl Element for String {
    fn seq_slot(seq: &mut Vec<Self>) -> Slot<'_> {
        Slot::TextSeq(seq)
    }
}

impl Element for i64 {
    fn seq_slot(seq: &mut Vec<Self>) -> Slot<'_> {
        Slot::IntSeq(seq)
    }
}

impl Element for isize {
    fn seq_slot(seq: &mut Vec<Self>) -> Slot<'_> {
        Slot::IsizeSeq(seq)
    }
}

impl Element for bool {}
impl Element for i8 {}
impl Element for i16 {}
impl Element for i32 {}
impl Element for u8 {}
impl Element for u16 {}
impl Element for u32 {}
impl Element for u64 {}
impl Element for usize {}
impl Element for f32 {}
impl Element for f64 {}
impl Element for char {}
impl<T: Element> Element for Vec<T> {}

/// What [`bind`](crate::bind) is asked to populate.
///
/// `&mut T` for any `T: Bind` converts into [`Target::Record`], the only
/// variant that binds. The other two exist for callers that describe values
/// dynamically.
pub enum Target<'a> {
    /// A borrowed struct.
    Record(&'a mut dyn Bind),
    /// A borrowed value that is not a struct.
    Value(Slot<'a>),
    /// A value handed over by copy; writes to it would be lost.
    Owned(Kind),
}

impl<'a> Target<'a> {
    /// Borrow a single non-struct value as a target.
    pub fn value<F: Field>(value: &'a mut F) -> Self {
        Target::Value(value.slot())
    }

    /// Describe a value passed by copy.
    pub fn owned<F: Field>(_value: F) -> Self {
        Target::Owned(F::KIND)
    }
}

impl<'a, T: Bind> From<&'a mut T> for Target<'a> {
    fn from(record: &'a mut T) -> Self {
        Target::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{AllKinds, UnsupportedKinds};

    #[test]
    fn field_kinds_follow_static_types() {
        assert_eq!(<String as Field>::KIND, Kind::String);
        assert_eq!(<u16 as Field>::KIND, Kind::U16);
        assert_eq!(<Vec<String> as Field>::KIND, Kind::Seq);
        assert_eq!(<HashMap<String, String> as Field>::KIND, Kind::Map);
        assert_eq!(<Box<u8> as Field>::KIND, Kind::Pointer);
    }

    #[test]
    fn vec_slot_depends_on_element() {
        let mut text: Vec<String> = Vec::new();
        assert!(matches!(text.slot(), Slot::TextSeq(_)));

        let mut ints: Vec<i64> = Vec::new();
        assert!(matches!(ints.slot(), Slot::IntSeq(_)));

        let mut native: Vec<isize> = Vec::new();
        assert!(matches!(native.slot(), Slot::IsizeSeq(_)));

        let mut narrow: Vec<i32> = Vec::new();
        assert!(matches!(narrow.slot(), Slot::Seq(Kind::I32)));

        let mut floats: Vec<f64> = Vec::new();
        assert!(matches!(floats.slot(), Slot::Seq(Kind::F64)));
    }

    #[test]
    fn binding_builder_records_tags() {
        let mut value = String::new();
        let binding = Binding::new("value", &mut value).key("config").flag("flag");
        assert_eq!(binding.field(), "value");
        assert_eq!(binding.bind_key(), Some("config"));
        assert_eq!(binding.flag_name(), Some("flag"));
        assert_eq!(binding.kind(), Kind::String);
    }

    #[test]
    fn bindings_macro_keeps_declaration_order() {
        let mut all = AllKinds::default();
        let names: Vec<&str> = all.bindings().iter().map(Binding::field).collect();
        assert_eq!(
            names,
            [
                "string",
                "boolean",
                "int8",
                "int16",
                "int32",
                "int64",
                "int",
                "uint8",
                "uint16",
                "uint32",
                "uint64",
                "uint",
                "string_slice",
                "int_slice",
            ]
        );
    }

    #[test]
    fn bindings_macro_allows_untagged_entries() {
        let mut kinds = UnsupportedKinds::default();
        let bindings = kinds.bindings();
        let untagged = bindings.iter().find(|b| b.field() == "ignored").unwrap();
        assert_eq!(untagged.bind_key(), None);
        assert_eq!(untagged.flag_name(), None);
    }

    #[test]
    fn signed_store_narrows_with_check() {
        let mut small = 0i8;
        assert!(SignedSlot::I8(&mut small).store(127).is_ok());
        assert_eq!(small, 127);
        assert!(SignedSlot::I8(&mut small).store(128).is_err());
        assert_eq!(small, 127);
        assert!(SignedSlot::I8(&mut small).store(-128).is_ok());
        assert_eq!(small, -128);
    }

    #[test]
    fn unsigned_store_narrows_with_check() {
        let mut port = 0u16;
        assert!(UnsignedSlot::U16(&mut port).store(8080).is_ok());
        assert_eq!(port, 8080);
        assert!(UnsignedSlot::U16(&mut port).store(70_000).is_err());
        assert_eq!(port, 8080);
    }

    #[test]
    fn target_from_record_borrow() {
        let mut all = AllKinds::default();
        assert!(matches!(Target::from(&mut all), Target::Record(_)));
    }

    #[test]
    fn target_value_and_owned_report_kind() {
        let mut n = 0i32;
        match Target::value(&mut n) {
            Target::Value(slot) => assert_eq!(slot.kind(), Kind::I32),
            _ => panic!("expected a value target"),
        }
        assert!(matches!(Target::owned(String::new()), Target::Owned(Kind::String)));
    }
}
