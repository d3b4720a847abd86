//! Runtime introspection of the types you bind request data into.
//!
//! # Overview
//!
//! The binder doesn't know anything about your types at compile time.
//! It asks each value for its [`Shape`], a mutable view that tells the binder
//! what it's looking at (an integer, a string, a sequence, a record with named
//! fields, etc.), and makes every decision based on the answer.
//!
//! You rarely implement [`Bind`] by hand: `#[derive(Bind)]` does it for structs with
//! named fields.
//! Manual implementations are useful for types that parse themselves from a single
//! value, via [`UnmarshalParam`] or [`UnmarshalText`].
//!
//! # Example
//!
//! ```rust
//! use pavex_bind::reflect::{Bind, Shape};
//! use pavex_bind::{BoxError, UnmarshalParam};
//!
//! /// A temperature, sent over the wire as `21.5C`.
//! #[derive(Default)]
//! pub struct Celsius(f64);
//!
//! impl UnmarshalParam for Celsius {
//!     fn unmarshal_param(&mut self, param: &str) -> Result<(), BoxError> {
//!         let raw = param.strip_suffix('C').ok_or("missing `C` suffix")?;
//!         self.0 = raw.parse()?;
//!         Ok(())
//!     }
//! }
//!
//! impl Bind for Celsius {
//!     fn shape(&mut self) -> Shape<'_> {
//!         Shape::Opaque(std::any::type_name::<Self>())
//!     }
//!
//!     fn as_unmarshal_param(&mut self) -> Option<&mut dyn UnmarshalParam> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! [`UnmarshalParam`]: crate::UnmarshalParam
//! [`UnmarshalText`]: crate::UnmarshalText
use std::fmt;

use crate::binder::Namespace;
use crate::coerce::CoercionError;
use crate::unmarshal::{UnmarshalParam, UnmarshalText};

mod impls;

/// A value whose shape can be inspected and mutated at runtime by the binder.
///
/// Use `#[derive(Bind)]` to implement it for your own structs.
pub trait Bind {
    /// A mutable view over the shape of this value.
    fn shape(&mut self) -> Shape<'_>;

    /// Return `Some` if this type knows how to parse itself from a single parameter value.
    ///
    /// It takes precedence over [`as_unmarshal_text`](Bind::as_unmarshal_text) and over
    /// the built-in coercion rules.
    fn as_unmarshal_param(&mut self) -> Option<&mut dyn UnmarshalParam> {
        None
    }

    /// Return `Some` if this type knows how to parse itself from raw text.
    fn as_unmarshal_text(&mut self) -> Option<&mut dyn UnmarshalText> {
        None
    }
}

/// A mutable view over a value, as seen by the binder.
#[non_exhaustive]
pub enum Shape<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    Bool(&'a mut bool),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    /// An indirection that may need to be initialized before it can be bound into,
    /// e.g. an `Option<T>` or a `Box<T>`.
    Pointer(&'a mut dyn Pointer),
    /// A homogeneous, growable list of values, e.g. a `Vec<T>`.
    Sequence(&'a mut dyn Sequence),
    /// A type with named fields.
    Record(&'a mut dyn Record),
    /// A string-to-string map.
    Mapping(&'a mut dyn Mapping),
    /// A type that the binder can't look into.
    ///
    /// It can still be bound if it exposes one of the custom unmarshaling capabilities.
    /// The payload is the name of the type, used in error messages.
    Opaque(&'static str),
}

impl Shape<'_> {
    /// The kind of value behind this shape.
    pub fn kind(&self) -> Kind {
        match self {
            Shape::I8(_) => Kind::I8,
            Shape::I16(_) => Kind::I16,
            Shape::I32(_) => Kind::I32,
            Shape::I64(_) => Kind::I64,
            Shape::Isize(_) => Kind::Isize,
            Shape::U8(_) => Kind::U8,
            Shape::U16(_) => Kind::U16,
            Shape::U32(_) => Kind::U32,
            Shape::U64(_) => Kind::U64,
            Shape::Usize(_) => Kind::Usize,
            Shape::Bool(_) => Kind::Bool,
            Shape::F32(_) => Kind::F32,
            Shape::F64(_) => Kind::F64,
            Shape::String(_) => Kind::String,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Sequence(_) => Kind::Sequence,
            Shape::Record(_) => Kind::Record,
            Shape::Mapping(_) => Kind::Mapping,
            Shape::Opaque(name) => Kind::Opaque(*name),
        }
    }
}

/// The kind of a value, detached from the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Kind {
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
    Bool,
    F32,
    F64,
    String,
    Pointer,
    Sequence,
    Record,
    Mapping,
    Opaque(&'static str),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
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
            Kind::Bool => "bool",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "String",
            Kind::Pointer => "pointer",
            Kind::Sequence => "sequence",
            Kind::Record => "record",
            Kind::Mapping => "map",
            Kind::Opaque(name) => *name,
        };
        f.write_str(name)
    }
}

/// A type with named fields that can be bound one by one.
pub trait Record {
    /// Describe the bindable fields of this record, in declaration order.
    ///
    /// Fields that must never be touched by the binder are simply left out.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A string-to-string map.
///
/// Binding into a map sets one entry per input name, using the first value
/// available for that name.
pub trait Mapping {
    /// Set the entry for `key` to `value`, overwriting any previous value.
    fn set_entry(&mut self, key: &str, value: &str);
}

/// An indirection to another bindable value.
pub trait Pointer {
    /// Make sure the pointee exists, allocating a default instance if it doesn't,
    /// and return a mutable reference to it.
    ///
    /// The pointee is exclusively owned by the pointer.
    fn ensure_init(&mut self) -> &mut dyn Bind;
}

/// A homogeneous list of values.
pub trait Sequence {
    /// Replace the content of the sequence with one element per value,
    /// coercing each value into a fresh element.
    ///
    /// If any element fails to coerce, the sequence is left untouched and the error
    /// is returned.
    fn rebuild(&mut self, values: &[String]) -> Result<(), CoercionError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// The explicit source names of a field, one per [`Namespace`].
pub struct Tags {
    form: Option<&'static str>,
    query: Option<&'static str>,
    param: Option<&'static str>,
}

impl Tags {
    /// The explicit source name for the given namespace, if there is one.
    pub fn get(&self, namespace: Namespace) -> Option<&'static str> {
        match namespace {
            Namespace::Form => self.form,
            Namespace::Query => self.query,
            Namespace::Param => self.param,
        }
    }

    fn set(&mut self, namespace: Namespace, name: &'static str) {
        let slot = match namespace {
            Namespace::Form => &mut self.form,
            Namespace::Query => &mut self.query,
            Namespace::Param => &mut self.param,
        };
        *slot = Some(name);
    }
}

/// A field of a [`Record`], as seen by the binder.
pub struct Field<'a> {
    /// The name of the field, as declared in the source code.
    pub name: &'static str,
    /// The explicit source names for this field.
    pub tags: Tags,
    /// The value of the field.
    pub value: &'a mut dyn Bind,
}

impl<'a> Field<'a> {
    /// A field without explicit source names.
    pub fn new(name: &'static str, value: &'a mut dyn Bind) -> Self {
        Self {
            name,
            tags: Tags::default(),
            value,
        }
    }

    /// Populate this field from `source_name` when binding the given namespace.
    pub fn tag(mut self, namespace: Namespace, source_name: &'static str) -> Self {
        self.tags.set(namespace, source_name);
        self
    }

    /// Populate this field from `source_name` when binding a form body.
    pub fn form(self, source_name: &'static str) -> Self {
        self.tag(Namespace::Form, source_name)
    }

    /// Populate this field from `source_name` when binding query parameters.
    pub fn query(self, source_name: &'static str) -> Self {
        self.tag(Namespace::Query, source_name)
    }

    /// Populate this field from `source_name` when binding path parameters.
    pub fn param(self, source_name: &'static str) -> Self {
        self.tag(Namespace::Param, source_name)
    }

    /// The name to look up in the input for the given namespace.
    ///
    /// It's the explicit tag, if there is one, or the field name otherwise.
    pub fn source_name(&self, namespace: Namespace) -> &'static str {
        self.tags.get(namespace).unwrap_or(self.name)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// `true` if the value, once every pointer indirection has been followed,
/// is a record.
///
/// Uninitialized pointers are initialized along the way.
pub(crate) fn resolves_to_record(value: &mut dyn Bind) -> bool {
    match value.shape() {
        Shape::Pointer(pointer) => resolves_to_record(pointer.ensure_init()),
        Shape::Record(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name_prefers_tags() {
        let mut city = String::new();
        let field = Field::new("city", &mut city).query("town");
        assert_eq!(field.source_name(Namespace::Query), "town");
        assert_eq!(field.source_name(Namespace::Form), "city");
        assert_eq!(field.source_name(Namespace::Param), "city");
    }

    #[test]
    fn kinds_are_displayed_with_rust_names() {
        let mut n = 0u16;
        assert_eq!(n.shape().kind().to_string(), "u16");
        let mut v: Vec<u16> = vec![];
        assert_eq!(v.shape().kind().to_string(), "sequence");
    }

    #[test]
    fn pointers_to_records_resolve_to_records() {
        #[derive(Default)]
        struct Empty;

        impl Record for Empty {
            fn fields(&mut self) -> Vec<Field<'_>> {
                vec![]
            }
        }

        impl Bind for Empty {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Record(self)
            }
        }

        let mut target: Option<Box<Empty>> = None;
        assert!(resolves_to_record(&mut target));
        assert!(target.is_some());

        let mut scalar = 0i32;
        assert!(!resolves_to_record(&mut scalar));
    }
}
