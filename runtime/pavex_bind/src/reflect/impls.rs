use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use super::{Bind, Mapping, Pointer, Sequence, Shape};
use crate::coerce::{CoercionError, coerce};

macro_rules! scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bind for $ty {
                fn shape(&mut self) -> Shape<'_> {
                    Shape::$variant(self)
                }
            }
        )*
    };
}

scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    bool => Bool,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T> Pointer for Option<T>
where
    T: Bind + Default,
{
    fn ensure_init(&mut self) -> &mut dyn Bind {
        self.get_or_insert_with(T::default)
    }
}

impl<T> Bind for Option<T>
where
    T: Bind + Default,
{
    fn shape(&mut self) -> Shape<'_> {
        Shape::Pointer(self)
    }
}

impl<T> Pointer for Box<T>
where
    T: Bind,
{
    fn ensure_init(&mut self) -> &mut dyn Bind {
        &mut **self
    }
}

impl<T> Bind for Box<T>
where
    T: Bind,
{
    fn shape(&mut self) -> Shape<'_> {
        Shape::Pointer(self)
    }
}

impl<T> Sequence for Vec<T>
where
    T: Bind + Default,
{
    fn rebuild(&mut self, values: &[String]) -> Result<(), CoercionError> {
        let mut elements = Vec::with_capacity(values.len());
        for value in values {
            let mut element = T::default();
            coerce(&mut element, value)?;
            elements.push(element);
        }
        *self = elements;
        Ok(())
    }
}

impl<T> Bind for Vec<T>
where
    T: Bind + Default,
{
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<S> Mapping for HashMap<String, String, S>
where
    S: BuildHasher,
{
    fn set_entry(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl<S> Bind for HashMap<String, String, S>
where
    S: BuildHasher,
{
    fn shape(&mut self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}

impl Mapping for BTreeMap<String, String> {
    fn set_entry(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl Bind for BTreeMap<String, String> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}

impl<S> Mapping for IndexMap<String, String, S>
where
    S: BuildHasher,
{
    fn set_entry(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl<S> Bind for IndexMap<String, String, S>
where
    S: BuildHasher,
{
    fn shape(&mut self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}
