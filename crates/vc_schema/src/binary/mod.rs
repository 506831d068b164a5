//! The binary wire format.
//!
//! Fully positional: no names, no separators, no type tags. Every scalar is
//! written as its native-endian memory representation, so the format is only
//! portable between machines of the same endianness and pointer width.
//!
//! | Value          | Encoding                                         |
//! |----------------|--------------------------------------------------|
//! | `bool`         | one byte, `0` or `1`                             |
//! | number         | `size_of::<T>()` native-endian bytes             |
//! | enum           | its discriminant, encoded as a number            |
//! | `String`       | `usize` length, then the UTF-8 bytes             |
//! | `Option<T>`    | presence byte `0`/`1`, then `T` if present       |
//! | `[T; N]`       | `N` elements                                     |
//! | `Vec<T>`       | `usize` length, then the elements                |
//! | map            | `usize` length, then key/value pairs             |
//! | registered     | parent members, then own fields, in schema order |
//!
//! Loading assumes the same member order as saving. A blob read through a
//! schema with reordered fields decodes to wrong values without any error.
//! A present optional always decodes into a freshly constructed value, so
//! sharing between pointees is not preserved.
//!
//! Length prefixes are checked against the remaining input before elements
//! are allocated. A list of elements that encode to no bytes at all is
//! limited to [`MAX_EMPTY_ELEMENTS`].

use alloc::string::{String, ToString};

use crate::format::{FormatReader, FormatWriter, ReadError, WriteError};
use crate::stream::{InStream, OutStream};
use crate::value::{Number, NumberKind, Value, ValueMut, ValueRef};

/// Upper bound on the length of a list whose elements encode to no bytes.
pub const MAX_EMPTY_ELEMENTS: usize = 1 << 20;

// -----------------------------------------------------------------------------
// BinaryFormatter

/// Reads and writes the positional binary format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BinaryFormatter;

impl BinaryFormatter {
    /// Creates a formatter.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    #[inline]
    fn write_len(len: usize, out: &mut OutStream) {
        out.extend(&len.to_ne_bytes());
    }

    #[inline]
    fn write_flag(flag: bool, out: &mut OutStream) {
        out.push(u8::from(flag));
    }

    fn write_value(&mut self, value: &dyn Value, out: &mut OutStream) -> Result<(), WriteError> {
        match value.value_ref() {
            ValueRef::Bool(value) => Self::write_flag(value, out),
            ValueRef::Number(number) => number.write_ne_bytes(out.buffer_mut()),
            ValueRef::String(text) => {
                Self::write_len(text.len(), out);
                out.push_str(text);
            }
            ValueRef::Enum(value) => value.repr().write_ne_bytes(out.buffer_mut()),
            ValueRef::Nullable(value) => {
                let inner = value.get();
                Self::write_flag(inner.is_some(), out);
                if let Some(inner) = inner {
                    self.write_value(inner, out)?;
                }
            }
            ValueRef::Array(array) => {
                for element in array.iter() {
                    self.write_value(element, out)?;
                }
            }
            ValueRef::List(list) => {
                Self::write_len(list.len(), out);
                for element in list.iter() {
                    self.write_value(element, out)?;
                }
            }
            ValueRef::Map(map) => {
                Self::write_len(map.len(), out);
                for (key, value) in map.iter() {
                    Self::write_len(key.len(), out);
                    out.push_str(key);
                    self.write_value(value, out)?;
                }
            }
            ValueRef::Composite(object) => {
                let schema = object.composite_schema();
                schema.save(object.as_any(), self, out)?;
            }
        }
        Ok(())
    }

    fn read_number(kind: NumberKind, input: &mut InStream) -> Result<Number, ReadError> {
        let remaining = input.len();
        let bytes = input.take(kind.size())?;
        Number::from_ne_bytes(kind, bytes).ok_or(ReadError::UnexpectedEof {
            needed: kind.size(),
            remaining,
        })
    }

    fn read_len(input: &mut InStream) -> Result<usize, ReadError> {
        let remaining = input.len();
        match Self::read_number(NumberKind::Usize, input)? {
            Number::Usize(len) => Ok(len),
            _ => Err(ReadError::UnexpectedEof {
                needed: NumberKind::Usize.size(),
                remaining,
            }),
        }
    }

    /// Rejects a list length the input cannot hold, given the bytes taken by
    /// the first element.
    ///
    /// An element type encodes either to zero bytes always or to at least one
    /// byte always. Zero-sized elements are capped at [`MAX_EMPTY_ELEMENTS`].
    fn check_list_len(len: usize, first: usize, remaining: usize) -> Result<(), ReadError> {
        let fits = match first {
            0 => len <= MAX_EMPTY_ELEMENTS,
            first => len - 1 <= remaining - first,
        };
        if fits {
            Ok(())
        } else {
            Err(ReadError::LengthOutOfRange { len, remaining })
        }
    }

    fn read_flag(input: &mut InStream) -> Result<bool, ReadError> {
        match input.take(1)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [flag, ..] => Err(ReadError::InvalidFlag { flag: *flag }),
            [] => Err(ReadError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            }),
        }
    }

    fn read_string(input: &mut InStream) -> Result<String, ReadError> {
        let len = Self::read_len(input)?;
        let bytes = input.take(len)?;
        core::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|_| ReadError::InvalidUtf8)
    }

    fn read_value(&mut self, value: &mut dyn Value, input: &mut InStream) -> Result<(), ReadError> {
        match value.value_mut() {
            ValueMut::Bool(target) => *target = Self::read_flag(input)?,
            ValueMut::Number(mut target) => {
                target.set(Self::read_number(target.kind(), input)?);
            }
            ValueMut::String(target) => *target = Self::read_string(input)?,
            ValueMut::Enum(target) => {
                let repr = Self::read_number(target.repr_kind(), input)?;
                if !target.set_repr(repr) {
                    return Err(ReadError::InvalidEnum {
                        type_name: target.type_name(),
                        repr: repr.to_string(),
                    });
                }
            }
            ValueMut::Nullable(target) => {
                if Self::read_flag(input)? {
                    self.read_value(target.insert_default(), input)?;
                } else {
                    target.set_none();
                }
            }
            ValueMut::Array(target) => {
                for index in 0..target.len() {
                    if let Some(slot) = target.get_mut(index) {
                        self.read_value(slot, input)?;
                    }
                }
            }
            ValueMut::List(target) => {
                let len = Self::read_len(input)?;
                target.clear();
                let remaining = input.len();
                for index in 0..len {
                    self.read_value(target.push_default(), input)?;
                    if index == 0 {
                        Self::check_list_len(len, remaining - input.len(), remaining)?;
                    }
                }
            }
            ValueMut::Map(target) => {
                let len = Self::read_len(input)?;
                // Every entry carries at least its key length.
                if len > input.len() {
                    return Err(ReadError::LengthOutOfRange {
                        len,
                        remaining: input.len(),
                    });
                }
                target.clear();
                for _ in 0..len {
                    let key = Self::read_string(input)?;
                    self.read_value(target.insert_default(key), input)?;
                }
            }
            ValueMut::Composite(target) => {
                let schema = target.composite_schema();
                schema.load(target.as_any_mut(), self, input)?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Writer

impl FormatWriter for BinaryFormatter {
    const REQUIRES_NAMES: bool = false;

    #[inline]
    fn prepare_write(&mut self, _: &mut OutStream) -> Result<(), WriteError> {
        Ok(())
    }

    #[inline]
    fn post_write(&mut self, _: &mut OutStream) -> Result<(), WriteError> {
        Ok(())
    }

    #[inline]
    fn write_inherited_object_separator(&mut self, _: &mut OutStream) -> Result<(), WriteError> {
        Ok(())
    }

    #[inline]
    fn write_member(
        &mut self,
        value: &dyn Value,
        _: Option<&'static str>,
        _: bool,
        out: &mut OutStream,
    ) -> Result<(), WriteError> {
        self.write_value(value, out)
    }
}

// -----------------------------------------------------------------------------
// Reader

impl FormatReader for BinaryFormatter {
    const REQUIRES_NAMES: bool = false;

    #[inline]
    fn prepare_read(&mut self, _: &mut InStream) -> Result<(), ReadError> {
        Ok(())
    }

    #[inline]
    fn read_member(
        &mut self,
        value: &mut dyn Value,
        _: Option<&'static str>,
        input: &mut InStream,
    ) -> Result<(), ReadError> {
        self.read_value(value, input)
    }

    #[inline]
    fn finish_read(&mut self, _: &mut InStream) -> Result<(), ReadError> {
        Ok(())
    }

    fn finish_stream(&mut self, input: &mut InStream) -> Result<(), ReadError> {
        match input.len() {
            0 => Ok(()),
            count => Err(ReadError::TrailingBytes { count }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::BinaryFormatter;
    use crate::derive::Schema;
    use crate::format::ReadError;
    use crate::stream::InStream;
    use crate::{deserialize_with, serialize_with};

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Pair {
        a: u16,
        b: bool,
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    #[schema(nameless)]
    struct Record {
        label: String,
        pairs: Vec<Pair>,
        next: Option<Box<Pair>>,
    }

    #[test]
    fn layout_is_positional() {
        let out = serialize_with(&Pair { a: 0x0102, b: true }, &mut BinaryFormatter).unwrap();
        let mut expected = Vec::from(0x0102_u16.to_ne_bytes());
        expected.push(1);
        assert_eq!(out.as_bytes(), expected);
    }

    #[test]
    fn nameless_round_trip() {
        let value = Record {
            label: String::from("r"),
            pairs: vec![Pair { a: 1, b: false }, Pair { a: 2, b: true }],
            next: Some(Box::new(Pair { a: 3, b: true })),
        };
        let out = serialize_with(&value, &mut BinaryFormatter).unwrap();
        let back: Record = deserialize_with(&out.into_in_stream(), &mut BinaryFormatter).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn truncated_input_fails() {
        let input = InStream::from(&[1_u8][..]);
        assert_eq!(
            deserialize_with::<Pair, _>(&input, &mut BinaryFormatter).unwrap_err(),
            ReadError::UnexpectedEof {
                needed: 2,
                remaining: 1
            }
        );
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Empty {}

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Holder {
        items: Vec<Empty>,
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Table {
        rows: BTreeMap<String, u8>,
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Bytes {
        data: Vec<u8>,
    }

    #[test]
    fn oversized_length_prefix_fails() {
        let input = InStream::from(Vec::from(usize::MAX.to_ne_bytes()));
        assert_eq!(
            deserialize_with::<Holder, _>(&input, &mut BinaryFormatter).unwrap_err(),
            ReadError::LengthOutOfRange {
                len: usize::MAX,
                remaining: 0
            }
        );
        assert_eq!(
            deserialize_with::<Table, _>(&input, &mut BinaryFormatter).unwrap_err(),
            ReadError::LengthOutOfRange {
                len: usize::MAX,
                remaining: 0
            }
        );

        let mut bytes = Vec::from(1000_usize.to_ne_bytes());
        bytes.extend([1, 2, 3]);
        assert_eq!(
            deserialize_with::<Bytes, _>(&InStream::from(bytes), &mut BinaryFormatter).unwrap_err(),
            ReadError::LengthOutOfRange {
                len: 1000,
                remaining: 3
            }
        );
    }

    #[test]
    fn empty_elements_within_bound_read() {
        let value = Holder {
            items: (0..3).map(|_| Empty {}).collect(),
        };
        let out = serialize_with(&value, &mut BinaryFormatter).unwrap();
        assert_eq!(out.len(), size_of::<usize>());
        let back: Holder = deserialize_with(&out.into_in_stream(), &mut BinaryFormatter).unwrap();
        assert_eq!(back, value);

        let input = InStream::from(Vec::from((super::MAX_EMPTY_ELEMENTS + 1).to_ne_bytes()));
        assert!(matches!(
            deserialize_with::<Holder, _>(&input, &mut BinaryFormatter),
            Err(ReadError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn invalid_flag_and_trailing_bytes() {
        let mut bytes = Vec::from(7_u16.to_ne_bytes());
        bytes.push(2);
        assert_eq!(
            deserialize_with::<Pair, _>(&InStream::from(bytes.clone()), &mut BinaryFormatter)
                .unwrap_err(),
            ReadError::InvalidFlag { flag: 2 }
        );

        bytes[2] = 0;
        bytes.push(9);
        assert_eq!(
            deserialize_with::<Pair, _>(&InStream::from(bytes), &mut BinaryFormatter).unwrap_err(),
            ReadError::TrailingBytes { count: 1 }
        );
    }
}
