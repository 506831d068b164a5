//! The JSON wire format.
//!
//! Objects are written as `{"name":value,...}` with members in schema order,
//! parents first. Strings are wrapped in quotes without escaping, enums are
//! written as their underlying integer, absent optionals as `null`, sequences
//! as `[...]` and maps as `{"key":value,...}`.
//!
//! Reading is independent of member order. The reader strips whitespace
//! outside string literals, then for every schema member looks up its
//! `"name":` key among the top-level members of the object, cuts the member
//! out of the text and parses the value by the member's type. A member that
//! is absent leaves the target unchanged; text left over once every schema
//! member was read is an error.
//!
//! Nested optionals share a single `null`: `Some(None)` of an
//! `Option<Option<T>>` is written as `null` and reads back as `None`. The
//! binary format keeps one presence byte per level and preserves it.
//!
//! ```
//! use vc_schema::derive::Schema;
//! use vc_schema::json::JsonFormatter;
//!
//! #[derive(Schema, Default, Debug, PartialEq)]
//! struct BaseObject {
//!     data: f64,
//!     integer: i32,
//! }
//!
//! let value = BaseObject { data: 10.5, integer: -15 };
//! let pretty = vc_schema::serialize_with(&value, &mut JsonFormatter::pretty("\t")).unwrap();
//! assert_eq!(pretty.into_string().unwrap(), "{\n\t\"data\": 10.5,\n\t\"integer\": -15\n}");
//!
//! let back: BaseObject = vc_schema::deserialize(r#"{ "integer": -15, "data": 10.5 }"#).unwrap();
//! assert_eq!(back, value);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod scan;

use alloc::borrow::Cow;
use alloc::string::ToString;
use alloc::vec::Vec;

use log::trace;

use crate::format::{FormatReader, FormatWriter, ReadError, WriteError, excerpt};
use crate::stream::{InStream, OutStream};
use crate::value::{Number, Value, ValueMut, ValueRef};

use scan::{Members, find_member, split_elements, strip_braces, strip_brackets, strip_quotes};

// -----------------------------------------------------------------------------
// JsonFormatter

/// Reads and writes JSON.
///
/// The writer keeps indentation state, so one instance must not be shared by
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    indent: Option<Cow<'static, str>>,
    depth: usize,
    // One entry per open object: whether a member was written yet.
    open: Vec<bool>,
}

impl JsonFormatter {
    /// Writes without any whitespace.
    #[inline]
    pub const fn compact() -> Self {
        Self {
            indent: None,
            depth: 0,
            open: Vec::new(),
        }
    }

    /// Writes every member on its own line, indented by `indent` per level.
    pub fn pretty(indent: impl Into<Cow<'static, str>>) -> Self {
        Self {
            indent: Some(indent.into()),
            ..Self::compact()
        }
    }

    /// Returns `true` if the formatter pretty-prints.
    #[inline]
    pub fn is_pretty(&self) -> bool {
        self.indent.is_some()
    }

    fn newline(&self, out: &mut OutStream) {
        if let Some(indent) = &self.indent {
            out.push(b'\n');
            for _ in 0..self.depth {
                out.push_str(indent);
            }
        }
    }

    fn open_object(&mut self, out: &mut OutStream) {
        out.push(b'{');
        self.depth += 1;
        self.open.push(false);
    }

    fn close_object(&mut self, out: &mut OutStream) {
        self.depth = self.depth.saturating_sub(1);
        if self.open.pop() == Some(true) {
            self.newline(out);
        }
        out.push(b'}');
    }

    fn write_key(&mut self, key: &str, out: &mut OutStream) {
        if let Some(has_members) = self.open.last_mut() {
            *has_members = true;
        }
        self.newline(out);
        out.push(b'"');
        out.push_str(key);
        out.push_str("\":");
        if self.is_pretty() {
            out.push(b' ');
        }
    }

    fn write_value(&mut self, value: &dyn Value, out: &mut OutStream) -> Result<(), WriteError> {
        match value.value_ref() {
            ValueRef::Bool(value) => out.push_str(if value { "true" } else { "false" }),
            ValueRef::Number(number) => out.push_display(number),
            ValueRef::String(text) => {
                out.push(b'"');
                out.push_str(text);
                out.push(b'"');
            }
            ValueRef::Enum(value) => out.push_display(value.repr()),
            ValueRef::Nullable(value) => match value.get() {
                Some(inner) => self.write_value(inner, out)?,
                None => out.push_str("null"),
            },
            ValueRef::Array(array) => self.write_elements(array.iter(), out)?,
            ValueRef::List(list) => self.write_elements(list.iter(), out)?,
            ValueRef::Map(map) => {
                self.open_object(out);
                let len = map.len();
                for (index, (key, value)) in map.iter().enumerate() {
                    self.write_key(key, out);
                    self.write_value(value, out)?;
                    if index + 1 < len {
                        out.push(b',');
                    }
                }
                self.close_object(out);
            }
            ValueRef::Composite(object) => {
                let schema = object.composite_schema();
                schema.save(object.as_any(), self, out)?;
            }
        }
        Ok(())
    }

    fn write_elements<'a>(
        &mut self,
        elements: impl Iterator<Item = &'a dyn Value>,
        out: &mut OutStream,
    ) -> Result<(), WriteError> {
        out.push(b'[');
        for (index, element) in elements.enumerate() {
            if index > 0 {
                out.push(b',');
            }
            self.write_value(element, out)?;
        }
        out.push(b']');
        Ok(())
    }

    fn read_value(&mut self, value: &mut dyn Value, text: &str) -> Result<(), ReadError> {
        match value.value_mut() {
            ValueMut::Bool(target) => *target = text == "true",
            ValueMut::Number(mut target) => {
                target.set(Number::parse(target.kind(), text)?);
            }
            ValueMut::String(target) => *target = strip_quotes(text)?.to_string(),
            ValueMut::Enum(target) => {
                let repr = Number::parse(target.repr_kind(), text)?;
                if !target.set_repr(repr) {
                    return Err(ReadError::InvalidEnum {
                        type_name: target.type_name(),
                        repr: excerpt(text),
                    });
                }
            }
            ValueMut::Nullable(target) => {
                if text == "null" {
                    target.set_none();
                } else {
                    self.read_value(target.insert_default(), text)?;
                }
            }
            ValueMut::Array(target) => {
                let elements = split_elements(strip_brackets(text)?)?;
                if elements.len() != target.len() {
                    return Err(ReadError::LengthMismatch {
                        expected: target.len(),
                        found: elements.len(),
                    });
                }
                for (index, element) in elements.into_iter().enumerate() {
                    if let Some(slot) = target.get_mut(index) {
                        self.read_value(slot, element)?;
                    }
                }
            }
            ValueMut::List(target) => {
                let elements = split_elements(strip_brackets(text)?)?;
                target.clear();
                for element in elements {
                    self.read_value(target.push_default(), element)?;
                }
            }
            ValueMut::Map(target) => {
                let interior = strip_braces(text)?;
                target.clear();
                for span in Members::new(interior) {
                    let span = span?;
                    let slot = target.insert_default(interior[span.key].to_string());
                    self.read_value(slot, &interior[span.value])?;
                }
            }
            ValueMut::Composite(target) => {
                let schema = target.composite_schema();
                let mut input = InStream::from(text);
                schema.load(target.as_any_mut(), self, &mut input)?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Writer

impl FormatWriter for JsonFormatter {
    const REQUIRES_NAMES: bool = true;

    fn reset(&mut self) {
        self.depth = 0;
        self.open.clear();
    }

    #[inline]
    fn prepare_write(&mut self, out: &mut OutStream) -> Result<(), WriteError> {
        self.open_object(out);
        Ok(())
    }

    #[inline]
    fn post_write(&mut self, out: &mut OutStream) -> Result<(), WriteError> {
        self.close_object(out);
        Ok(())
    }

    #[inline]
    fn write_inherited_object_separator(&mut self, out: &mut OutStream) -> Result<(), WriteError> {
        out.push(b',');
        Ok(())
    }

    fn write_member(
        &mut self,
        value: &dyn Value,
        name: Option<&'static str>,
        is_last: bool,
        out: &mut OutStream,
    ) -> Result<(), WriteError> {
        let Some(name) = name else {
            return Err(WriteError::NamesRequired {
                type_name: value.type_name(),
            });
        };
        self.write_key(name, out);
        self.write_value(value, out)?;
        if !is_last {
            out.push(b',');
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Reader

impl FormatReader for JsonFormatter {
    const REQUIRES_NAMES: bool = true;

    fn prepare_read(&mut self, input: &mut InStream) -> Result<(), ReadError> {
        let text = scan::strip_whitespace(input.as_str()?)?;
        let interior = strip_braces(&text)?.to_string();
        input.replace(interior);
        Ok(())
    }

    fn read_member(
        &mut self,
        value: &mut dyn Value,
        name: Option<&'static str>,
        input: &mut InStream,
    ) -> Result<(), ReadError> {
        let Some(name) = name else {
            return Err(ReadError::NamesRequired {
                type_name: value.type_name(),
            });
        };

        let text = input.as_str()?;
        let Some(span) = find_member(text, name)? else {
            trace!("member `{name}` is absent, keeping the current value");
            return Ok(());
        };
        let value_text = text[span.value].to_string();
        input.erase(span.member);
        self.read_value(value, &value_text)
    }

    fn finish_read(&mut self, input: &mut InStream) -> Result<(), ReadError> {
        let rest = input.as_str()?.trim_matches(',');
        if !rest.is_empty() {
            return Err(ReadError::UnknownMembers {
                content: excerpt(rest),
            });
        }
        input.clear();
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::JsonFormatter;
    use crate::derive::{Enumeration, Schema};
    use crate::format::{ReadError, WriteError};
    use crate::{deserialize, deserialize_into, serialize, serialize_with};

    #[derive(Schema, Default, Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Enumeration, Default, Debug, Clone, Copy, PartialEq)]
    #[repr(u8)]
    enum Mode {
        #[default]
        Off = 0,
        On = 3,
    }

    #[derive(Schema, Default, Debug, Clone, PartialEq)]
    struct Shape {
        name: String,
        mode: Mode,
        points: Vec<Point>,
        tags: BTreeMap<String, bool>,
        anchor: Option<Point>,
    }

    #[derive(Schema, Default, Debug)]
    #[schema(nameless)]
    struct Anonymous {
        value: u8,
    }

    fn shape() -> Shape {
        Shape {
            name: String::from("tri"),
            mode: Mode::On,
            points: vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }],
            tags: BTreeMap::from([(String::from("closed"), true)]),
            anchor: None,
        }
    }

    #[test]
    fn compact_layout() {
        assert_eq!(
            serialize(&shape()).unwrap(),
            r#"{"name":"tri","mode":3,"points":[{"x":1,"y":2},{"x":-3,"y":4}],"tags":{"closed":true},"anchor":null}"#
        );
    }

    #[test]
    fn pretty_layout_indents_nested_objects() {
        let value = Shape {
            points: vec![Point { x: 1, y: 2 }],
            tags: BTreeMap::new(),
            ..shape()
        };
        let text = serialize_with(&value, &mut JsonFormatter::pretty("  "))
            .unwrap()
            .into_string()
            .unwrap();
        let expected = "{\n  \"name\": \"tri\",\n  \"mode\": 3,\n  \"points\": [{\n    \"x\": 1,\n    \"y\": 2\n  }],\n  \"tags\": {},\n  \"anchor\": null\n}";
        assert_eq!(text, expected);
        assert_eq!(deserialize::<Shape>(&text).unwrap(), value);
    }

    #[test]
    fn round_trip() {
        let value = Shape {
            anchor: Some(Point { x: 0, y: 9 }),
            ..shape()
        };
        let text = serialize(&value).unwrap();
        assert_eq!(deserialize::<Shape>(&text).unwrap(), value);
    }

    #[test]
    fn absent_members_keep_current_values() {
        let mut value = shape();
        deserialize_into(&mut value, r#"{"name":"quad"}"#).unwrap();
        assert_eq!(value.name, "quad");
        assert_eq!(value.points, shape().points);
    }

    #[test]
    fn unknown_members_are_rejected() {
        let err = deserialize::<Point>(r#"{"x":1,"y":2,"z":3}"#).unwrap_err();
        assert_eq!(
            err,
            ReadError::UnknownMembers {
                content: String::from(r#""z":3"#)
            }
        );
    }

    #[test]
    fn failed_read_leaves_target_untouched() {
        let mut value = shape();
        let err = deserialize_into(&mut value, r#"{"name":"quad","mode":7}"#).unwrap_err();
        assert!(matches!(err, ReadError::InvalidEnum { .. }));
        assert_eq!(value, shape());
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            deserialize::<Point>(r#""x":1"#),
            Err(ReadError::MissingBraces { .. })
        ));
        assert!(matches!(
            deserialize::<Shape>(r#"{"points":{"x":1}}"#),
            Err(ReadError::MissingBrackets { .. })
        ));
        assert!(matches!(
            deserialize::<Shape>(r#"{"name":tri}"#),
            Err(ReadError::MissingQuotes { .. })
        ));
        assert!(matches!(
            deserialize::<Point>(r#"{"x":1.5}"#),
            Err(ReadError::Lexical(_))
        ));
    }

    #[test]
    fn nameless_schema_is_rejected() {
        assert_eq!(
            serialize(&Anonymous { value: 1 }).unwrap_err(),
            WriteError::NamesRequired {
                type_name: core::any::type_name::<Anonymous>()
            }
        );
        assert!(matches!(
            deserialize::<Anonymous>("{}"),
            Err(ReadError::NamesRequired { .. })
        ));
    }

    #[test]
    fn nested_optionals_collapse_to_null() {
        use crate::binary::BinaryFormatter;
        use crate::deserialize_with;

        #[derive(Schema, Default, Debug, PartialEq)]
        struct Layered {
            inner: Option<Option<i32>>,
        }

        let value = Layered { inner: Some(None) };
        let text = serialize(&value).unwrap();
        assert_eq!(text, r#"{"inner":null}"#);
        assert_eq!(deserialize::<Layered>(&text).unwrap(), Layered { inner: None });

        let text = serialize(&Layered { inner: Some(Some(5)) }).unwrap();
        assert_eq!(text, r#"{"inner":5}"#);
        assert_eq!(deserialize::<Layered>(&text).unwrap().inner, Some(Some(5)));

        let out = serialize_with(&value, &mut BinaryFormatter).unwrap();
        let back: Layered = deserialize_with(&out.into_in_stream(), &mut BinaryFormatter).unwrap();
        assert_eq!(back, value);
    }
}
