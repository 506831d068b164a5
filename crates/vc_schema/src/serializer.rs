use alloc::borrow::Cow;
use alloc::string::String;

use crate::format::{FormatReader, FormatWriter, ReadError, WriteError};
use crate::json::JsonFormatter;
use crate::schema::Registered;
use crate::stream::{InStream, OutStream};

// -----------------------------------------------------------------------------
// Serialize

/// Serializes `value` to compact JSON.
///
/// # Examples
///
/// ```
/// use vc_schema::derive::Schema;
///
/// #[derive(Schema, Default)]
/// struct BaseObject {
///     data: f64,
///     integer: i32,
/// }
///
/// let text = vc_schema::serialize(&BaseObject { data: 0.35, integer: 12 }).unwrap();
/// assert_eq!(text, r#"{"data":0.35,"integer":12}"#);
/// ```
pub fn serialize<T: Registered>(value: &T) -> Result<String, WriteError> {
    serialize_json(value, &mut JsonFormatter::compact())
}

/// Serializes `value` to JSON with every member on its own line, indented by
/// `indent` per level.
pub fn serialize_pretty<T: Registered>(
    value: &T,
    indent: impl Into<Cow<'static, str>>,
) -> Result<String, WriteError> {
    serialize_json(value, &mut JsonFormatter::pretty(indent))
}

fn serialize_json<T: Registered>(value: &T, formatter: &mut JsonFormatter) -> Result<String, WriteError> {
    serialize_with(value, formatter)?
        .into_string()
        .map_err(|_| WriteError::NonUtf8Output)
}

/// Serializes `value` with any formatter into a new stream.
pub fn serialize_with<T, F>(value: &T, formatter: &mut F) -> Result<OutStream, WriteError>
where
    T: Registered,
    F: FormatWriter,
{
    let mut out = OutStream::new();
    serialize_into(value, formatter, &mut out)?;
    Ok(out)
}

/// Serializes `value` with any formatter, appending to `out`.
pub fn serialize_into<T, F>(value: &T, formatter: &mut F, out: &mut OutStream) -> Result<(), WriteError>
where
    T: Registered,
    F: FormatWriter,
{
    formatter.reset();
    T::schema().save(value, formatter, out)
}

// -----------------------------------------------------------------------------
// Deserialize

/// Deserializes a fresh `T` from JSON.
///
/// Members absent from `text` keep their [`Default`] value.
pub fn deserialize<T: Registered>(text: &str) -> Result<T, ReadError> {
    deserialize_with(&InStream::from(text), &mut JsonFormatter::compact())
}

/// Deserializes a fresh `T` with any formatter.
///
/// `input` is never modified; reading works on a copy.
pub fn deserialize_with<T, F>(input: &InStream, formatter: &mut F) -> Result<T, ReadError>
where
    T: Registered,
    F: FormatReader,
{
    let mut value = T::default();
    read_object(&mut value, input, formatter)?;
    Ok(value)
}

/// Deserializes JSON into an existing `target`.
///
/// Members absent from `text` keep their current value. On failure `target`
/// is left exactly as it was.
pub fn deserialize_into<T>(target: &mut T, text: &str) -> Result<(), ReadError>
where
    T: Registered + Clone,
{
    deserialize_into_with(target, &InStream::from(text), &mut JsonFormatter::compact())
}

/// Deserializes into an existing `target` with any formatter.
///
/// Reads into a copy of `target` and commits it only on success.
pub fn deserialize_into_with<T, F>(target: &mut T, input: &InStream, formatter: &mut F) -> Result<(), ReadError>
where
    T: Registered + Clone,
    F: FormatReader,
{
    let mut value = target.clone();
    read_object(&mut value, input, formatter)?;
    *target = value;
    Ok(())
}

fn read_object<T, F>(value: &mut T, input: &InStream, formatter: &mut F) -> Result<(), ReadError>
where
    T: Registered,
    F: FormatReader,
{
    let mut input = input.clone();
    formatter.reset();
    T::schema().load(value, formatter, &mut input)?;
    formatter.finish_stream(&mut input)
}
