//! The contract between the traversal engine and a wire format.
//!
//! [`Schema::save`](crate::Schema::save) and [`Schema::load`](crate::Schema::load)
//! walk an object's parents and fields and hand every member to a formatter.
//! The formatter owns the encoding of atomic values and decides how to frame
//! objects and separate members. Composite members are encoded by recursing
//! into their own schema, which the formatter does through
//! [`Composite::composite_schema`](crate::Composite::composite_schema).
//!
//! Two formatters ship with the crate:
//!
//! - [`JsonFormatter`](crate::json::JsonFormatter): named, order independent on read.
//! - [`BinaryFormatter`](crate::binary::BinaryFormatter): positional, name free.

// -----------------------------------------------------------------------------
// Modules

mod error;

// -----------------------------------------------------------------------------
// Exports

pub use error::{ReadError, WriteError};

pub(crate) use error::excerpt;

use crate::stream::{InStream, OutStream};
use crate::value::Value;

// -----------------------------------------------------------------------------
// FormatWriter

/// The encoding half of a wire format.
///
/// Hooks are called in this order for every object:
///
/// 1. [`prepare_write`](FormatWriter::prepare_write)
/// 2. [`write_member`](FormatWriter::write_member) for each parent member and
///    own field, with [`write_inherited_object_separator`](FormatWriter::write_inherited_object_separator)
///    between a parent's members and whatever follows them
/// 3. [`post_write`](FormatWriter::post_write)
///
/// `is_last` is `true` for the final member of the whole chain, so separators
/// never need look-ahead.
pub trait FormatWriter {
    /// Whether members must carry names. Nameless schemas are rejected if set.
    const REQUIRES_NAMES: bool;

    /// Resets per-call state. Called once before each top-level object.
    fn reset(&mut self) {}

    /// Opens an object.
    fn prepare_write(&mut self, out: &mut OutStream) -> Result<(), WriteError>;

    /// Closes an object.
    fn post_write(&mut self, out: &mut OutStream) -> Result<(), WriteError>;

    /// Separates a parent's members from the members that follow them.
    fn write_inherited_object_separator(&mut self, out: &mut OutStream) -> Result<(), WriteError>;

    /// Writes one member.
    fn write_member(
        &mut self,
        value: &dyn Value,
        name: Option<&'static str>,
        is_last: bool,
        out: &mut OutStream,
    ) -> Result<(), WriteError>;
}

// -----------------------------------------------------------------------------
// FormatReader

/// The decoding half of a wire format.
///
/// Mirrors [`FormatWriter`]: [`prepare_read`](FormatReader::prepare_read),
/// then [`read_member`](FormatReader::read_member) for each parent member and
/// own field in declared order, then [`finish_read`](FormatReader::finish_read).
/// [`finish_stream`](FormatReader::finish_stream) runs once after the top-level
/// object.
pub trait FormatReader {
    /// Whether members must carry names. Nameless schemas are rejected if set.
    const REQUIRES_NAMES: bool;

    /// Resets per-call state. Called once before each top-level object.
    fn reset(&mut self) {}

    /// Prepares `input` for reading the members of one object.
    fn prepare_read(&mut self, input: &mut InStream) -> Result<(), ReadError>;

    /// Reads one member into `value`.
    fn read_member(
        &mut self,
        value: &mut dyn Value,
        name: Option<&'static str>,
        input: &mut InStream,
    ) -> Result<(), ReadError>;

    /// Checks what is left of one object after all members were read.
    fn finish_read(&mut self, input: &mut InStream) -> Result<(), ReadError>;

    /// Checks what is left of the stream after the top-level object.
    fn finish_stream(&mut self, input: &mut InStream) -> Result<(), ReadError> {
        let _ = input;
        Ok(())
    }
}
