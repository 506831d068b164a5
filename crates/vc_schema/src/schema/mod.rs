//! Schemas and the traversal engine.
//!
//! A [`Schema`] describes one registered type: an ordered list of parents,
//! then an ordered list of fields, optionally named. It is built once through
//! [`Schema::builder`] (or [`#[derive(Schema)]`](crate::derive::Schema)) and
//! lives for the rest of the process.
//!
//! [`Schema::save`] and [`Schema::load`] walk the parents first, then the own
//! fields, and hand every member to a [`FormatWriter`] or [`FormatReader`].
//! Members of parents are written flat into the same object as the fields of
//! the derived type, so the encoding of a derived type always starts with the
//! encoding of its base.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod builder;
mod cell;
mod error;
mod registered;

// -----------------------------------------------------------------------------
// Exports

pub use builder::SchemaBuilder;
pub use cell::{GenericSchemaCell, SchemaCell};
pub use error::SchemaError;
pub use registered::{Composite, Registered};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::format::{FormatReader, FormatWriter, ReadError, WriteError};
use crate::stream::{InStream, OutStream};
use crate::value::{Classification, Value};

use accessor::ErasedAccessor;

// -----------------------------------------------------------------------------
// FieldInfo

/// One field of a [`Schema`].
pub struct FieldInfo {
    name: Option<&'static str>,
    type_id: TypeId,
    type_name: &'static str,
    classification: Classification,
    accessor: Box<dyn ErasedAccessor>,
}

impl FieldInfo {
    /// The member name, if the schema is named.
    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// The [`TypeId`] of the field type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full path of the field type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the field is atomic or composite.
    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Reads the field of `object`, or `None` if `object` has another type.
    #[inline]
    pub fn get<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Value> {
        self.accessor.get(object)
    }

    /// Mutably accesses the field of `object`, or `None` if `object` has another type.
    #[inline]
    pub fn get_mut<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Value> {
        self.accessor.get_mut(object)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("classification", &self.classification)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ParentInfo

/// One parent of a [`Schema`].
pub struct ParentInfo {
    schema: &'static Schema,
    accessor: Box<dyn ErasedAccessor>,
}

impl ParentInfo {
    /// The schema of the parent type.
    #[inline]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    #[inline]
    fn get<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Any> {
        self.accessor.get(object).map(Value::as_any)
    }

    #[inline]
    fn get_mut<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.accessor.get_mut(object).map(Value::as_any_mut)
    }
}

impl fmt::Debug for ParentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentInfo")
            .field("type_name", &self.schema.type_name)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The registered, immutable description of a type's serializable shape.
pub struct Schema {
    ty: TypeId,
    type_name: &'static str,
    fields: Box<[FieldInfo]>,
    parents: Box<[ParentInfo]>,
    has_names: bool,
    member_count: usize,
    construct: fn() -> Box<dyn Composite>,
}

impl Schema {
    /// Starts describing the registered type `O`.
    #[inline]
    pub fn builder<O: Registered>() -> SchemaBuilder<O> {
        SchemaBuilder::new()
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty
    }

    /// The full path of the described type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The path of the described type without its module prefix.
    ///
    /// `my_crate::shapes::Circle` becomes `Circle`, `my_crate::Wrapper<u8>`
    /// becomes `Wrapper`.
    pub fn short_name(&self) -> &'static str {
        let path = self.type_name;
        let path = path.split_once('<').map_or(path, |(head, _)| head);
        path.rsplit_once("::").map_or(path, |(_, tail)| tail)
    }

    /// Own fields, in declared order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Parents, in declared order.
    #[inline]
    pub fn parents(&self) -> &[ParentInfo] {
        &self.parents
    }

    /// Returns the own field called `name`.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == Some(name))
    }

    /// Returns `true` if this schema and every parent schema carry member names.
    #[inline]
    pub fn has_names(&self) -> bool {
        self.has_names
    }

    /// Number of members written per object, parents included.
    #[inline]
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    /// Member names in wire order, parents first. Empty for nameless schemas.
    pub fn member_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.member_count);
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<&'static str>) {
        for parent in &self.parents {
            parent.schema.collect_names(names);
        }
        names.extend(self.fields.iter().filter_map(|f| f.name));
    }

    /// Creates a default-constructed instance of the described type.
    #[inline]
    pub fn construct(&self) -> Box<dyn Composite> {
        (self.construct)()
    }

    /// Writes `object` as one framed object.
    ///
    /// Fails if the format requires names and this schema is nameless, or if
    /// `object` is not of the described type.
    pub fn save<F: FormatWriter>(
        &self,
        object: &dyn Any,
        formatter: &mut F,
        out: &mut OutStream,
    ) -> Result<(), WriteError> {
        if F::REQUIRES_NAMES && !self.has_names {
            return Err(WriteError::NamesRequired {
                type_name: self.type_name,
            });
        }
        if (*object).type_id() != self.ty {
            return Err(WriteError::AccessorMismatch {
                type_name: self.type_name,
            });
        }
        formatter.prepare_write(out)?;
        self.save_members(object, formatter, out)?;
        formatter.post_write(out)
    }

    fn save_members<F: FormatWriter>(
        &self,
        object: &dyn Any,
        formatter: &mut F,
        out: &mut OutStream,
    ) -> Result<(), WriteError> {
        let mismatch = || WriteError::AccessorMismatch {
            type_name: self.type_name,
        };

        // Parents without members produce no output and need no separator.
        let mut pending = self.member_count;
        for parent in self.parents.iter().filter(|p| p.schema.member_count > 0) {
            let base = parent.get(object).ok_or_else(mismatch)?;
            parent.schema.save_members(base, formatter, out)?;
            pending -= parent.schema.member_count;
            if pending > 0 {
                formatter.write_inherited_object_separator(out)?;
            }
        }

        let len = self.fields.len();
        for (index, field) in self.fields.iter().enumerate() {
            let value = field.get(object).ok_or_else(mismatch)?;
            formatter.write_member(value, field.name, index + 1 == len, out)?;
        }
        Ok(())
    }

    /// Reads one framed object into `object`.
    ///
    /// Fails if the format requires names and this schema is nameless, if
    /// `object` is not of the described type, or if the input is malformed.
    /// On failure `object` may be partially updated.
    pub fn load<F: FormatReader>(
        &self,
        object: &mut dyn Any,
        formatter: &mut F,
        input: &mut InStream,
    ) -> Result<(), ReadError> {
        if F::REQUIRES_NAMES && !self.has_names {
            return Err(ReadError::NamesRequired {
                type_name: self.type_name,
            });
        }
        if (*object).type_id() != self.ty {
            return Err(ReadError::AccessorMismatch {
                type_name: self.type_name,
            });
        }
        formatter.prepare_read(input)?;
        self.load_members(object, formatter, input)?;
        formatter.finish_read(input)
    }

    fn load_members<F: FormatReader>(
        &self,
        object: &mut dyn Any,
        formatter: &mut F,
        input: &mut InStream,
    ) -> Result<(), ReadError> {
        let type_name = self.type_name;
        let mismatch = || ReadError::AccessorMismatch { type_name };

        for parent in &self.parents {
            let base = parent.get_mut(object).ok_or_else(mismatch)?;
            parent.schema.load_members(base, formatter, input)?;
        }

        for field in &self.fields {
            let value = field.get_mut(object).ok_or_else(mismatch)?;
            formatter.read_member(value, field.name, input)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("parents", &self.parents)
            .field("fields", &self.fields)
            .field("has_names", &self.has_names)
            .finish_non_exhaustive()
    }
}
