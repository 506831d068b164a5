//! Static storage for schemas.
//!
//! This is usually used to implement [`Registered`](crate::Registered).
//!
//! - [`SchemaCell`]: for non-generic types, a plain [`OnceLock`].
//! - [`GenericSchemaCell`]: for generic types. The `static CELL` inside a
//!   generic function is shared by every instantiation, so the cell keeps one
//!   schema per [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{TypeIdMap, new_map};
use crate::schema::Schema;

// -----------------------------------------------------------------------------
// SchemaCell

/// Static storage for the schema of a non-generic type.
///
/// See [`SchemaBuilder`](crate::schema::SchemaBuilder) for an example.
pub struct SchemaCell(OnceLock<Schema>);

impl SchemaCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored schema, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> Schema) -> &Schema {
        self.0.get_or_init(f)
    }
}

impl Default for SchemaCell {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericSchemaCell

/// Static storage for the schemas of a generic type, one per instantiation.
///
/// ```
/// use vc_schema::{Registered, Schema, Serializable};
/// use vc_schema::schema::GenericSchemaCell;
/// use vc_schema::derive::Schema;
///
/// #[derive(Schema, Default)]
/// #[schema(manual)]
/// struct Wrapper<T> {
///     inner: T,
/// }
///
/// impl<T: Serializable> Registered for Wrapper<T> {
///     fn schema() -> &'static Schema {
///         static CELL: GenericSchemaCell = GenericSchemaCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             Schema::builder::<Self>()
///                 .field(|w| &w.inner, |w| &mut w.inner)
///                 .names(["inner"])
///                 .build()
///         })
///     }
/// }
///
/// assert_eq!(vc_schema::serialize(&Wrapper { inner: 3_u8 }).unwrap(), r#"{"inner":3}"#);
/// assert_eq!(vc_schema::serialize(&Wrapper { inner: true }).unwrap(), r#"{"inner":true}"#);
/// ```
pub struct GenericSchemaCell(RwLock<TypeIdMap<&'static Schema>>);

impl GenericSchemaCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(new_map()))
    }

    /// Returns the schema stored for `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> Schema) -> &'static Schema {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> Schema) -> &'static Schema {
        if let Some(schema) = self.get_by_type_id(type_id) {
            return schema;
        }
        // Build outside the lock: the schema may request the schemas of its
        // parents, which can live in this very cell.
        let schema = f();
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(schema)))
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static Schema> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }
}

impl Default for GenericSchemaCell {
    fn default() -> Self {
        Self::new()
    }
}
