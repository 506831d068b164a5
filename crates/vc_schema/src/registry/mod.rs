//! A process-wide table of schemas.
//!
//! ## Menu
//!
//! - [`SchemaRegistry`]: A `TypeId -> Schema` table with type path and short name indices.
//! - [`global`]: The registry assembled from every `#[schema(auto_register)]` type.
//!
//! Schemas themselves do not need a registry: [`Registered::schema`] builds
//! and caches them on first use. The registry exists to find a schema when
//! only the *name* of a type is known, e.g. when the concrete type of a
//! stored object is chosen at runtime.
//!
//! ## auto_register
//!
//! See [`SchemaRegistry::auto_register`].
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! If it is not supported, [`SchemaRegistry::auto_register`] returns `false`
//! and the global registry stays empty.
//!
//! [`Registered::schema`]: crate::Registered::schema
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod schema_registry;

// -----------------------------------------------------------------------------
// Exports

pub use schema_registry::{SchemaRegistry, global};
