#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macros emit `::vc_schema::...` paths. Inside this crate (unit tests
// and doc tests) that path must still resolve, so we alias the crate to itself.
extern crate self as vc_schema;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod serializer;

pub mod binary;
pub mod format;
pub mod impls;
pub mod json;
pub mod lexical;
pub mod registry;
pub mod schema;
pub mod stream;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use vc_schema_derive as derive;

pub use schema::{Composite, Registered, Schema};
pub use serializer::{deserialize, deserialize_into, deserialize_into_with, deserialize_with};
pub use serializer::{serialize, serialize_into, serialize_pretty, serialize_with};
pub use value::{Classification, Serializable, Value};
