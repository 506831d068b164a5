#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_schema as schema;

pub use vc_schema::{deserialize, deserialize_into, serialize, serialize_pretty};
