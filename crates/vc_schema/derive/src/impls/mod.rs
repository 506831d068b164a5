// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod common;
mod enumeration;
mod struct_schema;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use common::{bounded_generics, impl_value};

pub(crate) use enumeration::impl_enumeration;
pub(crate) use struct_schema::impl_struct_schema;
