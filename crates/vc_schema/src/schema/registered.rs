use core::fmt;

use crate::schema::Schema;
use crate::value::{Serializable, Value};

// -----------------------------------------------------------------------------
// Registered

/// A type with a registered [`Schema`].
///
/// Implemented by [`#[derive(Schema)]`](crate::derive::Schema). A manual
/// implementation stores its schema in a [`SchemaCell`] or
/// [`GenericSchemaCell`] and gets its [`Value`] impl from
/// [`impl_composite_value!`](crate::impl_composite_value) or
/// `#[derive(Schema)]` with `#[schema(manual)]`.
///
/// [`SchemaCell`]: crate::schema::SchemaCell
/// [`GenericSchemaCell`]: crate::schema::GenericSchemaCell
pub trait Registered: Serializable {
    /// Returns the schema of `Self`, building it on first access.
    fn schema() -> &'static Schema;
}

// -----------------------------------------------------------------------------
// Composite

/// Object-safe access to the schema of a registered value.
///
/// Auto impl for all types that implement [`Registered`].
pub trait Composite: Value {
    /// Returns the schema of the concrete type.
    fn composite_schema(&self) -> &'static Schema;
}

impl fmt::Debug for dyn Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Composite<{}>", self.type_name())
    }
}

impl<T: Registered> Composite for T {
    #[inline]
    fn composite_schema(&self) -> &'static Schema {
        <T as Registered>::schema()
    }
}

// -----------------------------------------------------------------------------
// impl_composite_value

/// Implements [`Value`] and [`Serializable`] for a non-generic registered type.
///
/// The type must implement [`Default`] and [`Registered`].
///
/// [`Serializable`]: crate::Serializable
#[macro_export]
macro_rules! impl_composite_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Value for $ty {
                #[inline]
                fn value_ref(&self) -> $crate::value::ValueRef<'_> {
                    $crate::value::ValueRef::Composite(self)
                }

                #[inline]
                fn value_mut(&mut self) -> $crate::value::ValueMut<'_> {
                    $crate::value::ValueMut::Composite(self)
                }

                #[inline]
                fn type_name(&self) -> &'static str {
                    ::core::any::type_name::<Self>()
                }

                #[inline]
                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                #[inline]
                fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                    self
                }

                #[inline]
                fn into_any(
                    self: $crate::__macro_exports::Box<Self>,
                ) -> $crate::__macro_exports::Box<dyn ::core::any::Any> {
                    self
                }
            }

            impl $crate::Serializable for $ty {
                const CLASSIFICATION: $crate::Classification = $crate::Classification::Composite;
            }
        )+
    };
}
