//! The value model every formatter dispatches on.
//!
//! ## Menu
//!
//! - [`Value`]: Object-safe access to a serializable value.
//! - [`Serializable`]: [`Value`] + [`Default`], with a compile-time [`Classification`].
//! - [`ValueRef`] / [`ValueMut`]: Tagged views that formatters branch on.
//! - [`Number`] / [`NumberKind`] / [`NumberMut`]: Arithmetic scalars.
//! - [`List`], [`Array`], [`Map`], [`Nullable`], [`Enumeration`]: Container access.
//!
//! A type is *atomic* if a formatter can encode it without consulting a schema,
//! and *composite* if it is [`Registered`](crate::Registered). Every field of a
//! registered type must be [`Serializable`]; a field whose type is neither
//! atomic nor registered does not compile.

// -----------------------------------------------------------------------------
// Modules

mod number;
mod ops;

// -----------------------------------------------------------------------------
// Exports

pub use number::{Number, NumberKind, NumberMut};
pub use ops::{Array, Enumeration, List, Map, Nullable};

use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::schema::Composite;

// -----------------------------------------------------------------------------
// Classification

/// Whether a type is directly encodable or described by a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Encoded directly by the formatter.
    Atomic,
    /// Encoded by walking a registered [`Schema`](crate::Schema).
    Composite,
}

impl Classification {
    /// Returns `true` for [`Classification::Atomic`].
    #[inline]
    pub const fn is_atomic(self) -> bool {
        matches!(self, Self::Atomic)
    }

    /// Returns `true` for [`Classification::Composite`].
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Composite)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => f.write_str("atomic"),
            Self::Composite => f.write_str("composite"),
        }
    }
}

// -----------------------------------------------------------------------------
// Value

/// Object-safe access to a value that a formatter can encode or decode.
///
/// Atomic implementations live in [`impls`](crate::impls). Registered types
/// get theirs from [`#[derive(Schema)]`](crate::derive::Schema) or
/// [`impl_composite_value!`](crate::impl_composite_value).
///
/// # Examples
///
/// ```
/// use vc_schema::value::{Number, Value, ValueRef};
///
/// let value: &dyn Value = &12_u8;
/// assert!(matches!(value.value_ref(), ValueRef::Number(Number::U8(12))));
/// ```
pub trait Value: Any {
    /// Returns a read-only tagged view of the value.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Returns a mutable tagged view of the value.
    fn value_mut(&mut self) -> ValueMut<'_>;

    /// Returns the full type path, as given by [`core::any::type_name`].
    fn type_name(&self) -> &'static str;

    /// Casts to [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Casts to mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Casts a boxed value to a boxed [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl fmt::Debug for dyn Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Value<{}>", self.type_name())
    }
}

// -----------------------------------------------------------------------------
// Serializable

/// A [`Value`] that can be default-constructed and classified at compile time.
///
/// The traversal engine default-constructs values before populating them from
/// a stream (list elements, map values, present optionals), hence [`Default`].
pub trait Serializable: Value + Default {
    /// How formatters treat this type.
    const CLASSIFICATION: Classification;
}

/// Returns `true` if `T` is encoded directly by formatters.
///
/// # Examples
///
/// ```
/// use vc_schema::value::is_builtin_type;
///
/// assert!(is_builtin_type::<Vec<Option<String>>>());
/// ```
#[inline]
pub const fn is_builtin_type<T: Serializable>() -> bool {
    T::CLASSIFICATION.is_atomic()
}

/// Returns `true` if `T` is encoded through its registered schema.
#[inline]
pub const fn is_registered_type<T: Serializable>() -> bool {
    T::CLASSIFICATION.is_composite()
}

// -----------------------------------------------------------------------------
// ValueRef

/// A read-only view of a [`Value`], tagged by how it is encoded.
pub enum ValueRef<'a> {
    /// `bool`.
    Bool(bool),
    /// Any arithmetic type.
    Number(Number),
    /// `String`.
    String(&'a str),
    /// A field-less enum, encoded as its underlying integer.
    Enum(&'a dyn Enumeration),
    /// An optional value (`Option<T>`).
    Nullable(&'a dyn Nullable),
    /// A fixed-size array (`[T; N]`).
    Array(&'a dyn Array),
    /// A growable sequence (`Vec<T>`).
    List(&'a dyn List),
    /// A string-keyed map.
    Map(&'a dyn Map),
    /// A registered type.
    Composite(&'a dyn Composite),
}

impl ValueRef<'_> {
    /// Returns the classification of the viewed value.
    #[inline]
    pub fn classification(&self) -> Classification {
        match self {
            Self::Composite(_) => Classification::Composite,
            _ => Classification::Atomic,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable view of a [`Value`], tagged by how it is decoded.
pub enum ValueMut<'a> {
    /// `bool`.
    Bool(&'a mut bool),
    /// Any arithmetic type.
    Number(NumberMut<'a>),
    /// `String`.
    String(&'a mut String),
    /// A field-less enum, decoded from its underlying integer.
    Enum(&'a mut dyn Enumeration),
    /// An optional value (`Option<T>`).
    Nullable(&'a mut dyn Nullable),
    /// A fixed-size array (`[T; N]`).
    Array(&'a mut dyn Array),
    /// A growable sequence (`Vec<T>`).
    List(&'a mut dyn List),
    /// A string-keyed map.
    Map(&'a mut dyn Map),
    /// A registered type.
    Composite(&'a mut dyn Composite),
}

impl ValueMut<'_> {
    /// Returns the classification of the viewed value.
    #[inline]
    pub fn classification(&self) -> Classification {
        match self {
            Self::Composite(_) => Classification::Composite,
            _ => Classification::Atomic,
        }
    }
}
