use alloc::boxed::Box;
use alloc::string::String;

use crate::value::{Number, NumberKind, Value};

// -----------------------------------------------------------------------------
// List

/// A growable sequence, e.g. `Vec<T>`.
pub trait List: Value {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Value>;

    /// Returns the element at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value>;

    /// Removes all elements.
    fn clear(&mut self);

    /// Appends a default-constructed element and returns it.
    fn push_default(&mut self) -> &mut dyn Value;

    /// Iterates the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>;
}

// -----------------------------------------------------------------------------
// Array

/// A fixed-size array, e.g. `[T; N]`.
pub trait Array: Value {
    /// Returns the (fixed) number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Value>;

    /// Returns the element at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value>;

    /// Iterates the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>;
}

// -----------------------------------------------------------------------------
// Map

/// A map with string keys, e.g. `BTreeMap<String, V>`.
pub trait Map: Value {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<&dyn Value>;

    /// Removes all entries.
    fn clear(&mut self);

    /// Returns the value stored under `key`, inserting a default one first if absent.
    fn insert_default(&mut self, key: String) -> &mut dyn Value;

    /// Iterates the entries, in key order for ordered maps.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Value)> + '_>;
}

// -----------------------------------------------------------------------------
// Nullable

/// A value that may be absent, e.g. `Option<T>` or `Option<Box<T>>`.
///
/// Formats with a single absence marker, such as JSON `null`, cannot tell
/// the levels of a nested nullable apart: `Some(None)` reads back as `None`.
pub trait Nullable: Value {
    /// Returns the contained value, if present.
    fn get(&self) -> Option<&dyn Value>;

    /// Makes the value absent.
    fn set_none(&mut self);

    /// Replaces the value with a freshly default-constructed one and returns it.
    ///
    /// A previous value is dropped, never reused.
    fn insert_default(&mut self) -> &mut dyn Value;

    /// Returns `true` if a value is present.
    #[inline]
    fn is_some(&self) -> bool {
        self.get().is_some()
    }
}

// -----------------------------------------------------------------------------
// Enumeration

/// A field-less enum encoded by its underlying integer.
///
/// Implemented by [`#[derive(Enumeration)]`](crate::derive::Enumeration).
pub trait Enumeration: Value {
    /// The integer type of the discriminant.
    fn repr_kind(&self) -> NumberKind;

    /// Returns the discriminant of the current variant.
    fn repr(&self) -> Number;

    /// Switches to the variant with discriminant `repr`.
    ///
    /// Returns `false` and leaves `self` untouched if no variant matches.
    fn set_repr(&mut self, repr: Number) -> bool;
}
