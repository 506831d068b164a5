//! [`Value`](crate::Value) and [`Serializable`](crate::Serializable) for atomic types.
//!
//! | Rust type                  | Encoded as                  |
//! |----------------------------|-----------------------------|
//! | `bool`                     | boolean                     |
//! | `i8..=i128`, `u8..=u128`, `isize`, `usize`, `f32`, `f64` | number |
//! | `String`                   | string                      |
//! | `Option<T>`                | `T`, or null                |
//! | `Box<T>`                   | exactly like `T`            |
//! | `Vec<T>`                   | sequence                    |
//! | `[T; N]`                   | sequence of length `N`      |
//! | `BTreeMap<String, V>`      | map                         |
//! | `HashMap<String, V, S>`    | map                         |
//!
//! Field-less enums get theirs from [`#[derive(Enumeration)]`](crate::derive::Enumeration),
//! registered types from [`#[derive(Schema)]`](crate::derive::Schema).

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod map;
mod option;
mod primitive;
mod sequence;

/// Implements the type-erasure methods of [`Value`](crate::Value) that are
/// identical for every implementor.
macro_rules! impl_value_any {
    () => {
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
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn ::core::any::Any> {
            self
        }
    };
}

use impl_value_any;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use crate::value::{Classification, Number, Serializable, Value, ValueMut, ValueRef};
    use crate::value::{is_builtin_type, is_registered_type};

    #[test]
    fn atomic_types_are_builtin() {
        assert!(is_builtin_type::<u8>());
        assert!(is_builtin_type::<String>());
        assert!(is_builtin_type::<Option<Box<f64>>>());
        assert!(is_builtin_type::<Vec<[i32; 3]>>());
        assert!(is_builtin_type::<BTreeMap<String, Vec<bool>>>());
        assert!(is_builtin_type::<HashMap<String, i64>>());
        assert!(!is_registered_type::<Option<u8>>());
    }

    #[test]
    fn box_is_transparent() {
        assert_eq!(<Box<u32> as Serializable>::CLASSIFICATION, Classification::Atomic);
        let boxed: Box<u32> = Box::new(7);
        assert!(matches!(boxed.value_ref(), ValueRef::Number(Number::U32(7))));
    }

    #[test]
    fn option_insert_default_replaces() {
        let mut value = Some(String::from("old"));
        let ValueMut::Nullable(nullable) = value.value_mut() else {
            panic!("expected a nullable");
        };
        let inner = nullable.insert_default();
        assert!(matches!(inner.value_ref(), ValueRef::String("")));
        assert_eq!(value.as_deref(), Some(""));
    }

    #[test]
    fn list_push_default_appends() {
        let mut list = vec![1_i16, 2];
        let ValueMut::List(ops) = list.value_mut() else {
            panic!("expected a list");
        };
        ops.push_default();
        assert_eq!(ops.len(), 3);
        assert_eq!(list, [1, 2, 0]);
    }

    #[test]
    fn map_iterates_in_key_order() {
        let map = BTreeMap::from([(String::from("b"), 2_u8), (String::from("a"), 1)]);
        let ValueRef::Map(ops) = map.value_ref() else {
            panic!("expected a map");
        };
        let keys: Vec<_> = ops.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
