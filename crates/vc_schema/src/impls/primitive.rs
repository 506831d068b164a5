use alloc::string::String;

use crate::impls::impl_value_any;
use crate::value::{Classification, Number, NumberMut, Serializable, Value, ValueMut, ValueRef};

macro_rules! impl_number {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                #[inline]
                fn value_ref(&self) -> ValueRef<'_> {
                    ValueRef::Number(Number::$variant(*self))
                }

                #[inline]
                fn value_mut(&mut self) -> ValueMut<'_> {
                    ValueMut::Number(NumberMut::$variant(self))
                }

                impl_value_any!();
            }

            impl Serializable for $ty {
                const CLASSIFICATION: Classification = Classification::Atomic;
            }
        )*
    };
}

impl_number! {
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
}

impl Value for bool {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Bool(*self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Bool(self)
    }

    impl_value_any!();
}

impl Serializable for bool {
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl Value for String {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::String(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::String(self)
    }

    impl_value_any!();
}

impl Serializable for String {
    const CLASSIFICATION: Classification = Classification::Atomic;
}
