use alloc::vec::Vec;
use core::fmt;

use crate::lexical::{LexicalError, lexical_cast};

// -----------------------------------------------------------------------------
// Macro

macro_rules! define_numbers {
    ($($variant:ident => $ty:ident),* $(,)?) => {
        /// An arithmetic scalar, tagged by its concrete type.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Number {
            $(
                #[doc = concat!("`", stringify!($ty), "`.")]
                $variant($ty),
            )*
        }

        /// The concrete type of a [`Number`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NumberKind {
            $(
                #[doc = concat!("`", stringify!($ty), "`.")]
                $variant,
            )*
        }

        /// A mutable reference to an arithmetic scalar.
        #[derive(Debug)]
        pub enum NumberMut<'a> {
            $(
                #[doc = concat!("`&mut ", stringify!($ty), "`.")]
                $variant(&'a mut $ty),
            )*
        }

        impl Number {
            /// Returns the concrete type of the number.
            pub const fn kind(&self) -> NumberKind {
                match self {
                    $(Self::$variant(_) => NumberKind::$variant,)*
                }
            }

            /// Parses `text` as a number of the given `kind`.
            ///
            /// Uses the strict [`lexical_cast`], so 8-bit integers wrap around.
            pub fn parse(kind: NumberKind, text: &str) -> Result<Self, LexicalError> {
                match kind {
                    $(NumberKind::$variant => Ok(Self::$variant(lexical_cast::<$ty>(text)?)),)*
                }
            }

            /// Appends the native-endian memory representation to `out`.
            pub fn write_ne_bytes(&self, out: &mut Vec<u8>) {
                match self {
                    $(Self::$variant(v) => out.extend_from_slice(&v.to_ne_bytes()),)*
                }
            }

            /// Rebuilds a number from its native-endian memory representation.
            ///
            /// Returns `None` if `bytes` is not exactly [`NumberKind::size`] long.
            pub fn from_ne_bytes(kind: NumberKind, bytes: &[u8]) -> Option<Self> {
                match kind {
                    $(NumberKind::$variant => Some(Self::$variant($ty::from_ne_bytes(bytes.try_into().ok()?))),)*
                }
            }
        }

        impl NumberKind {
            /// The in-memory size of the type, in bytes.
            pub const fn size(self) -> usize {
                match self {
                    $(Self::$variant => size_of::<$ty>(),)*
                }
            }

            /// The Rust name of the type.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($ty),)*
                }
            }
        }

        impl NumberMut<'_> {
            /// Returns the concrete type of the referenced number.
            pub const fn kind(&self) -> NumberKind {
                match self {
                    $(Self::$variant(_) => NumberKind::$variant,)*
                }
            }

            /// Reads the referenced number.
            pub fn get(&self) -> Number {
                match self {
                    $(Self::$variant(v) => Number::$variant(**v),)*
                }
            }

            /// Overwrites the referenced number.
            ///
            /// Returns `false` and leaves the target untouched if the kinds differ.
            pub fn set(&mut self, number: Number) -> bool {
                match (self, number) {
                    $((Self::$variant(target), Number::$variant(v)) => {
                        **target = v;
                        true
                    })*
                    _ => false,
                }
            }
        }

        impl fmt::Display for Number {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant(v) => fmt::Display::fmt(v, f),)*
                }
            }
        }
    };
}

define_numbers! {
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

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{Number, NumberKind, NumberMut};

    #[test]
    fn display_uses_decimal_integers() {
        assert_eq!(Number::U8(255).to_string(), "255");
        assert_eq!(Number::I8(-127).to_string(), "-127");
        assert_eq!(Number::F64(0.35).to_string(), "0.35");
        assert_eq!(Number::F32(0.15).to_string(), "0.15");
    }

    #[test]
    fn native_bytes_have_type_width() {
        let mut out = Vec::new();
        Number::I32(-54).write_ne_bytes(&mut out);
        assert_eq!(out.len(), NumberKind::I32.size());
        assert_eq!(Number::from_ne_bytes(NumberKind::I32, &out), Some(Number::I32(-54)));
        assert_eq!(Number::from_ne_bytes(NumberKind::I64, &out), None);
    }

    #[test]
    fn set_rejects_other_kinds() {
        let mut target = 3_u16;
        let mut slot = NumberMut::U16(&mut target);
        assert!(!slot.set(Number::U32(7)));
        assert!(slot.set(Number::U16(7)));
        assert_eq!(slot.get(), Number::U16(7));
        assert_eq!(target, 7);
    }
}
