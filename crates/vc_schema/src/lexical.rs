//! Strict conversion from text to arithmetic values.
//!
//! [`lexical_cast`] accepts a token only if the whole token parses; trailing
//! garbage such as `"12abc"` or a fractional part for an integer target is an
//! error. Conversion is locale independent: the decimal separator is always `.`.
//!
//! 8-bit integers are the exception. They are parsed as their 16-bit
//! counterpart and then narrowed with a wrapping cast, so `"256"` converts to
//! `0_u8` rather than failing.
//!
//! ```
//! use vc_schema::lexical::lexical_cast;
//!
//! assert_eq!(lexical_cast::<u8>("256"), Ok(0));
//! assert!(lexical_cast::<i32>("12.5124").is_err());
//! ```

use alloc::string::{String, ToString};
use core::any::type_name;

use thiserror::Error;

// -----------------------------------------------------------------------------
// LexicalError

/// A token that could not be converted to the requested type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert `{token}` to `{target}`")]
pub struct LexicalError {
    /// The offending token.
    pub token: String,
    /// The requested type.
    pub target: &'static str,
}

impl LexicalError {
    fn new<T>(token: &str) -> Self {
        Self {
            token: token.to_string(),
            target: type_name::<T>(),
        }
    }
}

// -----------------------------------------------------------------------------
// LexicalCast

/// Types that [`lexical_cast`] can produce.
pub trait LexicalCast: Sized {
    /// Converts the whole of `text` to `Self`.
    fn lexical_cast(text: &str) -> Result<Self, LexicalError>;
}

/// Converts the whole of `text` to `T`.
#[inline]
pub fn lexical_cast<T: LexicalCast>(text: &str) -> Result<T, LexicalError> {
    T::lexical_cast(text)
}

macro_rules! impl_strict {
    ($($ty:ty),*) => {
        $(
            impl LexicalCast for $ty {
                fn lexical_cast(text: &str) -> Result<Self, LexicalError> {
                    text.parse::<$ty>().map_err(|_| LexicalError::new::<$ty>(text))
                }
            }
        )*
    };
}

impl_strict!(i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64);

macro_rules! impl_narrow {
    ($($ty:ty => $wide:ty),*) => {
        $(
            impl LexicalCast for $ty {
                fn lexical_cast(text: &str) -> Result<Self, LexicalError> {
                    text.parse::<$wide>()
                        .map(|wide| wide as $ty)
                        .map_err(|_| LexicalError::new::<$ty>(text))
                }
            }
        )*
    };
}

impl_narrow!(i8 => i16, u8 => u16);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{LexicalError, lexical_cast};

    #[test]
    fn narrow_integers_wrap() {
        assert_eq!(lexical_cast::<u8>("256"), Ok(0));
        assert_eq!(lexical_cast::<u8>("300"), Ok(44));
        assert_eq!(lexical_cast::<i8>("128"), Ok(-128));
        assert_eq!(lexical_cast::<i8>("-12"), Ok(-12));
    }

    #[test]
    fn narrow_integers_still_reject_garbage() {
        assert!(lexical_cast::<u8>("70000").is_err());
        assert!(lexical_cast::<u8>("1x").is_err());
    }

    #[test]
    fn wide_integers_are_strict() {
        let err = lexical_cast::<i32>("12.5124").unwrap_err();
        assert_eq!(
            err,
            LexicalError {
                token: "12.5124".into(),
                target: "i32",
            }
        );
        assert!(lexical_cast::<u16>("65536").is_err());
        assert!(lexical_cast::<i64>("").is_err());
        assert!(lexical_cast::<u32>("-1").is_err());
    }

    #[test]
    fn floats_parse_with_dot() {
        assert_eq!(lexical_cast::<f64>("0.35"), Ok(0.35));
        assert_eq!(lexical_cast::<f32>("-15"), Ok(-15.0));
        assert!(lexical_cast::<f64>("0,35").is_err());
        assert!(lexical_cast::<f64>("1.0e").is_err());
    }
}
