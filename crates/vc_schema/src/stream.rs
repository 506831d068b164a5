//! Byte streams the formatters write to and read from.
//!
//! - [`OutStream`]: append-only sink, also a [`fmt::Write`] for text formats.
//! - [`InStream`]: consumable buffer with a read cursor. Text formats edit the
//!   unread part in place ([`InStream::erase`], [`InStream::replace`]).

use alloc::string::{FromUtf8Error, String};
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::format::ReadError;

// -----------------------------------------------------------------------------
// OutStream

/// An append-only output buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutStream {
    buf: Vec<u8>,
}

impl OutStream {
    /// Creates an empty stream.
    #[inline]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Appends one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends raw bytes.
    #[inline]
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends text.
    #[inline]
    pub fn push_str(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
    }

    /// Appends the [`Display`](fmt::Display) form of `value`.
    pub fn push_display(&mut self, value: impl fmt::Display) {
        // `write_str` below never fails.
        let _ = fmt::Write::write_fmt(self, format_args!("{value}"));
    }

    /// Returns the underlying buffer for direct appends.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Returns the written bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of written bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the stream, returning the written bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Consumes the stream, returning the written text.
    #[inline]
    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.buf)
    }

    /// Turns everything written so far into an input stream positioned at the start.
    #[inline]
    pub fn into_in_stream(self) -> InStream {
        InStream::new(self.buf)
    }
}

impl fmt::Write for OutStream {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// InStream

/// A consumable input buffer.
///
/// Everything before the cursor has been consumed. Every range and length
/// reported by the stream is relative to the unread part.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InStream {
    buf: Vec<u8>,
    pos: usize,
}

impl InStream {
    /// Creates a stream positioned at the start of `bytes`.
    #[inline]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { buf: bytes, pos: 0 }
    }

    /// Returns the unread bytes.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns `true` if every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Consumes exactly `n` bytes.
    ///
    /// Fails without consuming anything if fewer than `n` bytes are left.
    pub fn take(&mut self, n: usize) -> Result<&[u8], ReadError> {
        let remaining = self.len();
        if n > remaining {
            return Err(ReadError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    /// Returns the unread bytes as text.
    #[inline]
    pub fn as_str(&self) -> Result<&str, ReadError> {
        core::str::from_utf8(self.remaining()).map_err(|_| ReadError::InvalidUtf8)
    }

    /// Removes `range` from the unread bytes.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    #[inline]
    pub fn erase(&mut self, range: Range<usize>) {
        let start = self.pos + range.start;
        let end = self.pos + range.end;
        self.buf.drain(start..end);
    }

    /// Replaces the unread bytes with `bytes`, discarding consumed ones.
    #[inline]
    pub fn replace(&mut self, bytes: impl Into<Vec<u8>>) {
        self.buf = bytes.into();
        self.pos = 0;
    }

    /// Consumes every remaining byte.
    #[inline]
    pub fn clear(&mut self) {
        self.pos = self.buf.len();
    }
}

impl From<&str> for InStream {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes().to_vec())
    }
}

impl From<String> for InStream {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for InStream {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for InStream {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self::new(value.to_vec())
    }
}

// -----------------------------------------------------------------------------
// Tests
