//! Scanning of unparsed JSON text.
//!
//! All functions expect text without whitespace outside string literals, as
//! produced by [`strip_whitespace`]. String literals are delimited by `"` and
//! carry no escape sequences.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::format::{ReadError, excerpt};

// -----------------------------------------------------------------------------
// Whitespace and delimiters

/// Removes spaces, tabs and line breaks outside string literals.
pub(super) fn strip_whitespace(text: &str) -> Result<String, ReadError> {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    for c in text.chars() {
        if c == '"' {
            in_string = !in_string;
        }
        if in_string || !matches!(c, ' ' | '\t' | '\n' | '\r') {
            out.push(c);
        }
    }
    if in_string {
        return Err(ReadError::UnterminatedString {
            found: excerpt(text),
        });
    }
    Ok(out)
}

/// Returns the interior of `{...}`.
pub(super) fn strip_braces(text: &str) -> Result<&str, ReadError> {
    text.strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| ReadError::MissingBraces {
            found: excerpt(text),
        })
}

/// Returns the interior of `[...]`.
pub(super) fn strip_brackets(text: &str) -> Result<&str, ReadError> {
    text.strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| ReadError::MissingBrackets {
            found: excerpt(text),
        })
}

/// Returns the interior of `"..."`.
pub(super) fn strip_quotes(text: &str) -> Result<&str, ReadError> {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| ReadError::MissingQuotes {
            found: excerpt(text),
        })
}

// -----------------------------------------------------------------------------
// Values

/// Returns the end of the value starting at `start`: the offset of the first
/// comma outside string literals and nested objects or sequences, or the end
/// of `text`.
pub(super) fn value_end(text: &str, start: usize) -> Result<usize, ReadError> {
    let bytes = text.as_bytes();
    let mut nesting: Vec<u8> = Vec::new();
    let mut in_string = false;

    for (offset, &byte) in bytes.iter().enumerate().skip(start) {
        if in_string {
            in_string = byte != b'"';
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => nesting.push(b'}'),
            b'[' => nesting.push(b']'),
            b'}' | b']' => {
                if nesting.pop() != Some(byte) {
                    return Err(ReadError::UnbalancedNesting { offset });
                }
            }
            b',' if nesting.is_empty() => return Ok(offset),
            _ => {}
        }
    }

    if in_string {
        return Err(ReadError::UnterminatedString {
            found: excerpt(&text[start..]),
        });
    }
    if !nesting.is_empty() {
        return Err(ReadError::UnbalancedNesting {
            offset: bytes.len(),
        });
    }
    Ok(bytes.len())
}

/// Splits the interior of a sequence into its elements.
pub(super) fn split_elements(text: &str) -> Result<Vec<&str>, ReadError> {
    let mut elements = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = value_end(rest, 0)?;
        elements.push(&rest[..end]);
        rest = rest.get(end + 1..).unwrap_or_default();
    }
    Ok(elements)
}

// -----------------------------------------------------------------------------
// Members

/// Location of one `"key":value` member inside an object interior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MemberSpan {
    /// The key, without quotes.
    pub key: Range<usize>,
    /// The value.
    pub value: Range<usize>,
    /// The whole member, including its trailing comma.
    pub member: Range<usize>,
}

/// Iterates the top-level members of an object interior.
pub(super) struct Members<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Members<'a> {
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse_member(&self) -> Result<MemberSpan, ReadError> {
        let text = self.text;
        let start = self.pos;
        let rest = &text[start..];

        let Some(after_quote) = rest.strip_prefix('"') else {
            return Err(ReadError::ExpectedMemberName {
                found: excerpt(rest),
            });
        };
        let Some(key_len) = after_quote.find('"') else {
            return Err(ReadError::UnterminatedString {
                found: excerpt(rest),
            });
        };
        let key = start + 1..start + 1 + key_len;

        let colon = key.end + 1;
        if text.as_bytes().get(colon) != Some(&b':') {
            return Err(ReadError::ExpectedColon {
                found: excerpt(&text[key.end + 1..]),
            });
        }

        let value = colon + 1..value_end(text, colon + 1)?;
        let member_end = if value.end < text.len() {
            value.end + 1
        } else {
            value.end
        };

        Ok(MemberSpan {
            key,
            value,
            member: start..member_end,
        })
    }
}

impl Iterator for Members<'_> {
    type Item = Result<MemberSpan, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        match self.parse_member() {
            Ok(span) => {
                self.pos = span.member.end;
                Some(Ok(span))
            }
            Err(err) => {
                self.pos = self.text.len();
                Some(Err(err))
            }
        }
    }
}

/// Finds the top-level member called `name`.
///
/// Keys inside nested objects and text inside string literals never match.
pub(super) fn find_member(text: &str, name: &str) -> Result<Option<MemberSpan>, ReadError> {
    for span in Members::new(text) {
        let span = span?;
        if &text[span.key.clone()] == name {
            return Ok(Some(span));
        }
    }
    Ok(None)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{find_member, split_elements, strip_whitespace, value_end};
    use crate::format::ReadError;

    #[test]
    fn whitespace_inside_strings_survives() {
        let text = "{ \"a b\" : [ 1, 2 ],\n\t\"c\": \" x \" }";
        assert_eq!(strip_whitespace(text).unwrap(), r#"{"a b":[1,2],"c":" x "}"#);
        assert!(matches!(
            strip_whitespace(r#"{"a":"open}"#),
            Err(ReadError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn value_end_skips_nested_commas() {
        let text = r#"{"x":1,"y":[1,2]},"next":3"#;
        assert_eq!(value_end(text, 0).unwrap(), 17);
        assert_eq!(value_end(r#""a,b",1"#, 0).unwrap(), 5);
        assert_eq!(value_end("42", 0).unwrap(), 2);
    }

    #[test]
    fn value_end_rejects_unbalanced_nesting() {
        assert_eq!(
            value_end("[1,{2]", 0),
            Err(ReadError::UnbalancedNesting { offset: 5 })
        );
        assert_eq!(
            value_end("[[1]", 0),
            Err(ReadError::UnbalancedNesting { offset: 4 })
        );
    }

    #[test]
    fn elements_split_at_top_level() {
        assert_eq!(
            split_elements(r#"[1,2],{"a":1,"b":2},"c,d""#).unwrap(),
            ["[1,2]", r#"{"a":1,"b":2}"#, r#""c,d""#]
        );
        assert!(split_elements("").unwrap().is_empty());
    }

    #[test]
    fn member_lookup_ignores_nested_keys() {
        let text = r#""inner":{"data":1},"note":"data","data":2"#;
        let span = find_member(text, "data").unwrap().unwrap();
        assert_eq!(&text[span.value.clone()], "2");
        assert_eq!(span.member.end, text.len());
    }

    #[test]
    fn member_span_includes_trailing_comma() {
        let text = r#""a":1,"b":true"#;
        let span = find_member(text, "a").unwrap().unwrap();
        assert_eq!(&text[span.member], r#""a":1,"#);
        assert!(find_member(text, "c").unwrap().is_none());
    }

    #[test]
    fn malformed_members_are_reported() {
        assert!(matches!(
            find_member("a:1", "a"),
            Err(ReadError::ExpectedMemberName { .. })
        ));
        assert!(matches!(
            find_member(r#""a"1"#, "a"),
            Err(ReadError::ExpectedColon { .. })
        ));
    }
}
