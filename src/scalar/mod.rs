/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The scalar lexer (C3): numbers, escape sequences, quoted
//! strings, folding, date-time and timestamp literals.
//!
//! Everything here except [`quoted`] is a pure function over
//! an already-available `&str` and returns a [`LexError`]
//! relative to that string; the caller (almost always
//! `crate::parser::Parser`) attaches the input's line number
//! to turn it into a real [`crate::error::Error`]. [`quoted`]
//! is the one exception, since a multi-line quoted string
//! needs to pull further lines through the block reader.

pub(crate) mod datetime;
pub(crate) mod escape;
pub(crate) mod fold;
pub(crate) mod number;
pub(crate) mod quoted;
pub(crate) mod timestamp;

use crate::error::internal;

/// A lexing failure relative to the `&str` being scanned, not
/// yet attached to an input line number.
#[derive(Debug, Clone)]
pub(crate) struct LexError
{
    pub column:  usize,
    pub message: String,
}

impl LexError
{
    pub fn new(column: usize, message: impl Into<String>) -> Self
    {
        Self {
            column,
            message: message.into(),
        }
    }

    /// Attach `line` to turn this into a real, public error.
    #[track_caller]
    pub fn at_line(self, line: u64) -> internal::Error
    {
        internal::Error::parse(line, self.column as u64 + 1, self.message)
    }
}

/// Count of leading ASCII space/tab characters in `s[from..]`.
pub(crate) fn skip_spaces(s: &str, from: usize) -> usize
{
    let bytes = s.as_bytes();
    let mut pos = from;

    while matches!(bytes.get(pos), Some(b' ') | Some(b'\t'))
    {
        pos += 1;
    }

    pos
}

/// `true` if `s[pos..]` is empty or begins with a `#` comment.
pub(crate) fn is_comment_or_eol(s: &str, pos: usize) -> bool
{
    match s.as_bytes().get(pos)
    {
        None => true,
        Some(b'#') => true,
        _ => false,
    }
}

/// `true` if everything from `pos` onward is whitespace,
/// optionally followed by a `#` comment.
pub(crate) fn rest_is_blank_or_comment(s: &str, pos: usize) -> bool
{
    is_comment_or_eol(s, skip_spaces(s, pos))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn skip_spaces_stops_at_non_space()
    {
        assert_eq!(skip_spaces("   x", 0), 3);
        assert_eq!(skip_spaces("x", 0), 0);
    }

    #[test]
    fn rest_is_blank_or_comment_detects_comment()
    {
        assert!(rest_is_blank_or_comment("   # hi", 0));
        assert!(rest_is_blank_or_comment("", 0));
        assert!(!rest_is_blank_or_comment("  x", 0));
    }
}
