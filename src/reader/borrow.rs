/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Source`](super::Source)
//! for borrowed UTF8 slices (`&str`s).

use super::{private, Source};
use crate::error::Result;

/// A [`Source`] implementor for in-memory `&str` documents.
#[derive(Debug, Clone)]
pub struct StrSource<'de>
{
    data: &'de str,
    pos:  usize,
}

impl<'de> StrSource<'de>
{
    /// Instantiate a new [`StrSource`] over the given UTF8
    /// slice.
    pub fn new(data: &'de str) -> Self
    {
        Self { data, pos: 0 }
    }
}

impl Source for StrSource<'_>
{
    fn next_line(&mut self, buf: &mut String) -> Result<bool>
    {
        if self.pos >= self.data.len()
        {
            return Ok(false);
        }

        let rest = &self.data[self.pos..];

        let (line, advance) = match rest.find('\n')
        {
            Some(idx) =>
            {
                let candidate = &rest[..idx];
                let candidate = candidate.strip_suffix('\r').unwrap_or(candidate);

                (candidate, idx + 1)
            },
            None => (rest, rest.len()),
        };

        buf.clear();
        buf.push_str(line);
        self.pos += advance;

        Ok(true)
    }
}

impl private::Sealed for StrSource<'_> {}

#[cfg(test)]
mod tests
{
    use super::*;

    fn lines_of(data: &str) -> Vec<String>
    {
        let mut src = StrSource::new(data);
        let mut out = Vec::new();
        let mut buf = String::new();

        while src.next_line(&mut buf).unwrap()
        {
            out.push(buf.clone());
        }

        out
    }

    #[test]
    fn splits_on_lf()
    {
        assert_eq!(lines_of("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn splits_on_crlf()
    {
        assert_eq!(lines_of("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn empty_input_yields_no_lines()
    {
        assert_eq!(lines_of(""), Vec::<String>::new());
    }

    #[test]
    fn trailing_newline_does_not_add_empty_line()
    {
        assert_eq!(lines_of("a\n"), vec!["a"]);
    }
}
