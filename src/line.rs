/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The line reader (C1): the thinnest layer over a
//! [`Source`], responsible for right-trimming, indent
//! measurement, line numbering and one-line pushback.

use crate::{error::Result, reader::Source};

/// A single, already right-trimmed line together with the
/// metadata the block reader and parser need about it.
#[derive(Debug, Clone)]
pub(crate) struct Line
{
    pub text:   String,
    /// Count of leading ASCII spaces in `text`, measured after
    /// right-trimming -- an all-whitespace line is trimmed down
    /// to `""` first, so its indent is always 0.
    pub indent: usize,
    /// 1-based line number.
    pub number: u64,
}

impl Line
{
    pub fn is_blank(&self) -> bool
    {
        self.text.trim().is_empty()
    }

    /// `true` if the first non-space character is `#`.
    pub fn is_comment(&self) -> bool
    {
        self.text[self.indent.min(self.text.len())..]
            .starts_with('#')
    }
}

pub(crate) struct LineReader<S>
{
    source:      S,
    pending:     Option<Line>,
    line_number: u64,
}

impl<S: Source> LineReader<S>
{
    pub fn new(source: S) -> Self
    {
        Self {
            source,
            pending: None,
            line_number: 0,
        }
    }

    /// Pull the next line, either from the one-line pushback
    /// slot or from the underlying source.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn read_line(&mut self) -> Result<Option<Line>>
    {
        if let Some(line) = self.pending.take()
        {
            return Ok(Some(line));
        }

        let mut raw = String::new();

        if !self.source.next_line(&mut raw)?
        {
            return Ok(None);
        }

        rtrim_spaces(&mut raw);
        let indent = leading_spaces(&raw);

        self.line_number += 1;

        Ok(Some(Line {
            text: raw,
            indent,
            number: self.line_number,
        }))
    }

    /// Push `line` back so the next [`read_line`](Self::read_line)
    /// returns it unchanged.
    ///
    /// Capacity is exactly one line; calling this twice
    /// without an intervening `read_line` is a logic error.
    pub fn unread_line(&mut self, line: Line)
    {
        debug_assert!(self.pending.is_none(), "pushback slot already occupied");

        self.pending = Some(line);
    }

    /// Number of the last line handed out, even once the
    /// source is exhausted.
    pub fn line_number(&self) -> u64
    {
        self.line_number
    }
}

fn leading_spaces(s: &str) -> usize
{
    s.bytes().position(|b| b != b' ').unwrap_or(s.len())
}

fn rtrim_spaces(s: &mut String)
{
    let trimmed = s.trim_end_matches([' ', '\t']).len();

    s.truncate(trimmed);
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::reader::StrSource;

    fn reader(data: &str) -> LineReader<StrSource<'_>>
    {
        LineReader::new(StrSource::new(data))
    }

    #[test]
    fn measures_indent_and_rtrims() -> anyhow::Result<()>
    {
        let mut r = reader("  abc   \n");
        let line = r.read_line()?.unwrap();

        assert_eq!(line.text, "  abc");
        assert_eq!(line.indent, 2);
        assert_eq!(line.number, 1);

        Ok(())
    }

    #[test]
    fn all_space_line_has_indent_zero_after_rtrim()
    {
        let mut r = reader("    \nx\n");
        let blank = r.read_line().unwrap().unwrap();

        assert_eq!(blank.text, "");
        assert_eq!(blank.indent, 0);
        assert!(blank.is_blank());
    }

    #[test]
    fn pushback_returns_line_unchanged() -> anyhow::Result<()>
    {
        let mut r = reader("a\nb\n");
        let a = r.read_line()?.unwrap();
        r.unread_line(a.clone());
        let again = r.read_line()?.unwrap();

        assert_eq!(again.text, a.text);
        assert_eq!(again.number, a.number);

        let b = r.read_line()?.unwrap();
        assert_eq!(b.text, "b");

        Ok(())
    }

    #[test]
    fn exhausted_source_yields_none() -> anyhow::Result<()>
    {
        let mut r = reader("only\n");
        r.read_line()?;
        assert!(r.read_line()?.is_none());

        Ok(())
    }
}
