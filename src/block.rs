/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The block reader (C2): layered over [`crate::line`],
//! turning a flat line stream into "lines belonging to the
//! current block", with dedent-as-termination semantics.

use crate::{
    error::{internal, Result},
    line::Line,
    parser::Parser,
    reader::Source,
};

/// Outcome of [`Parser::read_block_line`].
///
/// `EndOfBlock` is the internal-only signal from §7 of the
/// design: it is never turned into a public [`crate::Error`]
/// except at the outermost call (`blocklevel == 0`), where it
/// becomes a plain end-of-file error instead.
#[derive(Debug)]
pub(crate) enum BlockOutcome
{
    Line(Line),
    EndOfBlock,
}

impl<S: Source> Parser<S>
{
    /// Pull the next line belonging to the current block, per
    /// `block_indent`/`skip_comments`/`blocklevel`.
    pub(crate) fn read_block_line(&mut self) -> Result<BlockOutcome>
    {
        if self.eof
        {
            return self.end_of_block_or_eof();
        }

        loop
        {
            let line = match self.line_reader.read_line()?
            {
                Some(line) => line,
                None =>
                {
                    self.eof = true;
                    self.current = None;

                    return self.end_of_block_or_eof();
                },
            };

            if self.skip_comments
            {
                if line.is_blank() || line.is_comment()
                {
                    continue;
                }

                self.skip_comments = false;
            }

            if line.is_blank()
            {
                self.current = Some(line.clone());

                return Ok(BlockOutcome::Line(line));
            }

            if line.indent >= self.block_indent
            {
                self.current = Some(line.clone());

                return Ok(BlockOutcome::Line(line));
            }

            if line.is_comment()
            {
                // Unindented comments may be skipped freely.
                continue;
            }

            // A real line dedented below the block: the block ends
            // here, and the line is pushed back for the next
            // (outer) caller to observe.
            self.line_reader.unread_line(line);
            self.current = None;

            return Ok(BlockOutcome::EndOfBlock);
        }
    }

    fn end_of_block_or_eof(&self) -> Result<BlockOutcome>
    {
        if self.blocklevel > 0
        {
            Ok(BlockOutcome::EndOfBlock)
        }
        else
        {
            Err(internal::Error::eof().into())
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::StrSource;

    fn parser(data: &str) -> Parser<StrSource<'_>>
    {
        Parser::new(StrSource::new(data))
    }

    #[test]
    fn dedent_ends_block_and_pushes_line_back() -> anyhow::Result<()>
    {
        let mut p = parser("  a\nb\n");
        p.block_indent = 2;
        p.blocklevel = 1;

        match p.read_block_line()?
        {
            BlockOutcome::Line(l) => assert_eq!(l.text, "  a"),
            BlockOutcome::EndOfBlock => panic!("expected a line"),
        }

        match p.read_block_line()?
        {
            BlockOutcome::EndOfBlock => {},
            BlockOutcome::Line(_) => panic!("expected end of block"),
        }

        // The dedented line is still there for the outer block.
        p.block_indent = 0;
        p.blocklevel = 0;
        match p.read_block_line()?
        {
            BlockOutcome::Line(l) => assert_eq!(l.text, "b"),
            BlockOutcome::EndOfBlock => panic!("expected the pushed-back line"),
        }

        Ok(())
    }

    #[test]
    fn comments_skip_freely_below_block_indent() -> anyhow::Result<()>
    {
        let mut p = parser("  a\n# trailing, unindented comment\n  b\n");
        p.block_indent = 2;
        p.blocklevel = 1;

        p.read_block_line()?;
        match p.read_block_line()?
        {
            BlockOutcome::Line(l) => assert_eq!(l.text, "  b"),
            BlockOutcome::EndOfBlock => panic!("comment should have been skipped"),
        }

        Ok(())
    }

    #[test]
    fn eof_at_top_level_is_an_error() -> anyhow::Result<()>
    {
        let mut p = parser("");
        p.block_indent = 0;
        p.blocklevel = 0;

        let err = p.read_block_line().unwrap_err();
        assert_eq!(err.classify(), crate::error::Category::Eof);

        Ok(())
    }

    #[test]
    fn eof_while_nested_is_end_of_block() -> anyhow::Result<()>
    {
        let mut p = parser("");
        p.block_indent = 0;
        p.blocklevel = 1;

        match p.read_block_line()?
        {
            BlockOutcome::EndOfBlock => {},
            BlockOutcome::Line(_) => panic!("expected end of block"),
        }

        Ok(())
    }
}
