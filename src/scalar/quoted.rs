/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Single- and multi-line quoted strings. The single-line
//! case is a pure lex over `current_text()`; the multi-line
//! case pulls further lines through the block reader, which
//! is why this lives on [`Parser`] rather than alongside the
//! other scalar lexers.

use crate::{
    block::BlockOutcome,
    error::Result,
    parser::Parser,
    reader::Source,
    scalar::{escape, fold},
    value::Value,
};

impl<S: Source> Parser<S>
{
    /// Parse a quoted string opening at `opening_quote_pos` in
    /// the current line. Returns the string value together
    /// with the position just past the closing quote.
    pub(crate) fn parse_quoted_string(&mut self, opening_quote_pos: usize) -> Result<(Value, usize)>
    {
        let quote = self.current_text().as_bytes()[opening_quote_pos];

        if let Some(close) = find_closing_quote(self.current_text(), quote, opening_quote_pos + 1)
        {
            let content = self.current_text()[opening_quote_pos + 1..close].to_string();
            let line_number = self.line_number();
            let unescaped = escape::unescape(&content).map_err(|e| e.at_line(line_number))?;

            return Ok((Value::String(unescaped), close + 1));
        }

        let block_indent = opening_quote_pos + 1;
        let saved_block_indent = self.block_indent;
        self.block_indent = block_indent;
        self.blocklevel += 1;

        let mut lines = Vec::new();
        let mut line_numbers = Vec::new();
        let mut terminator_end_pos = None;

        loop
        {
            line_numbers.push(self.line_number());

            if let Some(close) = find_closing_quote(self.current_text(), quote, block_indent)
            {
                let final_line = rtrim(&self.current_text()[block_indent..close]).to_string();
                lines.push(final_line);
                terminator_end_pos = Some(close + 1);
                break;
            }

            lines.push(self.current_text()[block_indent..].to_string());

            match self.read_block_line()
            {
                Ok(BlockOutcome::Line(_)) => continue,
                Ok(BlockOutcome::EndOfBlock) => break,
                Err(e) =>
                {
                    self.block_indent = saved_block_indent;
                    self.blocklevel -= 1;

                    return Err(e);
                },
            }
        }

        self.block_indent = saved_block_indent;
        self.blocklevel -= 1;

        let end_pos = match terminator_end_pos
        {
            Some(end_pos) => end_pos,
            None =>
            {
                match self.read_block_line()?
                {
                    BlockOutcome::EndOfBlock =>
                    {
                        return Err(self.err_at(self.current_indent(), "String has no closing quote"));
                    },
                    BlockOutcome::Line(_) =>
                    {
                        let indent = self.current_indent();
                        let starts_with_quote = self.current_text().as_bytes().get(indent) == Some(&quote);

                        if indent == opening_quote_pos && starts_with_quote
                        {
                            opening_quote_pos + 1
                        }
                        else
                        {
                            return Err(self.err_at(indent, "String has no closing quote"));
                        }
                    },
                }
            },
        };

        let folded = fold::fold_with(&lines, |i, line| escape::unescape(line).map_err(|e| e.at_line(line_numbers[i])))?;

        Ok((Value::String(folded), end_pos))
    }
}

/// Search `line[start_pos..]` for an unescaped occurrence of
/// `quote`, returning its byte position.
pub(crate) fn find_closing_quote(line: &str, quote: u8, start_pos: usize) -> Option<usize>
{
    let bytes = line.as_bytes();
    let mut pos = start_pos;

    loop
    {
        let found = bytes[pos.min(bytes.len())..]
            .iter()
            .position(|&b| b == quote)
            .map(|i| pos + i)?;

        if found > 0 && bytes[found - 1] == b'\\'
        {
            pos = found + 1;
            continue;
        }

        return Some(found);
    }
}

fn rtrim(s: &str) -> &str
{
    s.trim_end_matches([' ', '\t'])
}
