/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The block value parser (C4) and conversion-spec registry
//! (C5): [`Parser`] drives the whole document, dispatching
//! each scalar lexer and recursing for lists and maps.

mod list;
mod map_;
mod value_end;

#[cfg(test)]
mod tests
{
    mod document;
}

use std::{collections::HashMap, error::Error as StdError, fmt};

use crate::{
    block::BlockOutcome,
    error::{internal, Result},
    line::Line,
    line::LineReader,
    reader::Source,
    scalar::{self, number},
    value::Value,
};

/// A registered conversion specifier, `:NAME:`. All six
/// built-ins and every custom specifier share this signature --
/// a plain function pointer rather than a boxed closure, since
/// a closure capturing anything would alias `Parser` itself.
pub(crate) type ConvSpecFn<S> = fn(&mut Parser<S>) -> Result<Value>;

/// A parser over a [`Source`] of lines, producing a [`Value`]
/// tree.
///
/// Construct one directly with [`Parser::new`] for the
/// defaults, or go through [`ParserBuilder`] to register custom
/// conversion specifiers or raise the recursion limits.
pub struct Parser<S>
{
    pub(crate) line_reader: LineReader<S>,
    pub(crate) current: Option<Line>,
    pub(crate) eof: bool,

    /// Minimum indent a line must have to belong to the
    /// current block.
    pub(crate) block_indent: usize,
    /// Nesting depth of block-level recursion; the top level
    /// starts at 1, matching the reference parser's own
    /// initial value (an immediately empty document is
    /// reported the same way regardless).
    pub(crate) blocklevel: u32,
    max_blocklevel: u32,

    pub(crate) json_depth: u32,
    max_json_depth: u32,

    /// Whether leading blank lines and comments are still
    /// being skipped at the head of a block. Cleared the
    /// moment the first substantive line is seen.
    pub(crate) skip_comments: bool,

    custom_parsers: HashMap<String, ConvSpecFn<S>>,
}

impl<S: Source> Parser<S>
{
    /// Build a parser with the six built-in conversion
    /// specifiers registered and no custom ones. Use
    /// [`ParserBuilder`] to add more or to change the recursion
    /// limits.
    pub fn new(source: S) -> Self
    {
        let mut custom_parsers: HashMap<String, ConvSpecFn<S>> = HashMap::new();

        custom_parsers.insert("raw".to_string(), crate::convspec::raw as ConvSpecFn<S>);
        custom_parsers.insert("literal".to_string(), crate::convspec::literal as ConvSpecFn<S>);
        custom_parsers.insert("folded".to_string(), crate::convspec::folded as ConvSpecFn<S>);
        custom_parsers.insert("datetime".to_string(), crate::convspec::datetime as ConvSpecFn<S>);
        custom_parsers.insert("timestamp".to_string(), crate::convspec::timestamp as ConvSpecFn<S>);
        custom_parsers.insert("json".to_string(), crate::convspec::json as ConvSpecFn<S>);

        Self {
            line_reader: LineReader::new(source),
            current: None,
            eof: false,
            block_indent: 0,
            blocklevel: 1,
            max_blocklevel: 100,
            json_depth: 1,
            max_json_depth: 100,
            skip_comments: true,
            custom_parsers,
        }
    }

    /// Parse the whole source as a single top-level value.
    pub(crate) fn parse_document(&mut self) -> Result<Value>
    {
        match self.read_block_line()?
        {
            BlockOutcome::EndOfBlock if self.eof => return Err(internal::Error::eof().into()),
            _ => {},
        }

        let value = self.parse_value()?;

        let outcome = self.read_block_line();

        if self.eof
        {
            return Ok(value);
        }

        match outcome?
        {
            BlockOutcome::Line(line) => Err(internal::Error::parse(
                line.number,
                line.indent as u64 + 1,
                "Extra data after parsed value",
            )
            .into()),
            BlockOutcome::EndOfBlock => unreachable!("block_indent == 0 at top level; a dedent cannot occur"),
        }
    }

    pub(crate) fn parse_json_document(&mut self) -> Result<Value>
    {
        self.read_block_line()?;

        let (value, end_pos) = self.parse_json_value(0)?;

        if !scalar::rest_is_blank_or_comment(self.current_text(), end_pos)
        {
            return Err(self.err_at(self.current_indent(), "Extra data after parsed value"));
        }

        let outcome = self.read_block_line();

        if self.eof
        {
            return Ok(value);
        }

        outcome?;

        Err(self.err_at(self.current_indent(), "Extra data after parsed value"))
    }

    /// Dispatch a value at the current read position, recursing
    /// into [`Self::parse_list`]/[`Self::parse_map`] as needed.
    pub(crate) fn parse_value(&mut self) -> Result<Value>
    {
        let start_pos = self.start_position();
        let chr = self.byte_at(start_pos);

        if chr == Some(b':')
        {
            if let Some((name, value_pos)) = self.parse_convspec(start_pos)
            {
                let f = self
                    .lookup_convspec(&name)
                    .expect("parse_convspec only returns names already confirmed registered");

                if self.byte_is_eol(value_pos)
                {
                    match self.read_block_line()?
                    {
                        BlockOutcome::EndOfBlock =>
                        {
                            return Err(self.err_at(self.current_indent(), "Empty block"));
                        },
                        BlockOutcome::Line(_) => {},
                    }

                    return f(self);
                }

                return self.parse_nested_block(value_pos, f);
            }

            return self.parse_literal_string();
        }

        if chr == Some(b'-')
        {
            let next = self.byte_at(start_pos + 1);

            if matches!(next, Some(b'0'..=b'9'))
            {
                let line_number = self.line_number();
                let number = number::parse_number(self.current_text(), start_pos + 1, true, &[b'#', b':'])
                    .map_err(|e| e.at_line(line_number))?;

                return self.check_value_end(number.value, number.end);
            }

            if next.is_none() || next.is_some_and(|b| b.is_ascii_whitespace())
            {
                return self.parse_list();
            }

            return self.parse_literal_string_or_map(start_pos);
        }

        if chr == Some(b'"') || chr == Some(b'\'')
        {
            let start_line = self.line_number();
            let (value, end_pos) = self.parse_quoted_string(start_pos)?;
            let end_line = self.line_number();

            if end_line == start_line
            {
                return self.check_value_end(value, end_pos);
            }

            if scalar::rest_is_blank_or_comment(self.current_text(), end_pos)
            {
                return Ok(value);
            }

            return Err(self.err_at(end_pos, "Bad character after quoted string"));
        }

        if self.substring_eq(start_pos, "null")
        {
            return self.check_value_end(Value::Null, start_pos + 4);
        }
        if self.substring_eq(start_pos, "true")
        {
            return self.check_value_end(Value::Bool(true), start_pos + 4);
        }
        if self.substring_eq(start_pos, "false")
        {
            return self.check_value_end(Value::Bool(false), start_pos + 5);
        }

        let mut number_start = start_pos;
        let mut lead = chr;

        if chr == Some(b'+') && matches!(self.byte_at(start_pos + 1), Some(b'0'..=b'9'))
        {
            number_start += 1;
            lead = self.byte_at(number_start);
        }

        if matches!(lead, Some(b'0'..=b'9'))
        {
            let line_number = self.line_number();
            let number = number::parse_number(self.current_text(), number_start, false, &[b'#', b':'])
                .map_err(|e| e.at_line(line_number))?;

            return self.check_value_end(number.value, number.end);
        }

        self.parse_literal_string_or_map(start_pos)
    }

    /// Scan for a literal string whose prefix up to the first
    /// key-value separator makes it the first key of a map
    /// instead; otherwise the whole block is a literal string.
    fn parse_literal_string_or_map(&mut self, start_pos: usize) -> Result<Value>
    {
        let mut pos = start_pos;

        loop
        {
            let Some(colon_pos) = self.current_text()[pos..].find(':').map(|i| pos + i) else { break; };

            if let Some((value_pos, name)) = self.key_value_separator(colon_pos)
            {
                let key_text = self.current_text()[start_pos..colon_pos].trim_end().to_string();
                let convspec = name.and_then(|n| self.lookup_convspec(&n));

                return self.parse_map(Value::String(key_text), convspec, value_pos);
            }

            pos = colon_pos + 1;
        }

        self.parse_literal_string()
    }

    /// Same dispatch as [`Self::parse_value`], but the scalar is
    /// required to resolve to a map key: a standalone value, a
    /// list item, or a multi-line quoted string are all errors
    /// here.
    pub(crate) fn parse_key(&mut self) -> Result<(Value, usize, Option<ConvSpecFn<S>>)>
    {
        let start_pos = self.start_position();
        let chr = self.byte_at(start_pos);

        if chr == Some(b':')
        {
            return Err(self.err_at(start_pos, "Map key expected and it cannot start with colon"));
        }

        if chr == Some(b'-')
        {
            let next = self.byte_at(start_pos + 1);

            if matches!(next, Some(b'0'..=b'9'))
            {
                let line_number = self.line_number();
                let number = number::parse_number(self.current_text(), start_pos + 1, true, &[b'#', b':'])
                    .map_err(|e| e.at_line(line_number))?;

                return self.check_value_end_key(number.value, number.end);
            }

            if next.is_none() || next.is_some_and(|b| b.is_ascii_whitespace())
            {
                return Err(self.err_at(start_pos, "Map key expected and it cannot be a list"));
            }

            return self.parse_literal_key(start_pos);
        }

        if chr == Some(b'"') || chr == Some(b'\'')
        {
            let start_line = self.line_number();
            let (value, end_pos) = self.parse_quoted_string(start_pos)?;
            let end_line = self.line_number();

            if end_line == start_line
            {
                return self.check_value_end_key(value, end_pos);
            }

            // A multi-line quoted string can never itself be a
            // key's separator-bearing prefix.
            return Err(self.err_at(end_pos, "Map key expected"));
        }

        if self.substring_eq(start_pos, "null")
        {
            return self.check_value_end_key(Value::Null, start_pos + 4);
        }
        if self.substring_eq(start_pos, "true")
        {
            return self.check_value_end_key(Value::Bool(true), start_pos + 4);
        }
        if self.substring_eq(start_pos, "false")
        {
            return self.check_value_end_key(Value::Bool(false), start_pos + 5);
        }

        let mut number_start = start_pos;
        let mut lead = chr;

        if chr == Some(b'+') && matches!(self.byte_at(start_pos + 1), Some(b'0'..=b'9'))
        {
            number_start += 1;
            lead = self.byte_at(number_start);
        }

        if matches!(lead, Some(b'0'..=b'9'))
        {
            let line_number = self.line_number();
            let number = number::parse_number(self.current_text(), number_start, false, &[b'#', b':'])
                .map_err(|e| e.at_line(line_number))?;

            return self.check_value_end_key(number.value, number.end);
        }

        self.parse_literal_key(start_pos)
    }

    fn parse_literal_key(&mut self, start_pos: usize) -> Result<(Value, usize, Option<ConvSpecFn<S>>)>
    {
        let mut pos = start_pos;

        loop
        {
            let Some(colon_pos) = self.current_text()[pos..].find(':').map(|i| pos + i) else { break; };

            if let Some((value_pos, name)) = self.key_value_separator(colon_pos)
            {
                let key_text = self.current_text()[start_pos..colon_pos].trim_end().to_string();
                let convspec = name.and_then(|n| self.lookup_convspec(&n));

                return Ok((Value::String(key_text), value_pos, convspec));
            }

            pos = colon_pos + 1;
        }

        Err(self.err_at(self.current_indent(), "Not a key"))
    }

    /// Collect every remaining line of the current block,
    /// stripped of `block_indent` leading columns.
    pub(crate) fn read_block(&mut self) -> Result<Vec<String>>
    {
        let mut lines = Vec::new();

        loop
        {
            let text = self.current_text();
            let indent = self.block_indent.min(text.len());
            lines.push(text[indent..].to_string());

            match self.read_block_line()?
            {
                BlockOutcome::EndOfBlock => break,
                BlockOutcome::Line(_) => {},
            }
        }

        Ok(lines)
    }

    /// Run `f` over a block nested at `block_pos`, restoring
    /// `block_indent`/`blocklevel` once `f` returns, whether or
    /// not it succeeded.
    pub(crate) fn parse_nested_block(&mut self, block_pos: usize, f: ConvSpecFn<S>) -> Result<Value>
    {
        if self.blocklevel >= self.max_blocklevel
        {
            return Err(self.err_at(self.current_indent(), "Too many nested blocks"));
        }

        self.blocklevel += 1;
        let saved_block_indent = self.block_indent;
        self.block_indent = block_pos;

        let result = f(self);

        self.block_indent = saved_block_indent;
        self.blocklevel -= 1;

        result
    }

    /// Like [`Self::parse_nested_block`], but the nested block
    /// starts on the line after the current one (a convspec, a
    /// map value or a list item with nothing else on its line).
    pub(crate) fn parse_nested_block_from_next_line(&mut self, f: ConvSpecFn<S>) -> Result<Value>
    {
        self.block_indent += 1;
        self.skip_comments = true;
        let status = self.read_block_line();
        self.block_indent -= 1;

        match status?
        {
            BlockOutcome::EndOfBlock => Err(self.err_at(self.current_indent(), "Empty block")),
            BlockOutcome::Line(_) =>
            {
                let block_pos = self.block_indent + 1;

                self.parse_nested_block(block_pos, f)
            },
        }
    }

    pub(crate) fn current_text(&self) -> &str
    {
        self.current.as_ref().map_or("", |l| l.text.as_str())
    }

    pub(crate) fn current_indent(&self) -> usize
    {
        self.current.as_ref().map_or(0, |l| l.indent)
    }

    pub(crate) fn line_number(&self) -> u64
    {
        self.current.as_ref().map_or_else(|| self.line_reader.line_number(), |l| l.number)
    }

    pub(crate) fn byte_at(&self, pos: usize) -> Option<u8>
    {
        self.current_text().as_bytes().get(pos).copied()
    }

    fn byte_is_eol(&self, pos: usize) -> bool
    {
        pos >= self.current_text().len()
    }

    /// `true` if `self.current_text()[start..]` begins with
    /// `literal`, byte for byte.
    fn substring_eq(&self, start: usize, literal: &str) -> bool
    {
        self.current_text().as_bytes().get(start..start + literal.len()) == Some(literal.as_bytes())
    }

    /// The position of the first non-space byte of the value on
    /// the current line: either `current_indent()`, if the line
    /// dedented past `block_indent` already, or the first
    /// non-space byte at or after `block_indent`.
    pub(crate) fn start_position(&self) -> usize
    {
        if self.block_indent < self.current_indent()
        {
            self.current_indent()
        }
        else
        {
            scalar::skip_spaces(self.current_text(), self.block_indent)
        }
    }

    #[track_caller]
    pub(crate) fn err_at(&self, pos: usize, message: impl Into<String>) -> crate::error::Error
    {
        internal::Error::parse(self.line_number(), pos as u64 + 1, message).into()
    }

    pub(crate) fn lookup_convspec(&self, name: &str) -> Option<ConvSpecFn<S>>
    {
        self.custom_parsers.get(name).copied()
    }
}

/// The default value dispatcher, used wherever a map key or
/// list item has no per-value conversion specifier.
pub(crate) fn parse_value_entry<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_value()
}

/// Returned by [`ParserBuilder::register_conversion`] when the
/// given name collides with one of the six built-in specifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedName(String);

impl fmt::Display for ReservedName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "\"{}\" is a built-in conversion specifier and cannot be overridden", self.0)
    }
}

impl StdError for ReservedName {}

const BUILTIN_CONVSPECS: &[&str] = &["raw", "literal", "folded", "datetime", "timestamp", "json"];

/// Builder for a [`Parser`], letting callers register custom
/// conversion specifiers and raise the block/JSON recursion
/// limits before parsing begins.
pub struct ParserBuilder<S>
{
    parser: Parser<S>,
}

impl<S: Source> ParserBuilder<S>
{
    pub fn new(source: S) -> Self
    {
        Self {
            parser: Parser::new(source),
        }
    }

    /// Raise or lower the maximum nesting depth of lists, maps
    /// and convspec-introduced blocks. Defaults to 100.
    pub fn max_blocklevel(mut self, limit: u32) -> Self
    {
        self.parser.max_blocklevel = limit;

        self
    }

    /// Raise or lower the maximum nesting depth of `:json:`
    /// arrays/objects. Defaults to 100.
    pub fn max_json_depth(mut self, limit: u32) -> Self
    {
        self.parser.max_json_depth = limit;

        self
    }

    /// Register a custom conversion specifier under `name`.
    ///
    /// Fails if `name` collides with one of the six built-ins
    /// (`raw`, `literal`, `folded`, `datetime`, `timestamp`,
    /// `json`), which can never be overridden.
    pub fn register_conversion(
        mut self,
        name: impl Into<String>,
        f: ConvSpecFn<S>,
    ) -> std::result::Result<Self, ReservedName>
    {
        let name = name.into();

        if BUILTIN_CONVSPECS.contains(&name.as_str())
        {
            return Err(ReservedName(name));
        }

        self.parser.custom_parsers.insert(name, f);

        Ok(self)
    }

    pub fn build(self) -> Parser<S>
    {
        self.parser
    }

    /// Build and immediately parse a document, consuming the
    /// builder.
    pub fn parse(self) -> Result<Value>
    {
        self.build().parse_document()
    }

    /// Build and immediately parse a single JSON value,
    /// consuming the builder.
    pub fn parse_json(self) -> Result<Value>
    {
        self.build().parse_json_document()
    }
}

impl<S: Source> Parser<S>
{
    /// Parse the whole source as a single top-level value.
    pub fn parse(mut self) -> Result<Value>
    {
        self.parse_document()
    }

    /// Parse the whole source as a single top-level JSON value.
    pub fn parse_json(mut self) -> Result<Value>
    {
        self.parse_json_document()
    }
}
