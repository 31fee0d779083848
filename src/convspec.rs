/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The six built-in conversion specifiers (C5): `raw`,
//! `literal`, `folded`, `datetime`, `timestamp` and `json`.
//! Each is registered under its name in [`Parser::new`] and can
//! also be reached directly -- `raw`/`literal` are themselves
//! the fallback used for a bare literal string that carries no
//! `:NAME:` prefix.

use crate::{
    error::Result,
    parser::Parser,
    reader::Source,
    scalar::{self, fold},
    value::Value,
};

impl<S: Source> Parser<S>
{
    /// The whole current block, lines joined by `\n` with no
    /// dedenting or whitespace normalisation.
    pub(crate) fn parse_raw_value(&mut self) -> Result<Value>
    {
        let mut lines = self.read_block()?;

        if lines.len() > 1
        {
            lines.push(String::new());
        }

        Ok(Value::String(lines.join("\n")))
    }

    /// The current block, dedented and with trailing empty
    /// lines dropped.
    pub(crate) fn parse_literal_string(&mut self) -> Result<Value>
    {
        let lines = self.read_block()?;
        let mut lines = fold::dedent(&lines);

        while matches!(lines.last(), Some(l) if l.is_empty())
        {
            lines.pop();
        }

        if lines.len() > 1
        {
            lines.push(String::new());
        }

        Ok(Value::String(lines.join("\n")))
    }

    /// The current block, folded per [`fold::fold_lines`].
    pub(crate) fn parse_folded_string(&mut self) -> Result<Value>
    {
        let lines = self.read_block()?;

        Ok(Value::String(fold::fold_lines(&lines)))
    }

    pub(crate) fn parse_datetime_value(&mut self) -> Result<Value>
    {
        let pos = self.start_position();
        let line_number = self.line_number();
        let (dt, end) = scalar::datetime::parse_datetime(self.current_text(), pos).map_err(|e| e.at_line(line_number))?;

        let trailing = scalar::skip_spaces(self.current_text(), end);

        if !scalar::is_comment_or_eol(self.current_text(), trailing)
        {
            return Err(self.err_at(trailing, "Bad date/time"));
        }

        Ok(Value::DateTime(dt))
    }

    pub(crate) fn parse_timestamp_value(&mut self) -> Result<Value>
    {
        let pos = self.start_position();
        let line_number = self.line_number();
        let (ts, end) = scalar::timestamp::parse_timestamp(self.current_text(), pos).map_err(|e| e.at_line(line_number))?;

        let trailing = scalar::skip_spaces(self.current_text(), end);

        if !scalar::is_comment_or_eol(self.current_text(), trailing)
        {
            return Err(self.err_at(trailing, "Bad timestamp"));
        }

        Ok(Value::Timestamp(ts))
    }
}

pub(crate) fn raw<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_raw_value()
}

pub(crate) fn literal<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_literal_string()
}

pub(crate) fn folded<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_folded_string()
}

pub(crate) fn datetime<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_datetime_value()
}

pub(crate) fn timestamp<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_timestamp_value()
}

pub(crate) fn json<S: Source>(parser: &mut Parser<S>) -> Result<Value>
{
    parser.parse_json_block_value()
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use crate::{parser::Parser, reader::StrSource, value::Value};

    fn parse(data: &str) -> crate::error::Result<Value>
    {
        Parser::new(StrSource::new(data)).parse()
    }

    #[test]
    fn raw_preserves_indentation() -> anyhow::Result<()>
    {
        let value = parse(":raw:\n  one\n    two\n")?;
        assert_eq!(value, Value::String("one\n  two\n".into()));

        Ok(())
    }

    #[test]
    fn literal_dedents_and_drops_trailing_blanks() -> anyhow::Result<()>
    {
        let value = parse(":literal:\n  one\n  two\n\n")?;
        assert_eq!(value, Value::String("one\ntwo\n".into()));

        Ok(())
    }

    #[test]
    fn folded_joins_with_spaces() -> anyhow::Result<()>
    {
        let value = parse(":folded:\n  one\n  two\n")?;
        assert_eq!(value, Value::String("one two".into()));

        Ok(())
    }

    #[test]
    fn datetime_parses_and_checks_trailing_content() -> anyhow::Result<()>
    {
        let value = parse(":datetime: 2024-02-30T11:22:33Z\n")?;
        match value
        {
            Value::DateTime(dt) => assert_eq!((dt.year, dt.month, dt.day), (2024, 2, 30)),
            other => panic!("expected datetime, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn datetime_with_garbage_after_it_is_an_error()
    {
        assert!(parse(":datetime: 2024-02-30 garbage\n").is_err());
    }

    #[test]
    fn timestamp_parses() -> anyhow::Result<()>
    {
        let value = parse(":timestamp: 1700000000.5\n")?;
        match value
        {
            Value::Timestamp(ts) => assert_eq!(ts.seconds, 1700000000),
            other => panic!("expected timestamp, got {other:?}"),
        }

        Ok(())
    }
}
