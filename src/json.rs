/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The embedded JSON sub-parser (C6), reached through the
//! `:json:` conversion specifier or [`Parser::parse_json`].
//! Reuses the line/block reader wholesale; only scalar lexing
//! and structural parsing differ from the rest of the crate.

use crate::{
    block::BlockOutcome,
    error::Result,
    parser::Parser,
    reader::Source,
    scalar::{self, number},
    value::{Map, Value},
};

const JSON_NUMBER_TERMINATORS: &[u8] = &[b'#', b':', b',', b'}', b']'];

impl<S: Source> Parser<S>
{
    pub(crate) fn parse_json_block_value(&mut self) -> Result<Value>
    {
        let start = self.start_position();
        let (value, end_pos) = self.parse_json_value(start)?;

        if scalar::rest_is_blank_or_comment(self.current_text(), end_pos)
        {
            match self.read_block_line()?
            {
                BlockOutcome::EndOfBlock => {},
                BlockOutcome::Line(_) =>
                {
                    return Err(self.err_at(self.current_indent(), "Extra data after parsed value"));
                },
            }
        }
        else
        {
            return Err(self.err_at(self.current_indent(), "Extra data after parsed value"));
        }

        Ok(value)
    }

    /// Skip whitespace and `#` comments, crossing line
    /// boundaries through the block reader as needed. Returns
    /// the first significant byte found and its position.
    fn json_skip_spaces(&mut self, mut pos: usize) -> Result<(u8, usize)>
    {
        loop
        {
            pos = scalar::skip_spaces(self.current_text(), pos);

            if let Some(chr) = self.byte_at(pos)
            {
                if chr != b'#'
                {
                    return Ok((chr, pos));
                }
            }

            match self.read_block_line()?
            {
                BlockOutcome::EndOfBlock => return Err(self.err_at(self.current_indent(), "Unexpected end of block")),
                BlockOutcome::Line(_) => {},
            }

            pos = self.current_indent();
        }
    }

    pub(crate) fn parse_json_value(&mut self, start_pos: usize) -> Result<(Value, usize)>
    {
        if self.json_depth >= self.max_json_depth
        {
            return Err(self.err_at(self.current_indent(), "Maximum recursion depth exceeded"));
        }

        let (chr, pos) = self.json_skip_spaces(start_pos)?;

        match chr
        {
            b'[' => self.parse_json_array(pos + 1),
            b'{' => self.parse_json_object(pos + 1),
            b'"' => self.parse_quoted_string(pos),
            b'+' | b'-' | b'0'..=b'9' => self.parse_json_number(pos),
            _ =>
            {
                if self.substring_eq(pos, "null")
                {
                    return Ok((Value::Null, pos + 4));
                }
                if self.substring_eq(pos, "true")
                {
                    return Ok((Value::Bool(true), pos + 4));
                }
                if self.substring_eq(pos, "false")
                {
                    return Ok((Value::Bool(false), pos + 5));
                }

                Err(self.err_at(pos, "Unexpected character"))
            },
        }
    }

    /// Unlike the AMW number lexer, the sign is consumed here
    /// before the shared scanner runs -- the original JSON
    /// wrapper passed the sign position straight through,
    /// letting a `-` masquerade as the first digit.
    fn parse_json_number(&mut self, start_pos: usize) -> Result<(Value, usize)>
    {
        let negative = self.byte_at(start_pos) == Some(b'-');
        let digits_start = if matches!(self.byte_at(start_pos), Some(b'+') | Some(b'-'))
        {
            start_pos + 1
        }
        else
        {
            start_pos
        };

        let line_number = self.line_number();
        let number = number::parse_number(self.current_text(), digits_start, negative, JSON_NUMBER_TERMINATORS)
            .map_err(|e| e.at_line(line_number))?;

        Ok((number.value, number.end))
    }

    fn parse_json_array(&mut self, pos: usize) -> Result<(Value, usize)>
    {
        self.json_depth += 1;
        let result = self.parse_json_array_body(pos);
        self.json_depth -= 1;

        result
    }

    fn parse_json_array_body(&mut self, pos: usize) -> Result<(Value, usize)>
    {
        let mut items = Vec::new();

        let (chr, mut pos) = self.json_skip_spaces(pos)?;

        if chr == b']'
        {
            return Ok((Value::List(items), pos + 1));
        }

        let (first, next) = self.parse_json_value(pos)?;
        items.push(first);
        pos = next;

        loop
        {
            let (chr, after_spaces) = self.json_skip_spaces(pos)?;

            if chr == b']'
            {
                return Ok((Value::List(items), after_spaces + 1));
            }
            if chr != b','
            {
                return Err(self.err_at(self.current_indent(), "Array items must be separated with comma"));
            }

            let (item, next) = self.parse_json_value(after_spaces + 1)?;
            items.push(item);
            pos = next;
        }
    }

    fn parse_json_object(&mut self, pos: usize) -> Result<(Value, usize)>
    {
        self.json_depth += 1;
        let result = self.parse_json_object_body(pos);
        self.json_depth -= 1;

        result
    }

    fn parse_json_object_body(&mut self, pos: usize) -> Result<(Value, usize)>
    {
        let mut result = Map::new();

        let (chr, pos) = self.json_skip_spaces(pos)?;

        if chr == b'}'
        {
            return Ok((Value::Map(result), pos + 1));
        }

        let mut pos = self.parse_json_member(pos, &mut result)?;

        loop
        {
            let (chr, after_spaces) = self.json_skip_spaces(pos)?;

            if chr == b'}'
            {
                return Ok((Value::Map(result), after_spaces + 1));
            }
            if chr != b','
            {
                return Err(self.err_at(self.current_indent(), "Object members must be separated with comma"));
            }

            pos = self.parse_json_member(after_spaces + 1, &mut result)?;
        }
    }

    fn parse_json_member(&mut self, pos: usize, result: &mut Map) -> Result<usize>
    {
        let (chr, pos) = self.json_skip_spaces(pos)?;

        if chr != b'"'
        {
            return Err(self.err_at(pos, "Unexpected character"));
        }

        let (key, pos) = self.parse_quoted_string(pos)?;

        let (chr, pos) = self.json_skip_spaces(pos)?;

        if chr != b':'
        {
            return Err(self.err_at(self.current_indent(), "Values must be separated from keys with colon"));
        }

        let (value, pos) = self.parse_json_value(pos + 1)?;

        let key_text = match key
        {
            Value::String(s) => s,
            _ => unreachable!("the quoted-string lexer always returns Value::String"),
        };

        result.insert(key_text, value);

        Ok(pos)
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::StrSource;

    fn parse_json(data: &str) -> Result<Value>
    {
        Parser::new(StrSource::new(data)).parse_json()
    }

    #[test]
    fn object_with_mixed_values() -> anyhow::Result<()>
    {
        let value = parse_json(r#"{"a": 1, "b": [true, false, null], "c": "hi"}"#)?;
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::SignedInt(1)));
        assert_eq!(
            map.get("b"),
            Some(&Value::List(vec![Value::Bool(true), Value::Bool(false), Value::Null]))
        );
        assert_eq!(map.get("c"), Some(&Value::String("hi".into())));

        Ok(())
    }

    #[test]
    fn negative_number_sign_is_consumed_before_scanning_digits() -> anyhow::Result<()>
    {
        let value = parse_json("-42")?;
        assert_eq!(value, Value::SignedInt(-42));

        Ok(())
    }

    #[test]
    fn nested_array_spanning_lines() -> anyhow::Result<()>
    {
        let value = parse_json("[\n  1,\n  2\n]")?;
        assert_eq!(value, Value::List(vec![Value::SignedInt(1), Value::SignedInt(2)]));

        Ok(())
    }

    #[test]
    fn unquoted_object_key_is_an_error()
    {
        assert!(parse_json("{a: 1}").is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error()
    {
        assert!(parse_json("1 2").is_err());
    }

    #[test]
    fn unterminated_array_is_an_error()
    {
        assert!(parse_json("[1, 2").is_err());
    }
}
