/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! List parsing: a run of `-`-led items sharing one indent.

use crate::{
    block::BlockOutcome,
    error::Result,
    parser::{parse_value_entry, Parser},
    reader::Source,
    scalar,
    value::Value,
};

impl<S: Source> Parser<S>
{
    /// Parse a list starting at the current `-` item.
    pub(crate) fn parse_list(&mut self) -> Result<Value>
    {
        let mut result = Vec::new();
        let item_indent = self.start_position();

        loop
        {
            let next_pos = item_indent + 1;

            if !self.byte_is_space_or_eol(next_pos)
            {
                return Err(self.err_at(item_indent, "Bad list item"));
            }

            let item = if scalar::rest_is_blank_or_comment(self.current_text(), next_pos)
            {
                self.parse_nested_block_from_next_line(parse_value_entry)?
            }
            else
            {
                self.parse_nested_block(next_pos + 1, parse_value_entry)?
            };

            result.push(item);

            match self.read_block_line()?
            {
                BlockOutcome::EndOfBlock => break,
                BlockOutcome::Line(_) => {},
            }

            if self.current_indent() != item_indent
            {
                return Err(self.err_at(self.current_indent(), "Bad indentation of list item"));
            }
        }

        Ok(Value::List(result))
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::StrSource;

    fn parse(data: &str) -> Result<Value>
    {
        Parser::new(StrSource::new(data)).parse()
    }

    #[test]
    fn flat_list_of_numbers() -> anyhow::Result<()>
    {
        let value = parse("- 1\n- 2\n- 3\n")?;
        assert_eq!(
            value,
            Value::List(vec![Value::SignedInt(1), Value::SignedInt(2), Value::SignedInt(3)])
        );

        Ok(())
    }

    #[test]
    fn item_value_on_next_line() -> anyhow::Result<()>
    {
        let value = parse("-\n  hello\n")?;
        assert_eq!(value, Value::List(vec![Value::String("hello".into())]));

        Ok(())
    }

    #[test]
    fn mismatched_item_indentation_is_an_error()
    {
        assert!(parse("- 1\n  - 2\n").is_err());
    }

    #[test]
    fn hyphen_not_followed_by_space_is_bad_list_item()
    {
        assert!(parse("- 1\n-nope\n").is_err());
    }
}
