/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Map parsing: a run of keys sharing one indent, each
//! introduced by a key-value separator already recognised by
//! the caller.

use crate::{
    block::BlockOutcome,
    error::Result,
    parser::{parse_value_entry, ConvSpecFn, Parser},
    reader::Source,
    scalar,
    value::{Map, Value},
};

impl<S: Source> Parser<S>
{
    /// Parse a map whose first key (`first_key`, already
    /// resolved to a scalar) and key-value separator have been
    /// consumed; `first_value_pos` is where the first value
    /// starts, and `first_convspec` is the per-value specifier
    /// named after that separator, if any.
    pub(crate) fn parse_map(
        &mut self,
        first_key: Value,
        first_convspec: Option<ConvSpecFn<S>>,
        first_value_pos: usize,
    ) -> Result<Value>
    {
        let mut result = Map::new();
        let key_indent = self.start_position();

        let mut key = first_key;
        let mut convspec = first_convspec;
        let mut value_pos = first_value_pos;

        loop
        {
            let parser_func = convspec.unwrap_or(parse_value_entry);

            let value = if scalar::rest_is_blank_or_comment(self.current_text(), value_pos)
            {
                self.parse_nested_block_from_next_line(parser_func)?
            }
            else
            {
                self.parse_nested_block(value_pos, parser_func)?
            };

            result.insert(key_text(&key), value);

            match self.read_block_line()?
            {
                BlockOutcome::EndOfBlock => break,
                BlockOutcome::Line(_) => {},
            }

            if self.current_indent() != key_indent
            {
                return Err(self.err_at(self.current_indent(), "Bad indentation of map key"));
            }

            let (next_key, next_value_pos, next_convspec) = self.parse_key()?;

            key = next_key;
            value_pos = next_value_pos;
            convspec = next_convspec;
        }

        Ok(Value::Map(result))
    }
}

/// Stringify a scalar map key for insertion into [`Map`].
///
/// Deliberately distinct from `Display for Value`, which
/// debug-quotes `Value::String` -- that would corrupt a plain
/// string key.
fn key_text(value: &Value) -> String
{
    match value
    {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::SignedInt(n) => n.to_string(),
        Value::UnsignedInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        _ => unreachable!("map keys only ever resolve to a scalar"),
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
    fn flat_map_of_scalars() -> anyhow::Result<()>
    {
        let value = parse("a: 1\nb: 2\n")?;
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::SignedInt(1)));
        assert_eq!(map.get("b"), Some(&Value::SignedInt(2)));

        Ok(())
    }

    #[test]
    fn non_string_scalar_key_is_stringified() -> anyhow::Result<()>
    {
        let value = parse("true: yes\n")?;
        let map = value.as_map().unwrap();
        assert_eq!(map.get("true"), Some(&Value::String("yes".into())));

        Ok(())
    }

    #[test]
    fn nested_map_value() -> anyhow::Result<()>
    {
        let value = parse("outer:\n  inner: 1\n")?;
        let outer = value.as_map().unwrap().get("outer").unwrap().as_map().unwrap();
        assert_eq!(outer.get("inner"), Some(&Value::SignedInt(1)));

        Ok(())
    }

    #[test]
    fn mismatched_key_indentation_is_an_error()
    {
        assert!(parse("a: 1\n  b: 2\n").is_err());
    }
}
