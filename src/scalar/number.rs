/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Multi-radix integer and float lexing.

use crate::{scalar::LexError, value::Value};

const SIGNED_MAX: u64 = i64::MAX as u64;

/// A lexed number, together with how many bytes of `line`
/// (from `start`) it consumed.
pub(crate) struct Number
{
    pub value: Value,
    pub end:   usize,
}

/// Lex a number starting at `line[start..]`. `start` must
/// point at a digit (the sign, if any, is consumed by the
/// caller and passed as `negative`).
///
/// `terminators` lists additional bytes (besides whitespace
/// and end-of-line) that legally end the literal.
pub(crate) fn parse_number(
    line: &str,
    start: usize,
    negative: bool,
    terminators: &[u8],
) -> Result<Number, LexError>
{
    let bytes = line.as_bytes();

    let (radix, digits_start) = match bytes.get(start)
    {
        Some(b'0') => match bytes.get(start + 1)
        {
            Some(b'b') | Some(b'B') => (2, start + 2),
            Some(b'o') | Some(b'O') => (8, start + 2),
            Some(b'x') | Some(b'X') => (16, start + 2),
            _ => (10, start),
        },
        _ => (10, start),
    };

    if radix != 10 && !matches!(bytes.get(digits_start).copied().and_then(digit_value), Some(d) if (d as u64) < radix)
    {
        return Err(LexError::new(start, "Bad number"));
    }

    let (magnitude, mut pos) = scan_unsigned(bytes, digits_start, radix)?;

    let is_float_candidate = radix == 10
        && matches!(bytes.get(pos), Some(b'.') | Some(b'e') | Some(b'E'));

    if matches!(bytes.get(pos), Some(b'.') | Some(b'e') | Some(b'E')) && radix != 10
    {
        return Err(LexError::new(
            pos,
            "Only decimal representation is supported for floating point numbers",
        ));
    }

    if is_float_candidate
    {
        let (float_value, end) = scan_float_tail(bytes, start, pos, negative)?;

        return Ok(Number {
            value: Value::Float(float_value),
            end,
        });
    }

    if let Some(&b) = bytes.get(pos)
    {
        if !b.is_ascii_whitespace() && !terminators.contains(&b)
        {
            return Err(LexError::new(pos, "Bad number"));
        }
    }

    let value = if negative
    {
        if magnitude > SIGNED_MAX
        {
            return Err(LexError::new(start, "Numeric overflow"));
        }

        Value::SignedInt(-(magnitude as i64))
    }
    else if magnitude <= SIGNED_MAX
    {
        Value::SignedInt(magnitude as i64)
    }
    else
    {
        Value::UnsignedInt(magnitude)
    };

    // `pos` above already points one-past the last digit.
    let _ = &mut pos;

    Ok(Number { value, end: pos })
}

fn scan_float_tail(
    bytes: &[u8],
    literal_start: usize,
    mut pos: usize,
    negative: bool,
) -> Result<(f64, usize), LexError>
{
    if bytes.get(pos) == Some(&b'.')
    {
        pos += 1;
        let mut any = false;

        while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
        {
            pos += 1;
            any = true;
        }

        if !any
        {
            return Err(LexError::new(pos, "Bad number"));
        }
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E'))
    {
        pos += 1;

        if matches!(bytes.get(pos), Some(b'+') | Some(b'-'))
        {
            pos += 1;
        }

        let mut any = false;

        while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
        {
            pos += 1;
            any = true;
        }

        if !any
        {
            return Err(LexError::new(pos, "Bad number"));
        }
    }

    let literal = std::str::from_utf8(&bytes[literal_start..pos]).expect("ascii-only literal");

    let parsed: f64 = literal
        .parse()
        .map_err(|_| LexError::new(literal_start, "Floating point conversion error"))?;

    if parsed.is_infinite()
    {
        return Err(LexError::new(literal_start, "Floating point overflow"));
    }

    Ok((if negative { -parsed } else { parsed }, pos))
}

/// Accumulate an unsigned integer starting at `bytes[pos..]`
/// in the given `radix`, honouring `'`/`_` digit separators.
///
/// Returns the magnitude and the position just past the last
/// digit consumed.
fn scan_unsigned(bytes: &[u8], mut pos: usize, radix: u64) -> Result<(u64, usize), LexError>
{
    let mut value: u64 = 0;
    let mut last_was_separator = false;
    let mut saw_digit = false;
    let digits_start = pos;

    while let Some(&b) = bytes.get(pos)
    {
        if b == b'\'' || b == b'_'
        {
            if last_was_separator || !saw_digit
            {
                return Err(LexError::new(pos, "Bad number"));
            }

            last_was_separator = true;
            pos += 1;
            continue;
        }

        let digit = match digit_value(b)
        {
            Some(d) if (d as u64) < radix => d as u64,
            _ => break,
        };

        if value > u64::MAX / radix
        {
            return Err(LexError::new(digits_start, "Numeric overflow"));
        }

        let next = value * radix + digit;

        if next < value
        {
            return Err(LexError::new(digits_start, "Numeric overflow"));
        }

        value = next;
        saw_digit = true;
        last_was_separator = false;
        pos += 1;
    }

    if last_was_separator
    {
        return Err(LexError::new(pos, "Bad number"));
    }

    if !saw_digit
    {
        return Err(LexError::new(pos, "Bad number"));
    }

    Ok((value, pos))
}

fn digit_value(b: u8) -> Option<u8>
{
    match b
    {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    fn num(line: &str, negative: bool) -> Value
    {
        let start = if negative { 1 } else { 0 };

        parse_number(line, start, negative, b"#:").unwrap().value
    }

    #[test]
    fn decimal_signed()
    {
        assert_eq!(num("42", false), Value::SignedInt(42));
        assert_eq!(num("-3", true), Value::SignedInt(-3));
    }

    #[test]
    fn hex_with_separators()
    {
        assert_eq!(num("0xFF_FF", false), Value::UnsignedInt(0xFFFF));
    }

    #[test]
    fn binary_and_octal()
    {
        assert_eq!(num("0b101", false), Value::SignedInt(5));
        assert_eq!(num("0o17", false), Value::SignedInt(15));
    }

    #[test]
    fn float_with_exponent()
    {
        match num("1.5e2", false)
        {
            Value::Float(f) => assert!((f - 150.0).abs() < f64::EPSILON),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn leading_separator_is_an_error()
    {
        assert!(parse_number("_1", 0, false, b"#:").is_err());
    }

    #[test]
    fn trailing_separator_is_an_error()
    {
        assert!(parse_number("1_", 0, false, b"#:").is_err());
    }

    #[test]
    fn radix_prefix_with_no_digits_is_an_error()
    {
        let err = parse_number("0b", 0, false, b"#:").unwrap_err();
        assert_eq!(err.column, 0);
    }

    #[test]
    fn radix_prefix_with_no_digits_reports_column_of_leading_zero()
    {
        // "bad: 0b\n" -- the `0` sits at column 5 (0-based) of the
        // line; parse_value hands the lexer `start` pointing there.
        let err = parse_number("bad: 0b", 5, false, b"#:").unwrap_err();
        assert_eq!(err.column, 5);
    }

    #[test]
    fn non_decimal_float_syntax_is_rejected()
    {
        let err = parse_number("0x1.5", 0, false, b"#:").unwrap_err();
        assert_eq!(
            err.message,
            "Only decimal representation is supported for floating point numbers"
        );
    }

    #[test]
    fn unsigned_promotion_above_signed_max()
    {
        assert_eq!(
            num("9223372036854775808", false),
            Value::UnsignedInt(9223372036854775808)
        );
    }

    #[test]
    fn negative_overflow_past_signed_max()
    {
        assert!(parse_number("9223372036854775808", 1, true, b"#:").is_err());
    }
}
