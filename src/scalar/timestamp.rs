/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Unix-timestamp literal lexing: `SECONDS[.FRAC]`.

use crate::{scalar::LexError, value::Timestamp};

/// Parse a timestamp starting at `line[start..]`. Trailing
/// whitespace or a `#` comment is permitted; anything else
/// after the value is left for the caller to reject.
pub(crate) fn parse_timestamp(line: &str, start: usize) -> Result<(Timestamp, usize), LexError>
{
    let bytes = line.as_bytes();
    let mut pos = start;

    let digits_start = pos;

    while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
    {
        pos += 1;
    }

    if pos == digits_start
    {
        return Err(LexError::new(pos, "Bad timestamp"));
    }

    let seconds: u64 = line[digits_start..pos]
        .parse()
        .map_err(|_| LexError::new(digits_start, "Timestamp seconds overflow"))?;

    let mut nanoseconds: u32 = 0;

    if bytes.get(pos) == Some(&b'.')
    {
        pos += 1;
        let frac_start = pos;

        while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit()) && pos - frac_start < 9
        {
            pos += 1;
        }

        if pos == frac_start
        {
            return Err(LexError::new(pos, "Bad timestamp"));
        }

        let frac = &line[frac_start..pos];
        let scale = 9 - frac.len();
        let value: u32 = frac
            .parse()
            .map_err(|_| LexError::new(frac_start, "Bad timestamp"))?;

        nanoseconds = value * 10u32.pow(scale as u32);

        // Consume (but ignore) any further fractional digits
        // beyond nanosecond resolution.
        while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
        {
            pos += 1;
        }
    }

    Ok((
        Timestamp {
            seconds,
            nanoseconds,
        },
        pos,
    ))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn whole_seconds()
    {
        let (ts, end) = parse_timestamp("1700000000", 0).unwrap();
        assert_eq!(ts.seconds, 1700000000);
        assert_eq!(ts.nanoseconds, 0);
        assert_eq!(end, 10);
    }

    #[test]
    fn fractional_seconds_scaled_to_nanoseconds()
    {
        let (ts, _) = parse_timestamp("1700000000.5", 0).unwrap();
        assert_eq!(ts.seconds, 1700000000);
        assert_eq!(ts.nanoseconds, 500000000);
    }

    #[test]
    fn missing_digits_is_an_error()
    {
        assert!(parse_timestamp("abc", 0).is_err());
    }

    #[test]
    fn trailing_dot_with_no_digits_is_an_error()
    {
        assert!(parse_timestamp("5.", 0).is_err());
    }
}
