/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Backslash-escape processing shared by quoted strings and
//! JSON strings.

use crate::scalar::LexError;

/// Unescape a single logical line of quoted-string content.
///
/// A trailing lone backslash (no following character) is
/// emitted literally, matching a line that continues onto the
/// next physical line of a multi-line quoted string.
pub(crate) fn unescape(s: &str) -> Result<String, LexError>
{
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;

    while pos < bytes.len()
    {
        if bytes[pos] != b'\\'
        {
            let ch_len = utf8_len(bytes[pos]);
            out.push_str(&s[pos..pos + ch_len]);
            pos += ch_len;
            continue;
        }

        let escape_start = pos;
        pos += 1;

        let Some(&marker) = bytes.get(pos) else {
            // Lone trailing backslash.
            out.push('\\');
            break;
        };

        match marker
        {
            b'\'' =>
            {
                out.push('\'');
                pos += 1;
            },
            b'"' =>
            {
                out.push('"');
                pos += 1;
            },
            b'?' =>
            {
                out.push('?');
                pos += 1;
            },
            b'\\' =>
            {
                out.push('\\');
                pos += 1;
            },
            b'a' =>
            {
                out.push('\u{07}');
                pos += 1;
            },
            b'b' =>
            {
                out.push('\u{08}');
                pos += 1;
            },
            b'f' =>
            {
                out.push('\u{0C}');
                pos += 1;
            },
            b'n' =>
            {
                out.push('\n');
                pos += 1;
            },
            b'r' =>
            {
                out.push('\r');
                pos += 1;
            },
            b't' =>
            {
                out.push('\t');
                pos += 1;
            },
            b'v' =>
            {
                out.push('\u{0B}');
                pos += 1;
            },
            b'o' =>
            {
                pos += 1;
                let (value, consumed) = take_digits(bytes, pos, 8, 1, 3)
                    .ok_or_else(|| LexError::new(escape_start, "Bad octal escape"))?;
                pos += consumed;
                push_code_point(&mut out, value, escape_start)?;
            },
            b'x' =>
            {
                pos += 1;
                let (value, consumed) = take_digits(bytes, pos, 16, 2, 2)
                    .ok_or_else(|| LexError::new(escape_start, "Bad hex escape"))?;
                pos += consumed;
                push_code_point(&mut out, value, escape_start)?;
            },
            b'u' =>
            {
                pos += 1;
                let (value, consumed) = take_digits(bytes, pos, 16, 4, 4)
                    .ok_or_else(|| LexError::new(escape_start, "Bad unicode escape"))?;
                pos += consumed;
                push_code_point(&mut out, value, escape_start)?;
            },
            b'U' =>
            {
                pos += 1;
                let (value, consumed) = take_digits(bytes, pos, 16, 8, 8)
                    .ok_or_else(|| LexError::new(escape_start, "Bad unicode escape"))?;
                pos += consumed;
                push_code_point(&mut out, value, escape_start)?;
            },
            other =>
            {
                out.push('\\');
                let ch_len = utf8_len(other);
                out.push_str(&s[pos..pos + ch_len]);
                pos += ch_len;
            },
        }
    }

    Ok(out)
}

fn push_code_point(out: &mut String, value: u32, escape_start: usize) -> Result<(), LexError>
{
    let ch = char::from_u32(value)
        .ok_or_else(|| LexError::new(escape_start, "Escape sequence is not a valid code point"))?;

    out.push(ch);

    Ok(())
}

/// Consume between `min` and `max` digits of the given radix
/// starting at `pos`, requiring at least `min`. Returns the
/// accumulated value and the number of bytes consumed.
fn take_digits(bytes: &[u8], pos: usize, radix: u32, min: usize, max: usize) -> Option<(u32, usize)>
{
    let mut value: u32 = 0;
    let mut count = 0;

    while count < max
    {
        let digit = match bytes.get(pos + count)
        {
            Some(&b) => match (b as char).to_digit(radix)
            {
                Some(d) => d,
                None => break,
            },
            None => break,
        };

        value = value * radix + digit;
        count += 1;
    }

    if count < min
    {
        return None;
    }

    Some((value, count))
}

fn utf8_len(first_byte: u8) -> usize
{
    match first_byte
    {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
