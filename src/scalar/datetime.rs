/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Date-time literal lexing: `YYYY[-]MM[-]DD(T| )HH[:]MM[:]SS[.frac][zone]`.

use atoi::atoi;

use crate::{scalar::LexError, value::DateTime};

/// Parse a date-time starting at `line[start..]`.
///
/// No calendar validation beyond field width is performed --
/// `2024-02-30` is accepted, matching the lack of a proleptic
/// calendar check in the format this lexer is modelled on.
pub(crate) fn parse_datetime(line: &str, start: usize) -> Result<(DateTime, usize), LexError>
{
    let bytes = line.as_bytes();
    let mut pos = start;

    let year = fixed_field(bytes, &mut pos, 4)?;
    optional_sep(bytes, &mut pos, b'-');
    let month = fixed_field(bytes, &mut pos, 2)?;
    optional_sep(bytes, &mut pos, b'-');
    let day = fixed_field(bytes, &mut pos, 2)?;

    let mut dt = DateTime {
        year:   year as u16,
        month:  month as u8,
        day:    day as u8,
        hour:   0,
        minute: 0,
        second: 0,
        nanosecond: 0,
        gmt_offset_minutes: None,
    };

    let has_time = match bytes.get(pos)
    {
        Some(b'T') | Some(b't') =>
        {
            pos += 1;
            true
        },
        Some(b' ') =>
        {
            pos += 1;
            true
        },
        _ => false,
    };

    if !has_time
    {
        return Ok((dt, pos));
    }

    dt.hour = fixed_field(bytes, &mut pos, 2)? as u8;
    optional_sep(bytes, &mut pos, b':');
    dt.minute = fixed_field(bytes, &mut pos, 2)? as u8;
    optional_sep(bytes, &mut pos, b':');
    dt.second = fixed_field(bytes, &mut pos, 2)? as u8;

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
            return Err(LexError::new(pos, "Bad date/time"));
        }

        let frac = &line[frac_start..pos];
        let scale = 9 - frac.len();
        let value: u32 = atoi(frac.as_bytes()).ok_or_else(|| LexError::new(frac_start, "Bad date/time"))?;
        dt.nanosecond = value * 10u32.pow(scale as u32);

        while matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
        {
            pos += 1;
        }
    }

    match bytes.get(pos)
    {
        Some(b'Z') | Some(b'z') =>
        {
            pos += 1;
            dt.gmt_offset_minutes = Some(0);
        },
        Some(b'+') | Some(b'-') =>
        {
            let negative = bytes[pos] == b'-';
            pos += 1;

            let zone_hour = fixed_field(bytes, &mut pos, 2)?;
            optional_sep(bytes, &mut pos, b':');
            let zone_minute = if matches!(bytes.get(pos), Some(b) if b.is_ascii_digit())
            {
                fixed_field(bytes, &mut pos, 2)?
            }
            else
            {
                0
            };

            let total = (zone_hour * 60 + zone_minute) as i16;
            dt.gmt_offset_minutes = Some(if negative { -total } else { total });
        },
        _ => {},
    }

    Ok((dt, pos))
}

fn fixed_field(bytes: &[u8], pos: &mut usize, width: usize) -> Result<u32, LexError>
{
    let start = *pos;

    if start + width > bytes.len() || !bytes[start..start + width].iter().all(u8::is_ascii_digit)
    {
        return Err(LexError::new(start, "Bad date/time"));
    }

    let value = atoi(&bytes[start..start + width]).ok_or_else(|| LexError::new(start, "Bad date/time"))?;
    *pos += width;

    Ok(value)
}

fn optional_sep(bytes: &[u8], pos: &mut usize, sep: u8)
{
    if bytes.get(*pos) == Some(&sep)
    {
        *pos += 1;
    }
}
