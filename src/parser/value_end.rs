/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Key-value separator recognition (§4.4.1) and the
//! value-end post-check (§4.4.4): together these decide
//! whether a just-lexed scalar is a standalone value, the
//! first key of a map, or (when a key was expected) the next
//! key in an already-open map.

use crate::{
    error::Result,
    parser::{ConvSpecFn, Parser},
    reader::Source,
    scalar,
    value::Value,
};

impl<S: Source> Parser<S>
{
    /// Parse a `:NAME:` conversion specifier opening at
    /// `opening_colon_pos`. Returns the trimmed name and the
    /// position just past the closing colon, or `None` if
    /// this isn't a registered specifier (in which case the
    /// caller treats the leading `:` as ordinary content).
    pub(crate) fn parse_convspec(&self, opening_colon_pos: usize) -> Option<(String, usize)>
    {
        let text = self.current_text();
        let start = opening_colon_pos + 1;
        let closing = text[start..].find(':').map(|i| start + i)?;

        if closing == start
        {
            // Empty conversion specifier `::`.
            return None;
        }

        if !self.byte_is_space_or_eol(closing + 1)
        {
            return None;
        }

        let name = text[start..closing].trim().to_string();

        self.lookup_convspec(&name)?;

        Some((name, closing + 1))
    }

    /// `true` if `colon_pos` introduces the value of a map
    /// entry. Returns the position of the value and, if the
    /// key was followed by a per-value conversion specifier,
    /// its name.
    pub(crate) fn key_value_separator(&self, colon_pos: usize) -> Option<(usize, Option<String>)>
    {
        let text = self.current_text();
        let bytes = text.as_bytes();
        let mut probe = colon_pos + 1;

        let Some(&next) = bytes.get(probe) else {
            return Some((probe, None));
        };

        match next
        {
            b' ' | b'\t' =>
            {
                // Value must be separated from key by at least one space.
                let value_pos = probe + 1;
                probe = scalar::skip_spaces(text, probe);

                if bytes.get(probe) != Some(&b':')
                {
                    return Some((value_pos, None));
                }
            },
            b':' => {},
            _ => return None,
        }

        let (name, value_pos) = self.parse_convspec(probe)?;

        Some((value_pos, Some(name)))
    }

    /// `true` if `pos` is past end-of-line or lands on a
    /// whitespace byte.
    pub(crate) fn byte_is_space_or_eol(&self, pos: usize) -> bool
    {
        match self.current_text().as_bytes().get(pos)
        {
            None => true,
            Some(b) => b.is_ascii_whitespace(),
        }
    }

    /// Post-check after parsing a scalar that can never be a
    /// map key context (it was parsed as a plain value). A
    /// key-value separator found here means the scalar was
    /// actually the first key of a map.
    pub(crate) fn check_value_end(&mut self, value: Value, end_pos: usize) -> Result<Value>
    {
        let end_pos = scalar::skip_spaces(self.current_text(), end_pos);

        let Some(&chr) = self.current_text().as_bytes().get(end_pos) else {
            self.read_block_line()?;

            return Ok(value);
        };

        match chr
        {
            b':' => match self.key_value_separator(end_pos)
            {
                Some((value_pos, name)) =>
                {
                    let convspec = name.and_then(|n| self.lookup_convspec(&n));

                    self.parse_map(value, convspec, value_pos)
                },
                None => Err(self.err_at(end_pos + 1, "Bad character encountered")),
            },
            b'#' =>
            {
                self.read_block_line()?;

                Ok(value)
            },
            _ => Err(self.err_at(end_pos, "Bad character encountered")),
        }
    }

    /// Post-check after parsing a scalar that is expected to
    /// be a map key: it must end in a valid key-value
    /// separator, same-line or otherwise.
    pub(crate) fn check_value_end_key(
        &mut self,
        value: Value,
        end_pos: usize,
    ) -> Result<(Value, usize, Option<ConvSpecFn<S>>)>
    {
        let end_pos = scalar::skip_spaces(self.current_text(), end_pos);

        let Some(&chr) = self.current_text().as_bytes().get(end_pos) else {
            return Err(self.err_at(end_pos, "Map key expected"));
        };

        if chr != b':'
        {
            return Err(self.err_at(end_pos, "Map key expected"));
        }

        match self.key_value_separator(end_pos)
        {
            Some((value_pos, name)) =>
            {
                let convspec = name.and_then(|n| self.lookup_convspec(&n));

                Ok((value, value_pos, convspec))
            },
            None => Err(self.err_at(end_pos + 1, "Bad character encountered")),
        }
    }
}
