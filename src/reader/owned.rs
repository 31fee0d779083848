/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Source`](super::Source)
//! for any [`std::io::Read`].

use std::io;

use super::{private, Source};
use crate::error::Result;

/// A [`Source`] implementor backed by a buffered
/// [`std::io::Read`].
#[derive(Debug)]
pub struct IoSource<R>
{
    inner: R,
}

impl<R: io::BufRead> IoSource<R>
{
    /// Instantiate a new [`IoSource`] from an already-buffered
    /// reader.
    pub fn new(inner: R) -> Self
    {
        Self { inner }
    }
}

impl<R: io::Read> IoSource<io::BufReader<R>>
{
    /// Instantiate a new [`IoSource`], wrapping `inner` in a
    /// [`std::io::BufReader`].
    pub fn from_read(inner: R) -> Self
    {
        Self::new(io::BufReader::new(inner))
    }
}

impl<R: io::BufRead> Source for IoSource<R>
{
    fn next_line(&mut self, buf: &mut String) -> Result<bool>
    {
        buf.clear();

        let n = self.inner.read_line(buf)?;

        if n == 0
        {
            return Ok(false);
        }

        if buf.ends_with('\n')
        {
            buf.pop();

            if buf.ends_with('\r')
            {
                buf.pop();
            }
        }

        Ok(true)
    }
}

impl<R: io::BufRead> private::Sealed for IoSource<R> {}

#[cfg(test)]
mod tests
{
    use std::io::Cursor;

    use super::*;

    fn lines_of(data: &str) -> Vec<String>
    {
        let mut src = IoSource::from_read(Cursor::new(data.as_bytes().to_vec()));
        let mut out = Vec::new();
        let mut buf = String::new();

        while src.next_line(&mut buf).unwrap()
        {
            out.push(buf.clone());
        }

        out
    }

    #[test]
    fn splits_on_lf()
    {
        assert_eq!(lines_of("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn trailing_newline_does_not_add_empty_line()
    {
        assert_eq!(lines_of("a\n"), vec!["a"]);
    }
}
