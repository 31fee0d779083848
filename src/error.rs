/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The 1-based input line at which the error occurred.
    ///
    /// Meaningless (0) for [`Category::Io`] errors.
    pub fn line(&self) -> u64
    {
        self.inner.line()
    }

    /// The column into [`line()`](#method.line) at which the
    /// error occurred.
    pub fn column(&self) -> u64
    {
        self.inner.column()
    }

    /// The human-readable description of a parse error.
    ///
    /// Empty for errors that are not [`Category::Parse`].
    pub fn message(&self) -> &str
    {
        self.inner.message()
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Parse`] the document was syntactically
    ///   or semantically invalid
    /// - [`Category::Io`] the underlying source surfaced an
    ///   error while reading
    /// - [`Category::Eof`] the source ended before a
    ///   complete document could be parsed
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    pub(crate) fn new(err: internal::Error) -> Self
    {
        Self {
            inner: Box::new(err),
        }
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error
/// without matching on its private representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The underlying source returned an error while
    /// attempting I/O
    Io,

    /// The document was not syntactically or semantically
    /// valid
    Parse,

    /// The source ended before a complete document, or a
    /// complete nested value, could be read
    Eof,
}

pub(crate) mod internal
{
    use std::{error::Error as StdError, fmt, io, panic::Location};

    use super::Category;

    /// Internal error representation, carrying enough
    /// position metadata to render a useful [`Display`].
    pub(crate) struct Error
    {
        kind:      ErrorKind,
        raised_at: &'static Location<'static>,
    }

    impl Error
    {
        #[track_caller]
        pub fn parse(line: u64, column: u64, description: impl Into<String>) -> Self
        {
            Self {
                kind:      ErrorKind::Parse {
                    line,
                    column,
                    description: description.into(),
                },
                raised_at: Location::caller(),
            }
        }

        #[track_caller]
        pub fn eof() -> Self
        {
            Self {
                kind:      ErrorKind::Eof,
                raised_at: Location::caller(),
            }
        }

        #[track_caller]
        pub fn io(err: io::Error) -> Self
        {
            Self {
                kind:      ErrorKind::Io(err),
                raised_at: Location::caller(),
            }
        }

        pub fn line(&self) -> u64
        {
            match &self.kind
            {
                ErrorKind::Parse { line, .. } => *line,
                ErrorKind::Eof | ErrorKind::Io(_) => 0,
            }
        }

        pub fn column(&self) -> u64
        {
            match &self.kind
            {
                ErrorKind::Parse { column, .. } => *column,
                ErrorKind::Eof | ErrorKind::Io(_) => 0,
            }
        }

        pub fn message(&self) -> &str
        {
            match &self.kind
            {
                ErrorKind::Parse { description, .. } => description,
                ErrorKind::Eof | ErrorKind::Io(_) => "",
            }
        }

        pub fn classify(&self) -> Category
        {
            match &self.kind
            {
                ErrorKind::Parse { .. } => Category::Parse,
                ErrorKind::Eof => Category::Eof,
                ErrorKind::Io(_) => Category::Io,
            }
        }
    }

    #[derive(Debug)]
    enum ErrorKind
    {
        /// Malformed input at a known (line, column).
        Parse
        {
            line: u64, column: u64, description: String
        },

        /// The source ended while a value, block or nested
        /// structure was still open.
        ///
        /// This is the only externally visible trace of the
        /// internal-only end-of-block signal: once it
        /// reaches the outermost block it is reported to
        /// callers as plain EOF.
        Eof,

        /// The underlying source could not be read.
        Io(io::Error),
    }

    impl fmt::Debug for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            let mut this = f.debug_struct("Error");

            this.field("kind", &self.kind);

            if let ErrorKind::Parse { line, column, .. } = &self.kind
            {
                this.field("line", line).field("column", column);
            }

            this.field("raised_at", &self.raised_at);

            this.finish()
        }
    }

    impl fmt::Display for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match &self.kind
            {
                ErrorKind::Parse {
                    line,
                    column,
                    description,
                } => write!(f, "{description}, on line {line}, column {column}"),
                ErrorKind::Eof => f.write_str("unexpected end of input"),
                ErrorKind::Io(e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for Error
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match &self.kind
            {
                ErrorKind::Io(e) => Some(e),
                ErrorKind::Parse { .. } | ErrorKind::Eof => None,
            }
        }
    }

    impl From<Error> for super::Error
    {
        fn from(err: Error) -> Self
        {
            Self::new(err)
        }
    }

    impl From<io::Error> for Error
    {
        #[track_caller]
        fn from(err: io::Error) -> Self
        {
            Error::io(err)
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        StdError::source(&self.inner)
    }
}

impl From<std::io::Error> for Error
{
    #[track_caller]
    fn from(err: std::io::Error) -> Self
    {
        internal::Error::from(err).into()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn parse_error_display_includes_position()
    {
        let err: Error = internal::Error::parse(3, 7, "Bad number").into();

        assert_eq!(err.classify(), Category::Parse);
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 7);
        assert_eq!(err.message(), "Bad number");
        assert_eq!(err.to_string(), "Bad number, on line 3, column 7");
    }

    #[test]
    fn eof_error_has_no_position()
    {
        let err: Error = internal::Error::eof().into();

        assert_eq!(err.classify(), Category::Eof);
        assert_eq!(err.line(), 0);
        assert_eq!(err.column(), 0);
    }

    #[test]
    fn io_error_roundtrips_through_source()
    {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();

        assert_eq!(err.classify(), Category::Io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
