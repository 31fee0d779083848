/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A parser for AMW, a human-editable, indentation-structured
//! markup language, producing a dynamically typed [`Value`]
//! tree.
//!
//! The two convenience entry points are [`parse`]/[`parse_reader`]
//! for a full AMW document, and [`parse_json`]/[`parse_json_reader`]
//! for a document that is itself a single JSON value. Both pairs
//! are thin wrappers over [`ParserBuilder`], which is also where
//! custom conversion specifiers and the recursion limits are
//! configured.
//!
//! ```
//! let value = amw::parse("a: 1\nb: 2\n").unwrap();
//! assert_eq!(value.as_map().unwrap().get("a").unwrap().as_str(), None);
//! ```

#![allow(clippy::suspicious_else_formatting)]

mod block;
mod convspec;
mod json;
mod line;
mod scalar;

pub mod error;
pub mod parser;
pub mod reader;
pub mod value;

pub use error::{Error, Result};
pub use parser::{ParserBuilder, ReservedName};
pub use reader::{IoSource, StrSource};
pub use value::{DateTime, List, Map, Timestamp, Value};

use std::io;

/// Parse `input` as a single AMW document.
///
/// Trailing non-whitespace, non-comment content after the
/// top-level value is an error ("Extra data after parsed
/// value").
pub fn parse(input: &str) -> Result<Value>
{
    ParserBuilder::new(StrSource::new(input)).parse()
}

/// Parse a single AMW document read from `input`.
///
/// See [`parse`] for the `&str` equivalent.
pub fn parse_reader<R: io::Read>(input: R) -> Result<Value>
{
    ParserBuilder::new(IoSource::new(input)).parse()
}

/// Parse `input` as a single JSON value, the entire document
/// being JSON rather than AMW.
pub fn parse_json(input: &str) -> Result<Value>
{
    ParserBuilder::new(StrSource::new(input)).parse_json()
}

/// Parse a single JSON value read from `input`.
///
/// See [`parse_json`] for the `&str` equivalent.
pub fn parse_json_reader<R: io::Read>(input: R) -> Result<Value>
{
    ParserBuilder::new(IoSource::new(input)).parse_json()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn parse_simple_map()
    {
        let value = parse("a: 1\nb: 2\n").unwrap();
        let map = value.as_map().unwrap();

        assert_eq!(map.get("a").unwrap(), &Value::SignedInt(1));
        assert_eq!(map.get("b").unwrap(), &Value::SignedInt(2));
    }

    #[test]
    fn parse_simple_list()
    {
        let value = parse("- 1\n- 2\n- -3\n").unwrap();
        let list = value.as_list().unwrap();

        assert_eq!(
            list,
            &vec![Value::SignedInt(1), Value::SignedInt(2), Value::SignedInt(-3)]
        );
    }

    #[test]
    fn parse_json_matches_amw_json_convspec()
    {
        let via_amw = parse(":json:\n  {\"x\": [1, 2, 3]}\n").unwrap();
        let via_json = parse_json("{\"x\": [1, 2, 3]}").unwrap();

        assert_eq!(via_amw, via_json);
    }

    #[test]
    fn parse_reader_matches_parse()
    {
        let from_str = parse("a: 1\n").unwrap();
        let from_reader = parse_reader("a: 1\n".as_bytes()).unwrap();

        assert_eq!(from_str, from_reader);
    }
}
