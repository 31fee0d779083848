/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Black-box coverage of the nine end-to-end scenarios, driven
//! through the public `parse`/`parse_json` entry points rather
//! than any internal `Parser` method.

use pretty_assertions::assert_eq;

use crate::{error::Category, parse, parse_json, value::Value};

#[test]
fn scenario_1_flat_map_of_signed_ints()
{
    let value = parse("a: 1\nb: 2\n").unwrap();
    let map = value.as_map().unwrap();

    assert_eq!(map.get("a"), Some(&Value::SignedInt(1)));
    assert_eq!(map.get("b"), Some(&Value::SignedInt(2)));
}

#[test]
fn scenario_2_flat_list_with_negative_number()
{
    let value = parse("- 1\n- 2\n- -3\n").unwrap();

    assert_eq!(
        value,
        Value::List(vec![Value::SignedInt(1), Value::SignedInt(2), Value::SignedInt(-3)])
    );
}

#[test]
fn scenario_3_literal_block_string()
{
    let value = parse(":literal:\n  line1\n  line2\n").unwrap();

    assert_eq!(value, Value::String("line1\nline2\n".into()));
}

#[test]
fn scenario_4_json_convspec_matches_parse_json()
{
    let via_amw = parse(":json:\n  {\"x\": [1, 2, 3]}\n").unwrap();
    let via_json = parse_json("{\"x\": [1, 2, 3]}").unwrap();

    assert_eq!(via_amw, via_json);

    let inner = via_amw.as_map().unwrap().get("x").unwrap().as_list().unwrap();
    assert_eq!(
        inner,
        &vec![Value::SignedInt(1), Value::SignedInt(2), Value::SignedInt(3)]
    );
}

#[test]
fn scenario_5_unicode_escape_in_quoted_string()
{
    let value = parse("k: \"a\\u0041b\"\n").unwrap();
    let map = value.as_map().unwrap();

    assert_eq!(map.get("k"), Some(&Value::String("aAb".into())));
}

#[test]
fn scenario_6_timestamp_with_fractional_seconds()
{
    let value = parse("ts: :timestamp: 1700000000.500\n").unwrap();
    let map = value.as_map().unwrap();

    match map.get("ts").unwrap()
    {
        Value::Timestamp(ts) =>
        {
            assert_eq!(ts.seconds, 1700000000);
            assert_eq!(ts.nanoseconds, 500_000_000);
        },
        other => panic!("expected a timestamp, got {other:?}"),
    }
}

#[test]
fn scenario_7_comment_and_blank_line_before_hex_separator_value()
{
    let value = parse("# comment\n\nv: 0xFF_FF\n").unwrap();
    let map = value.as_map().unwrap();

    assert_eq!(map.get("v"), Some(&Value::SignedInt(0xFFFF)));
}

#[test]
fn scenario_8_bad_radix_prefix_reports_column_of_leading_zero()
{
    let err = parse("bad: 0b\n").unwrap_err();

    assert_eq!(err.classify(), Category::Parse);
    assert_eq!(err.line(), 1);
    assert_eq!(err.column(), 6);
    assert_eq!(err.message(), "Bad number");
}

#[test]
fn scenario_9_inconsistent_list_item_indentation_is_an_error()
{
    let err = parse("- 1\n  - 2\n").unwrap_err();

    assert_eq!(err.classify(), Category::Parse);
    assert_eq!(err.message(), "Bad indentation of list item");
}
