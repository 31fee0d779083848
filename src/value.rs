/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use indexmap::IndexMap;

/// A single node of the value tree produced by [`crate::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value
{
    Null,
    Bool(bool),
    SignedInt(i64),
    UnsignedInt(u64),
    Float(f64),
    String(String),
    DateTime(DateTime),
    Timestamp(Timestamp),
    List(List),
    Map(Map),
}

impl Value
{
    pub fn is_null(&self) -> bool
    {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str>
    {
        match self
        {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List>
    {
        match self
        {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map>
    {
        match self
        {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

pub type List = Vec<Value>;

/// An ordered, string-keyed map of [`Value`]s.
///
/// Iteration order is insertion order; inserting an existing
/// key updates its value in place without moving it to the
/// end, matching [`IndexMap::insert`]'s default behaviour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map(IndexMap<String, Value>);

impl Map
{
    pub fn new() -> Self
    {
        Self(IndexMap::new())
    }

    /// Insert `key` -> `value`, updating the existing entry's
    /// value in place if `key` was already present.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value>
    {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value>
    {
        self.0.get(key)
    }

    pub fn len(&self) -> usize
    {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value>
    {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Map
{
    type IntoIter = indexmap::map::Iter<'a, String, Value>;
    type Item = (&'a String, &'a Value);

    fn into_iter(self) -> Self::IntoIter
    {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Map
{
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self
    {
        Self(IndexMap::from_iter(iter))
    }
}

/// A calendar date-time, optionally zone-qualified.
///
/// No calendar validation is performed beyond the field-width
/// checks the lexer itself applies (see `scalar::datetime`);
/// e.g. `2024-02-30` is accepted as a value, matching the
/// original format's lack of a proleptic-calendar check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime
{
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    pub hour:   u8,
    pub minute: u8,
    pub second: u8,
    /// Fractional seconds, scaled to nanoseconds.
    pub nanosecond: u32,
    /// Offset from UTC in minutes, if a zone was present.
    pub gmt_offset_minutes: Option<i16>,
}

/// A Unix timestamp with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp
{
    pub seconds:     u64,
    pub nanoseconds: u32,
}

impl fmt::Display for Value
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::SignedInt(n) => write!(f, "{n}"),
            Value::UnsignedInt(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::DateTime(dt) => write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
            ),
            Value::Timestamp(ts) => write!(f, "{}.{:09}", ts.seconds, ts.nanoseconds),
            Value::List(items) =>
            {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate()
                {
                    if i > 0
                    {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Value::Map(map) =>
            {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate()
                {
                    if i > 0
                    {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            },
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn map_insert_updates_in_place()
    {
        let mut map = Map::new();
        map.insert("a".into(), Value::SignedInt(1));
        map.insert("b".into(), Value::SignedInt(2));
        map.insert("a".into(), Value::SignedInt(99));

        let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::SignedInt(99)));
    }
}
