//! Decoded JSON tree.
//!
//! Built straight from the `serde_json` token stream (no detour through
//! `serde_json::Value`), so inference can match on variants exhaustively.
use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Magnitude only; "integer" means the fractional part is exactly zero.
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Composite(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ------------------------------ Decode ----------------------------------- //

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> { Ok(Value::Bool(v)) }
    fn visit_i64<E>(self, v: i64) -> Result<Value, E> { Ok(Value::Number(v as f64)) }
    fn visit_u64<E>(self, v: u64) -> Result<Value, E> { Ok(Value::Number(v as f64)) }
    fn visit_f64<E>(self, v: f64) -> Result<Value, E> { Ok(Value::Number(v)) }
    fn visit_str<E>(self, v: &str) -> Result<Value, E> { Ok(Value::String(v.to_owned())) }
    fn visit_string<E>(self, v: String) -> Result<Value, E> { Ok(Value::String(v)) }
    fn visit_unit<E>(self) -> Result<Value, E> { Ok(Value::Null) }
    fn visit_none<E>(self) -> Result<Value, E> { Ok(Value::Null) }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut xs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(x) = seq.next_element()? {
            xs.push(x);
        }
        Ok(Value::Sequence(xs))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // duplicate keys: first position, last value (IndexMap::insert semantics)
        let mut fields = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry::<String, Value>()? {
            fields.insert(k, v);
        }
        Ok(Value::Composite(fields))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Used after driver-side selection (JSON Pointer / jq), which operates on
/// `serde_json::Value`. `preserve_order` keeps key order intact.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Sequence(xs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(m) => {
                Value::Composite(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
