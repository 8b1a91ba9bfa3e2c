//! Conversion between JSON values and table attribute values.

use super::Item;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// How numeric (`N`) attributes are rendered when converting back to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMode {
    /// Keep the exact decimal text stored in the table.
    Exact,
    /// Downgrade to a 64-bit float (display artifacts).
    Float,
}

/// Convert a JSON value to an attribute value. Numbers keep their textual form.
pub fn json_to_attr(val: &Value) -> AttributeValue {
    match val {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(arr) => AttributeValue::L(arr.iter().map(json_to_attr).collect()),
        Value::Object(obj) => AttributeValue::M(json_map_to_attrs(obj)),
    }
}

pub fn json_map_to_attrs(obj: &Map<String, Value>) -> HashMap<String, AttributeValue> {
    obj.iter()
        .map(|(k, v)| (k.clone(), json_to_attr(v)))
        .collect()
}

/// Convert a single attribute value to JSON. Binary attributes have no JSON form.
pub fn attr_to_json(attr: &AttributeValue, mode: NumberMode) -> Option<Value> {
    match attr {
        AttributeValue::S(s) => Some(Value::String(s.clone())),
        AttributeValue::N(n) => number_to_json(n, mode),
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null(_) => Some(Value::Null),
        AttributeValue::L(list) => Some(Value::Array(
            list.iter().filter_map(|v| attr_to_json(v, mode)).collect(),
        )),
        AttributeValue::M(map) => Some(Value::Object(attrs_to_json_map(map, mode))),
        AttributeValue::Ss(set) => Some(Value::Array(
            set.iter().map(|s| Value::String(s.clone())).collect(),
        )),
        AttributeValue::Ns(set) => Some(Value::Array(
            set.iter().filter_map(|n| number_to_json(n, mode)).collect(),
        )),
        _ => None,
    }
}

/// Keys come out sorted, so the same item always renders to the same JSON.
pub fn attrs_to_json_map(map: &HashMap<String, AttributeValue>, mode: NumberMode) -> Map<String, Value> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .filter_map(|(k, v)| attr_to_json(v, mode).map(|val| (k.clone(), val)))
        .collect()
}

pub fn item_to_json(item: &Item, mode: NumberMode) -> Value {
    Value::Object(attrs_to_json_map(item, mode))
}

fn number_to_json(n: &str, mode: NumberMode) -> Option<Value> {
    match mode {
        NumberMode::Exact => Number::from_str(n).ok().map(Value::Number),
        NumberMode::Float => n
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
    }
}
