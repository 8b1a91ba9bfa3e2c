use serde_json::{Map, Value};

/// Joiner for compound score keys.
pub const KEY_SEPARATOR: &str = "_";

/// Collapse nested objects into one level, joining keys with `sep` under
/// `parent` (no prefix when `parent` is empty). Arrays and scalars are leaves.
/// An empty nested object contributes nothing.
pub fn flatten(map: &Map<String, Value>, parent: &str, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(&mut out, map, parent, sep);
    out
}

fn flatten_into(out: &mut Map<String, Value>, map: &Map<String, Value>, parent: &str, sep: &str) {
    for (key, value) in map {
        let compound = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}{sep}{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(out, inner, &compound, sep),
            leaf => {
                out.insert(compound, leaf.clone());
            }
        }
    }
}
