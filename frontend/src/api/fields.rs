//! Helpers for the loosely typed JSON the backend returns: ids arrive as
//! numbers or strings, optional fields as `null` or missing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present id among `keys`.
pub fn first_id(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| object.get(*key).and_then(id_string))
}

pub fn str_field(object: &Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn first_str(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| str_field(object, key))
}

pub fn u32_field(object: &Value, key: &str) -> Option<u32> {
    match object.get(key)? {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        assert_eq!(id_string(&json!(42)), Some("42".to_string()));
        assert_eq!(id_string(&json!("ord_7")), Some("ord_7".to_string()));
        assert_eq!(id_string(&json!("")), None);
        assert_eq!(id_string(&Value::Null), None);
    }

    #[test]
    fn first_id_walks_keys_in_order() {
        let order = json!({"id": 3, "order_id": 17});
        assert_eq!(first_id(&order, &["order_id", "id"]), Some("17".to_string()));
        let order = json!({"id": 3, "order_id": null});
        assert_eq!(first_id(&order, &["order_id", "id"]), Some("3".to_string()));
    }

    #[test]
    fn counts_parse_from_strings() {
        let order = json!({"photos": "12", "videos": 2});
        assert_eq!(u32_field(&order, "photos"), Some(12));
        assert_eq!(u32_field(&order, "videos"), Some(2));
        assert_eq!(u32_field(&order, "missing"), None);
    }
}
