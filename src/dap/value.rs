//! Protocol value model.
//!
//! DAP payloads are JSON, but the client cares about distinctions JSON blurs:
//! integers must survive bit-exactly (`seq`, references, thread ids), object
//! key order must be stable for rendering, and arbitrary-precision number
//! tokens must pass through a session untouched (an adapter may echo them
//! back). [`Value`] is the in-memory form every inbound and outbound message
//! takes before typed decoding.

use indexmap::IndexMap;
use std::fmt;

/// A single JSON-shaped protocol value.
///
/// Numbers are split three ways: `Int` for anything exactly representable as
/// an `i64`, `Float` for the rest of the doubles, and `BigNum` for tokens
/// that fit neither (kept verbatim and re-emitted verbatim).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigNum(String),
    Str(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn object() -> Value {
        Value::Object(IndexMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Direct member lookup, `None` for non-objects and absent keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Structural lookup by dotted path (`"body.threadId"`).
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Insert `key` into an object value. A non-object self is replaced by a
    /// fresh object first, matching the merge semantics callers rely on when
    /// composing request arguments.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if self.as_object_mut().is_none() {
            *self = Value::object();
        }
        self.as_object_mut()
            .expect("just replaced with an object")
            .insert(key.into(), value);
    }

    /// Merge `overrides` into the object found at `path` (objects are created
    /// along the way). Existing keys are overwritten, which lets a launch
    /// configuration replace defaults the client composed itself.
    pub fn merge_at(&mut self, path: &[&str], overrides: &Value) {
        let mut current = self;
        for segment in path {
            if !matches!(current, Value::Object(_)) {
                *current = Value::object();
            }
            current = match current {
                Value::Object(map) => map
                    .entry(segment.to_string())
                    .or_insert_with(Value::object),
                _ => unreachable!("just replaced with an object"),
            };
        }
        if let Some(overrides) = overrides.as_object() {
            for (key, value) in overrides {
                current.insert(key.clone(), value.clone());
            }
        }
    }

    /// Lossless conversion from the parsed JSON tree.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(int) = n.as_i64() {
                    Value::Int(int)
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && exact_f64_token(&n, f) => Value::Float(f),
                        _ => Value::BigNum(n.to_string()),
                    }
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Conversion back into a JSON tree for serialization. `BigNum` tokens
    /// re-enter as arbitrary-precision numbers; a non-numeric token (which
    /// cannot be constructed through parsing) degrades to null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::BigNum(token) => serde_json::from_str::<serde_json::Number>(token)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// True when re-rendering `f` reproduces the incoming token, i.e. storing the
/// number as a double loses nothing, not even formatting. Anything else is
/// kept verbatim as a `BigNum`.
fn exact_f64_token(n: &serde_json::Number, f: f64) -> bool {
    serde_json::Number::from_f64(f).map(|c| c.to_string()) == Some(n.to_string())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_round_trip_exactly() {
        for n in [0i64, 1, -1, i64::MAX, i64::MIN, 1 << 53] {
            let value = Value::from_json(json!(n));
            assert_eq!(value, Value::Int(n));
            assert_eq!(value.to_json(), json!(n));
        }
    }

    #[test]
    fn big_number_tokens_survive_verbatim() {
        let token = "123456789012345678901234567890";
        let json: serde_json::Value = serde_json::from_str(token).unwrap();
        let value = Value::from_json(json);
        assert_eq!(value, Value::BigNum(token.to_string()));
        assert_eq!(value.to_json().to_string(), token);
    }

    #[test]
    fn object_order_is_preserved() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"zebra":1,"apple":2,"mango":3}"#).unwrap();
        let value = Value::from_json(json);
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn round_trip_of_a_message_envelope() {
        let json = json!({
            "seq": 3,
            "type": "response",
            "request_seq": 1,
            "success": true,
            "command": "initialize",
            "body": {"supportsConfigurationDoneRequest": true}
        });
        let value = Value::from_json(json.clone());
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn path_lookup() {
        let value = Value::from_json(json!({"body": {"threadId": 7, "reason": "pause"}}));
        assert_eq!(value.get_path("body.threadId"), Some(&Value::Int(7)));
        assert_eq!(
            value.get_path("body.reason").and_then(Value::as_str),
            Some("pause")
        );
        assert_eq!(value.get_path("body.missing"), None);
    }

    #[test]
    fn merge_at_creates_and_overrides() {
        let mut args = Value::from_json(json!({"arguments": {"noDebug": false}}));
        let overrides = Value::from_json(json!({"program": "/bin/true", "noDebug": true}));
        args.merge_at(&["arguments"], &overrides);
        assert_eq!(
            args.get_path("arguments.program").and_then(Value::as_str),
            Some("/bin/true")
        );
        assert_eq!(
            args.get_path("arguments.noDebug").and_then(Value::as_bool),
            Some(true)
        );
    }
}
