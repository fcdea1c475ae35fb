use envguard_types::{EnvMap, EnvValue, Error};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Accessors ─────────────────────────────────────────────────────

#[test]
fn string_accessors() {
    let v = EnvValue::from("hello");
    assert_eq!(v.as_str(), Some("hello"));
    assert_eq!(v.as_bool(), None);
    assert_eq!(v.as_i64(), None);
    assert_eq!(v.type_name(), "string");
}

#[test]
fn bool_accessors() {
    let v = EnvValue::from(true);
    assert_eq!(v.as_bool(), Some(true));
    assert_eq!(v.as_str(), None);
    assert_eq!(v.type_name(), "boolean");
}

#[test]
fn integer_widens_to_f64() {
    let v = EnvValue::from(8080_i64);
    assert_eq!(v.as_i64(), Some(8080));
    assert_eq!(v.as_f64(), Some(8080.0));
    assert_eq!(v.type_name(), "number");
}

#[test]
fn float_is_not_integer() {
    let v = EnvValue::from(0.5);
    assert_eq!(v.as_i64(), None);
    assert_eq!(v.as_f64(), Some(0.5));
}

#[test]
fn display_is_bare_payload() {
    assert_eq!(EnvValue::from("x").to_string(), "x");
    assert_eq!(EnvValue::from(false).to_string(), "false");
    assert_eq!(EnvValue::from(42_i64).to_string(), "42");
}

// ── Serde ─────────────────────────────────────────────────────────

#[test]
fn serializes_as_plain_scalars() {
    let mut map = EnvMap::new();
    map.insert("A".into(), EnvValue::from("a"));
    map.insert("B".into(), EnvValue::from(true));
    map.insert("C".into(), EnvValue::from(3_i64));
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json, json!({"A": "a", "B": true, "C": 3}));
}

#[test]
fn deserializes_integers_before_floats() {
    let v: EnvValue = serde_json::from_str("7").unwrap();
    assert_eq!(v, EnvValue::Integer(7));
    let v: EnvValue = serde_json::from_str("7.25").unwrap();
    assert_eq!(v, EnvValue::Float(7.25));
}

// ── JSON conversion ───────────────────────────────────────────────

#[test]
fn from_json_null_is_undefined() {
    assert_eq!(EnvValue::from_json("X", &json!(null)).unwrap(), None);
}

#[test]
fn from_json_rejects_objects() {
    let err = EnvValue::from_json("X", &json!({"nested": 1})).unwrap_err();
    match err {
        Error::UnsupportedValue { name, .. } => assert_eq!(name, "X"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_map_drops_null_entries() {
    let map = EnvValue::parse_map(r#"{"A": "1", "B": null, "C": false}"#).unwrap();
    let mut expected = EnvMap::new();
    expected.insert("A".into(), EnvValue::from("1"));
    expected.insert("C".into(), EnvValue::from(false));
    assert_eq!(map, expected);
}

#[test]
fn parse_map_rejects_non_object() {
    assert!(matches!(
        EnvValue::parse_map("[1, 2]"),
        Err(Error::Serialization(_))
    ));
}
