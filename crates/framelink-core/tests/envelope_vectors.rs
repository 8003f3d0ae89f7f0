//! Envelope gate and lift vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::{json, Value};

use framelink_core::protocol::{is_envelope, Envelope};

fn load(name: &str) -> Value {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn lift_envelope_min() {
    let v = load("envelope_min.json");
    assert!(is_envelope(&v));
    let env = Envelope::from_value(&v).unwrap();
    assert_eq!(env.kind, "EVENT");
    assert!(env.namespace.is_none());
    assert!(env.version.is_none());
    assert!(env.data.is_null());
}

#[test]
fn lift_envelope_full() {
    let v = load("envelope_full.json");
    let env = Envelope::from_value(&v).unwrap();
    assert_eq!(env.kind, "FLOW_SUCCESS");
    assert_eq!(env.namespace.as_deref(), Some("framelink-sdk"));
    assert_eq!(env.version_tag().as_deref(), Some("0.1.0"));
    assert!(env.data.get("action").is_some());
}

#[test]
fn gate_rejects_non_envelopes() {
    for bad in [
        Value::Null,
        json!(42),
        json!("FLOW_EXIT"),
        json!([1, 2, 3]),
        json!({}),
        json!({ "type": "" }),
        json!({ "type": 7 }),
        json!({ "type": null }),
        json!({ "data": { "type": "ERROR" } }),
    ] {
        assert!(!is_envelope(&bad), "accepted: {bad}");
        assert!(Envelope::from_value(&bad).is_none(), "lifted: {bad}");
    }
}

#[test]
fn numeric_version_tag_stringifies() {
    let v = json!({ "type": "EVENT", "version": 1 });
    let env = Envelope::from_value(&v).unwrap();
    assert_eq!(env.version_tag().as_deref(), Some("1"));
}

#[test]
fn non_string_namespace_is_coerced_not_dropped() {
    // The gate only cares about `type`; a junk namespace tag is coerced so
    // the router's namespace check can mismatch it.
    let v = json!({ "type": "EVENT", "namespace": 123 });
    let env = Envelope::from_value(&v).unwrap();
    assert_eq!(env.namespace.as_deref(), Some("123"));
}
