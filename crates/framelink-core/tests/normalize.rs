//! Mapper tests: every mapper is total and context comes from build
//! identity, never from the wire.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use framelink_core::normalize::{
    extract_transaction, extract_user_data, map_auth_success_event, map_to_on_error,
    map_to_on_event, map_to_on_exit, map_to_on_success, DEFAULT_ERROR_CODE,
};
use framelink_core::protocol::event::{ErrorPayload, ExitPayload, SuccessPayload};
use framelink_core::{NAMESPACE, VERSION};

#[test]
fn success_mapper_normalizes_token_and_user() {
    let payload = SuccessPayload::from_value(&json!({
        "action": "connect",
        "token": { "access_token": "abc123", "refresh_token": "r1" },
        "metadata": {
            "user": { "id": 7, "first_name": "Ada" },
            "status": { "status_id": "gold", "reward_status": "active" }
        }
    }));
    let data = map_to_on_success(&payload);
    assert_eq!(data.token, "abc123");
    assert_eq!(data.user_data.id, "7");
    assert_eq!(data.user_data.name.as_deref(), Some("Ada"));
    assert_eq!(data.user_data.status_id.as_deref(), Some("gold"));
    assert_eq!(data.user_data.reward_status.as_deref(), Some("active"));
    assert!(data.transaction.is_none());
    assert_eq!(data.context.namespace, NAMESPACE);
    assert_eq!(data.context.version, VERSION);
}

#[test]
fn success_mapper_accepts_bare_string_token() {
    let payload = SuccessPayload::from_value(&json!({ "token": "abc123" }));
    assert_eq!(map_to_on_success(&payload).token, "abc123");
}

#[test]
fn user_extraction_defaults_when_metadata_absent() {
    let user = extract_user_data(&Value::Null);
    assert_eq!(user.id, "");
    assert!(user.name.is_none());
    assert!(user.status_id.is_none());
    assert!(user.reward_status.is_none());
}

#[test]
fn user_id_falls_back_to_snake_case_root_field() {
    let user = extract_user_data(&json!({ "user_id": "u-9" }));
    assert_eq!(user.id, "u-9");
}

#[test]
fn error_mapper_defaults_missing_code_to_sentinel() {
    let data = map_to_on_error(&ErrorPayload::from_value(&json!({
        "error_message": "bad"
    })));
    assert_eq!(data.error_code, DEFAULT_ERROR_CODE);
    assert_eq!(data.error_message, "bad");

    let empty = map_to_on_error(&ErrorPayload::default());
    assert_eq!(empty.error_code, "500");
    assert_eq!(empty.error_message, "unexpected_error");
}

#[test]
fn exit_mapper_passes_absence_through() {
    let data = map_to_on_exit(&ExitPayload::default());
    assert!(data.step.is_none());
    assert!(data.trigger.is_none());
}

#[test]
fn generic_mapper_wraps_kind_and_metadata() {
    let data = map_to_on_event("CUSTOM_PING", &json!({ "metadata": { "n": 1 } }));
    assert_eq!(data.kind, "CUSTOM_PING");
    assert_eq!(data.metadata, json!({ "n": 1 }));

    let bare = map_to_on_event("CUSTOM_PING", &json!({}));
    assert!(bare.metadata.is_null());
}

#[test]
fn auth_success_event_carries_normalized_token_and_user() {
    let payload = SuccessPayload::from_value(&json!({
        "token": "tok-xyz",
        "metadata": { "user": { "id": "u1", "first_name": "Lin" } }
    }));
    let data = map_auth_success_event(&payload);
    assert_eq!(data.kind, "AUTH_SUCCESS");
    assert_eq!(data.metadata["token"], "tok-xyz");
    assert_eq!(data.metadata["user_data"]["id"], "u1");
    assert_eq!(data.metadata["user_data"]["name"], "Lin");
}

#[test]
fn transaction_extraction_is_per_field() {
    let tx = extract_transaction(&json!({
        "action": "redeem",
        "amount": 3.5,
        "trigger_event_id": 9,
        "trigger_name": "cashout"
    }))
    .unwrap();
    assert_eq!(tx.action.as_deref(), Some("redeem"));
    assert_eq!(tx.amount, Some(3.5));
    assert_eq!(tx.trigger_event_id, Some(9));
    assert_eq!(tx.trigger_name.as_deref(), Some("cashout"));

    assert!(extract_transaction(&Value::Null).is_none());
    let partial = extract_transaction(&json!({ "amount": "not-a-number" })).unwrap();
    assert!(partial.amount.is_none());
}
