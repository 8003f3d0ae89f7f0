//! Transaction metadata normalization.

use serde::Serialize;
use serde_json::Value;

/// Normalized transaction details attached to a terminal success, when the
/// flow reported any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionData {
    pub action: Option<String>,
    pub amount: Option<f64>,
    pub trigger_event_id: Option<i64>,
    pub trigger_name: Option<String>,
}

/// Lift raw wire transaction metadata. Absent or non-object input maps to
/// `None`; present input maps per-field with defaults.
pub fn extract_transaction(raw: &Value) -> Option<TransactionData> {
    if !raw.is_object() {
        return None;
    }
    Some(TransactionData {
        action: raw
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string),
        amount: raw.get("amount").and_then(Value::as_f64),
        trigger_event_id: raw.get("trigger_event_id").and_then(Value::as_i64),
        trigger_name: raw
            .get("trigger_name")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
