//! User metadata normalization.
//!
//! Wire metadata nests `user.{id,first_name}` and
//! `status.{status_id,reward_status}`, all optional. The flattened form
//! defaults every field; absent metadata must never produce an error.

use serde::Serialize;
use serde_json::Value;

/// Flattened user fields surfaced to the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: Option<String>,
    pub status_id: Option<String>,
    pub reward_status: Option<String>,
}

/// Flatten raw wire metadata. Absent or non-object metadata yields the
/// defaulted struct.
pub fn extract_user_data(metadata: &Value) -> UserData {
    if !metadata.is_object() {
        return UserData::default();
    }
    UserData {
        id: extract_user_id(metadata).unwrap_or_default(),
        name: str_at(metadata, &["user", "first_name"]),
        status_id: str_at(metadata, &["status", "status_id"]),
        reward_status: str_at(metadata, &["status", "reward_status"]),
    }
}

/// `user.id` may arrive as a string or a number; both normalize to a
/// string. A snake_case `user_id` at the metadata root is honored as a
/// fallback for older flow builds.
fn extract_user_id(metadata: &Value) -> Option<String> {
    let raw = metadata
        .get("user")
        .and_then(|user| user.get("id"))
        .or_else(|| metadata.get("user_id"))?;
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(str::to_string)
}
