//! Cross-frame message envelope (JSON).
//!
//! The envelope keeps `data` raw so variant decoding stays lazy: the
//! structural gate here only establishes that a discriminant exists, and the
//! per-variant decoders in [`event`](super::event) take it from there.

use serde_json::Value;

use super::event::Event;

/// Wire field carrying the discriminant.
const TYPE_FIELD: &str = "type";
/// Optional protocol namespace tag.
const NAMESPACE_FIELD: &str = "namespace";
/// Optional protocol version tag (string or number on the wire).
const VERSION_FIELD: &str = "version";
/// Variant payload field.
const DATA_FIELD: &str = "data";

/// The single structural gate for inbound channel values: a JSON object
/// whose `type` member is a non-empty string. Payload-shape correctness is
/// deliberately NOT checked here.
pub fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get(TYPE_FIELD))
        .and_then(Value::as_str)
        .is_some_and(|t| !t.is_empty())
}

/// One message lifted off the cross-document channel.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Discriminant (`type` on the wire). Non-empty by construction.
    pub kind: String,
    /// Namespace tag, coerced to a string when the sender put something
    /// non-string there. Empty tags are treated as absent by the gate.
    pub namespace: Option<String>,
    /// Raw version tag; compare through [`Envelope::version_tag`].
    pub version: Option<Value>,
    /// Variant payload, left raw for lazy decoding.
    pub data: Value,
}

impl Envelope {
    /// Lift a raw channel value into an envelope. `None` means the value is
    /// not envelope-shaped and must be dropped without surfacing an error.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = obj
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())?
            .to_string();

        Some(Self {
            kind,
            namespace: obj
                .get(NAMESPACE_FIELD)
                .filter(|v| !v.is_null())
                .map(tag_string),
            version: obj.get(VERSION_FIELD).filter(|v| !v.is_null()).cloned(),
            data: obj.get(DATA_FIELD).cloned().unwrap_or(Value::Null),
        })
    }

    /// Version tag coerced to a string for equality checks. Numeric tags
    /// stringify, so `"1"` and `1` compare equal and `"1.0"` and `1.0` do
    /// not mismatch each other by representation alone.
    pub fn version_tag(&self) -> Option<String> {
        self.version.as_ref().map(tag_string)
    }

    /// Decode the variant payload into the event sum type.
    pub fn decode(&self) -> Event {
        Event::decode(&self.kind, &self.data)
    }
}

fn tag_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
