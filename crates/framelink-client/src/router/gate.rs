//! Inbound message gate: every check that runs before payload dispatch.

use serde_json::Value;

use framelink_core::protocol::Envelope;

/// Why an inbound message was dropped. Drops are silent toward host
/// callbacks; the reason feeds tracing and metrics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Router not armed (stale delivery after teardown).
    Disarmed,
    /// Sender origin differs from the expected flow origin.
    OriginMismatch,
    /// Payload is not envelope-shaped.
    NotEnvelope,
    /// Namespace tag present on both sides and different.
    NamespaceMismatch,
    /// Version tag present on both sides and different.
    VersionMismatch,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::Disarmed => "disarmed",
            DropReason::OriginMismatch => "origin_mismatch",
            DropReason::NotEnvelope => "not_envelope",
            DropReason::NamespaceMismatch => "namespace_mismatch",
            DropReason::VersionMismatch => "version_mismatch",
        }
    }
}

/// Protocol guards for one router instance.
///
/// Origin equality is the channel's sole authentication and runs before any
/// payload inspection. Namespace/version tags are backward-compat gates:
/// absence on either side is permissive, presence on both sides must match.
#[derive(Debug, Clone)]
pub struct Gate {
    expected_origin: String,
    namespace: Option<String>,
    version: Option<String>,
}

impl Gate {
    pub fn new(
        expected_origin: String,
        namespace: Option<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            expected_origin,
            namespace,
            version,
        }
    }

    pub fn expected_origin(&self) -> &str {
        &self.expected_origin
    }

    /// Admit or reject one inbound value.
    pub fn admit(&self, origin: &str, data: &Value) -> Result<Envelope, DropReason> {
        if origin != self.expected_origin {
            return Err(DropReason::OriginMismatch);
        }

        let Some(envelope) = Envelope::from_value(data) else {
            return Err(DropReason::NotEnvelope);
        };

        if let (Some(ours), Some(theirs)) =
            (self.namespace.as_deref(), envelope.namespace.as_deref())
        {
            // Empty incoming tags are treated as absent.
            if !theirs.is_empty() && theirs != ours {
                return Err(DropReason::NamespaceMismatch);
            }
        }

        let version_tag = envelope.version_tag();
        if let (Some(ours), Some(theirs)) = (self.version.as_deref(), version_tag.as_deref()) {
            if theirs != ours {
                return Err(DropReason::VersionMismatch);
            }
        }

        Ok(envelope)
    }
}
