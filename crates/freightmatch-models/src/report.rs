use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Key the ingestion boundary owns. Callers cannot set it.
pub const RECEIVED_AT_FIELD: &str = "received_at";

/// How a negotiation call ended.
///
/// A view over the free-form `negotiation_result` string. Only the exact
/// strings "accepted" and "rejected" map to their variants; anything else,
/// including a missing value, is `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NegotiationOutcome {
    Accepted,
    Rejected,
    #[default]
    Other,
}

impl NegotiationOutcome {
    pub fn from_result(raw: Option<&str>) -> Self {
        match raw {
            Some("accepted") => NegotiationOutcome::Accepted,
            Some("rejected") => NegotiationOutcome::Rejected,
            _ => NegotiationOutcome::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationOutcome::Accepted => "accepted",
            NegotiationOutcome::Rejected => "rejected",
            NegotiationOutcome::Other => "other",
        }
    }
}

/// A call report as the caller submits it, before the server stamps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    /// Rate the load was offered at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadboard_rate: Option<Decimal>,
    /// Final rate. Only meaningful when the outcome is `Accepted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreed_rate: Option<Decimal>,
    /// Outcome as the caller wrote it. See [`NegotiationOutcome::from_result`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_duration_sec: Option<Decimal>,
    /// Any other fields the caller sent (carrier info, transcripts, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReportSubmission {
    /// Stamp the submission with the server-side receive time.
    /// A caller-supplied `received_at` is dropped.
    pub fn into_report(mut self, received_at: DateTime<Utc>) -> NegotiationReport {
        self.extra.remove(RECEIVED_AT_FIELD);
        NegotiationReport {
            origin: self.origin,
            destination: self.destination,
            equipment_type: self.equipment_type,
            loadboard_rate: self.loadboard_rate,
            agreed_rate: self.agreed_rate,
            negotiation_result: self.negotiation_result,
            call_duration_sec: self.call_duration_sec,
            extra: self.extra,
            received_at,
        }
    }
}

/// One completed negotiation call, as stored in the append-only log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NegotiationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadboard_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreed_rate: Option<Decimal>,
    /// Stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_duration_sec: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Set at ingestion. Never caller-supplied.
    #[serde(with = "crate::timestamp::lenient_utc")]
    pub received_at: DateTime<Utc>,
}

impl NegotiationReport {
    pub fn outcome(&self) -> NegotiationOutcome {
        NegotiationOutcome::from_result(self.negotiation_result.as_deref())
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome() == NegotiationOutcome::Accepted
    }
}
