use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The result of a single outage lookup. `has_outage == false` implies the
/// detail fields are absent; their absence when `has_outage == true` is
/// permitted and not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageStatus {
    pub has_outage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outage_id: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_restore_time: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_customers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OutageStatus {
    /// Shape returned for every lookup that finds no outage.
    pub fn clear(message: impl Into<String>) -> Self {
        Self {
            has_outage: false,
            outage_id: None,
            estimated_restore_time: None,
            affected_customers: None,
            message: Some(message.into()),
        }
    }
}
