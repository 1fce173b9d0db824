use serde::{Deserialize, Serialize};

use crate::types::geo::Coordinates;

/// A push subscription as the platform reports it. Immutable once obtained;
/// the sole unit persisted under the subscription storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Platform notification-permission tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Default,
}

impl Default for PermissionStatus {
    fn default() -> Self {
        PermissionStatus::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_notice_hours: Option<AdvanceNotice>,
}

/// Advance-notice window ahead of a planned outage. Only these five values
/// exist; deserialization of any other number fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AdvanceNotice {
    Hours12,
    Hours24,
    Hours36,
    Hours48,
    Hours72,
}

impl AdvanceNotice {
    pub fn hours(self) -> u8 {
        match self {
            AdvanceNotice::Hours12 => 12,
            AdvanceNotice::Hours24 => 24,
            AdvanceNotice::Hours36 => 36,
            AdvanceNotice::Hours48 => 48,
            AdvanceNotice::Hours72 => 72,
        }
    }
}

impl From<AdvanceNotice> for u8 {
    fn from(notice: AdvanceNotice) -> Self {
        notice.hours()
    }
}

impl TryFrom<u8> for AdvanceNotice {
    type Error = InvalidAdvanceNotice;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        match hours {
            12 => Ok(AdvanceNotice::Hours12),
            24 => Ok(AdvanceNotice::Hours24),
            36 => Ok(AdvanceNotice::Hours36),
            48 => Ok(AdvanceNotice::Hours48),
            72 => Ok(AdvanceNotice::Hours72),
            _ => Err(InvalidAdvanceNotice(hours)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAdvanceNotice(pub u8);

impl std::fmt::Display for InvalidAdvanceNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid advance notice of {} hours; expected 12, 24, 36, 48, or 72",
            self.0
        )
    }
}

impl std::error::Error for InvalidAdvanceNotice {}

/// Wire contract consumed by the delivery worker: JSON with these fields, or
/// plain text that the worker turns into the body under a default title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}
