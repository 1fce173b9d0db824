use askama::Template;
use askama_web::WebTemplate;

use crate::i18n::{Locale, Message, text};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) app_name: String,
    pub(crate) locale: &'static str,
    pub(crate) loading: &'static str,
    pub(crate) location_requesting: &'static str,
    pub(crate) using_default_location: &'static str,
    pub(crate) outage_checking: &'static str,
    pub(crate) outage_detected: &'static str,
    pub(crate) outage_clear: &'static str,
    pub(crate) outage_unknown: &'static str,
    pub(crate) estimated_restore: &'static str,
    pub(crate) affected_customers: &'static str,
    pub(crate) outage_id: &'static str,
    pub(crate) notifications_status: &'static str,
    pub(crate) notifications_enable: &'static str,
    pub(crate) notifications_disable: &'static str,
    pub(crate) notifications_enabled: &'static str,
    pub(crate) notifications_disabled: &'static str,
    pub(crate) notifications_not_supported: &'static str,
    pub(crate) notifications_enable_failed: &'static str,
    pub(crate) notifications_disable_failed: &'static str,
    pub(crate) permission_label: &'static str,
    pub(crate) permission_granted: &'static str,
    pub(crate) permission_denied: &'static str,
    pub(crate) permission_default: &'static str,
    pub(crate) advance_notice_label: &'static str,
}

impl IndexTemplate {
    pub(crate) fn new(app_name: String, locale: Locale) -> Self {
        Self {
            app_name,
            locale: locale.tag(),
            loading: text(locale, Message::Loading),
            location_requesting: text(locale, Message::LocationRequesting),
            using_default_location: text(locale, Message::UsingDefaultLocation),
            outage_checking: text(locale, Message::OutageChecking),
            outage_detected: text(locale, Message::OutageDetected),
            outage_clear: text(locale, Message::OutageClear),
            outage_unknown: text(locale, Message::OutageUnknown),
            estimated_restore: text(locale, Message::EstimatedRestore),
            affected_customers: text(locale, Message::AffectedCustomers),
            outage_id: text(locale, Message::OutageId),
            notifications_status: text(locale, Message::NotificationsStatus),
            notifications_enable: text(locale, Message::NotificationsEnable),
            notifications_disable: text(locale, Message::NotificationsDisable),
            notifications_enabled: text(locale, Message::NotificationsEnabled),
            notifications_disabled: text(locale, Message::NotificationsDisabled),
            notifications_not_supported: text(locale, Message::NotificationsNotSupported),
            notifications_enable_failed: text(locale, Message::NotificationsEnableFailed),
            notifications_disable_failed: text(locale, Message::NotificationsDisableFailed),
            permission_label: text(locale, Message::Permission),
            permission_granted: text(locale, Message::PermissionGranted),
            permission_denied: text(locale, Message::PermissionDenied),
            permission_default: text(locale, Message::PermissionDefault),
            advance_notice_label: text(locale, Message::AdvanceNoticeLabel),
        }
    }
}

#[derive(Template)]
#[template(path = "manifest.json", escape = "none")]
pub(crate) struct ManifestTemplate<'a> {
    pub(crate) app_name: &'a str,
}

mod filters {
    use std::fmt::Write;

    pub fn json_escape(value: &str, _values: &dyn askama::Values) -> askama::Result<String> {
        let mut escaped = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '"' => escaped.push_str("\\\""),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '\u{08}' => escaped.push_str("\\b"),
                '\u{0C}' => escaped.push_str("\\f"),
                ch if ch < '\u{20}' => {
                    write!(escaped, "\\u{:04x}", ch as u32)?;
                }
                _ => escaped.push(ch),
            }
        }
        Ok(escaped)
    }
}
