use std::path::PathBuf;

use crate::i18n::Locale;

#[derive(Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub app_name: String,
    pub locale: Locale,
    pub outage_backend: OutageBackendKind,
    pub vapid_private_key: Option<String>,
    pub vapid_public_key: Option<String>,
    pub vapid_subject: Option<String>,
}

/// Outage provider selected once at startup. Callers never see the concrete
/// provider, only the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutageBackendKind {
    #[default]
    Mock,
    Utility,
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir(),
            app_name: "Gridmap".to_string(),
            locale: Locale::En,
            outage_backend: OutageBackendKind::Mock,
            vapid_private_key: None,
            vapid_public_key: None,
            vapid_subject: None,
        }
    }
}
