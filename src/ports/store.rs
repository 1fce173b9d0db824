use std::sync::Arc;

use crate::types::push::{NotificationPreferences, Subscription};

/// Durable local key-value storage for the subscription record and the
/// notification preferences. One logical writer; each key is read and
/// replaced atomically.
pub trait SubscriptionStore: Send + Sync {
    fn load_subscription(&self) -> Result<Option<Subscription>, StoreError>;
    fn save_subscription(&self, subscription: &Subscription) -> Result<(), StoreError>;
    fn clear_subscription(&self) -> Result<(), StoreError>;

    fn load_preferences(&self) -> Result<Option<NotificationPreferences>, StoreError>;
    fn save_preferences(&self, preferences: &NotificationPreferences) -> Result<(), StoreError>;
    fn clear_preferences(&self) -> Result<(), StoreError>;
}

impl<S: SubscriptionStore> SubscriptionStore for Arc<S> {
    fn load_subscription(&self) -> Result<Option<Subscription>, StoreError> {
        (**self).load_subscription()
    }

    fn save_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        (**self).save_subscription(subscription)
    }

    fn clear_subscription(&self) -> Result<(), StoreError> {
        (**self).clear_subscription()
    }

    fn load_preferences(&self) -> Result<Option<NotificationPreferences>, StoreError> {
        (**self).load_preferences()
    }

    fn save_preferences(&self, preferences: &NotificationPreferences) -> Result<(), StoreError> {
        (**self).save_preferences(preferences)
    }

    fn clear_preferences(&self) -> Result<(), StoreError> {
        (**self).clear_preferences()
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "storage io error: {err}"),
            StoreError::Serde(err) => write!(f, "storage encoding error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serde(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}
