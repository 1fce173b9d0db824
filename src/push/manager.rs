use crate::ports::platform::NotificationPlatform;
use crate::ports::store::{StoreError, SubscriptionStore};
use crate::push::vapid::{ServerKeyError, decode_server_key};
use crate::types::push::{NotificationPreferences, PermissionStatus, Subscription};

/// Owns the push-subscription lifecycle: delivery-worker registration,
/// permission negotiation, subscribe/unsubscribe, and the durable local
/// record of subscription and preferences.
///
/// The state machine is `Uninitialized -> Initialized -> {Unsubscribed,
/// Subscribed}`; the subscribed states flip on user action. Registration
/// happens at most once per manager; repeated `initialize` calls keep the
/// first successful registration.
pub struct NotificationManager<P, S> {
    platform: P,
    store: S,
    registered: bool,
}

impl<P, S> NotificationManager<P, S>
where
    P: NotificationPlatform,
    S: SubscriptionStore,
{
    pub fn new(platform: P, store: S) -> Self {
        Self {
            platform,
            store,
            registered: false,
        }
    }

    /// Registers the background delivery worker. Unsupported platforms are a
    /// no-op, not an error, and nothing is recorded for them; a later
    /// `subscribe` then fails with [`NotifyError::Registration`].
    pub async fn initialize(&mut self) -> Result<(), NotifyError> {
        if !self.is_supported() {
            eprintln!("push notifications unsupported on this platform; skipping registration");
            return Ok(());
        }
        if self.registered {
            return Ok(());
        }
        self.platform
            .register_worker()
            .await
            .map_err(|err| NotifyError::Platform(err.to_string()))?;
        self.registered = true;
        Ok(())
    }

    pub fn is_supported(&self) -> bool {
        self.platform.has_worker_support() && self.platform.has_push_support()
    }

    /// Notification-permission tri-state; `Denied` when the notification
    /// capability itself is absent.
    pub fn permission_status(&self) -> PermissionStatus {
        if !self.platform.has_notification_support() {
            return PermissionStatus::Denied;
        }
        self.platform.permission()
    }

    /// Requests permission and creates a push subscription keyed to the
    /// application server key, persisting the result. Returns `Ok(None)`
    /// without touching storage when permission is not granted. The
    /// subscription is not transmitted to any upstream delivery service;
    /// that remains an extension point.
    pub async fn subscribe(
        &mut self,
        server_key: &str,
    ) -> Result<Option<Subscription>, NotifyError> {
        if !self.registered {
            self.initialize().await?;
        }
        if !self.registered {
            return Err(NotifyError::Registration);
        }

        let permission = self.platform.request_permission().await;
        if permission != PermissionStatus::Granted {
            eprintln!("notification permission not granted; leaving subscription state untouched");
            return Ok(None);
        }

        let key_bytes = decode_server_key(server_key).map_err(NotifyError::InvalidServerKey)?;
        let subscription = self
            .platform
            .create_subscription(&key_bytes)
            .await
            .map_err(|err| NotifyError::Platform(err.to_string()))?;
        self.store.save_subscription(&subscription)?;
        Ok(Some(subscription))
    }

    /// Cancels the live platform subscription when one exists and clears the
    /// stored subscription together with the stored preferences. Without a
    /// registration, or without a live subscription, this is a no-op that
    /// leaves storage unchanged.
    pub async fn unsubscribe(&mut self) -> Result<(), NotifyError> {
        if !self.registered {
            return Ok(());
        }

        let live = self
            .platform
            .current_subscription()
            .await
            .map_err(|err| NotifyError::Platform(err.to_string()))?;
        if live.is_none() {
            return Ok(());
        }

        self.platform
            .cancel_subscription()
            .await
            .map_err(|err| NotifyError::Platform(err.to_string()))?;
        self.store.clear_subscription()?;
        self.store.clear_preferences()?;
        Ok(())
    }

    /// The effective subscription: the persisted copy when present,
    /// otherwise the live platform subscription. A live subscription found
    /// with empty local storage is written back so the durable record and
    /// the platform agree again.
    pub async fn subscription(&self) -> Result<Option<Subscription>, NotifyError> {
        if let Some(stored) = self.store.load_subscription()? {
            return Ok(Some(stored));
        }
        if !self.registered {
            return Ok(None);
        }

        let live = self
            .platform
            .current_subscription()
            .await
            .map_err(|err| NotifyError::Platform(err.to_string()))?;
        match live {
            Some(subscription) => {
                self.store.save_subscription(&subscription)?;
                Ok(Some(subscription))
            }
            None => Ok(None),
        }
    }

    pub fn save_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), StoreError> {
        self.store.save_preferences(preferences)
    }

    pub fn preferences(&self) -> Result<Option<NotificationPreferences>, StoreError> {
        self.store.load_preferences()
    }
}

#[derive(Debug)]
pub enum NotifyError {
    /// Delivery-worker registration did not succeed, so subscription
    /// operations cannot proceed.
    Registration,
    InvalidServerKey(ServerKeyError),
    Platform(String),
    Store(StoreError),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Registration => {
                f.write_str("delivery worker is not registered")
            }
            NotifyError::InvalidServerKey(err) => write!(f, "{err}"),
            NotifyError::Platform(detail) => write!(f, "push platform error: {detail}"),
            NotifyError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<StoreError> for NotifyError {
    fn from(err: StoreError) -> Self {
        NotifyError::Store(err)
    }
}
