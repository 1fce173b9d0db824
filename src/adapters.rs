use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::ports;
use crate::ports::location::{LocationError, LocationSource};
use crate::ports::platform::NotificationPlatform;
use crate::ports::store::{StoreError, SubscriptionStore};
use crate::push::VapidConfig;
use crate::types::geo::Coordinates;
use crate::types::push::{NotificationPreferences, PermissionStatus, Subscription};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimeProvider;

impl ports::TimeProvider for TokioTimeProvider {
    type Sleep<'a>
        = tokio::time::Sleep
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a> {
        tokio::time::sleep(duration)
    }
}

#[derive(Clone)]
pub struct WebPushSender {
    vapid: VapidConfig,
    client: Arc<web_push::WebPushClient>,
}

impl WebPushSender {
    pub fn new(vapid: VapidConfig) -> Result<Self, web_push::WebPushError> {
        let client = web_push::WebPushClient::new()?;
        Ok(Self {
            vapid,
            client: Arc::new(client),
        })
    }
}

impl ports::PushSender for WebPushSender {
    type Error = web_push::WebPushError;
    type Fut<'a>
        = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn send<'a>(&'a self, subscription: &'a Subscription, message: &'a str) -> Self::Fut<'a> {
        Box::pin(async move {
            let subscription_info = web_push::SubscriptionInfo::new(
                subscription.endpoint.clone(),
                subscription.keys.p256dh.clone(),
                subscription.keys.auth.clone(),
            );
            let mut builder = web_push::WebPushMessageBuilder::new(&subscription_info)?;
            builder.set_payload(web_push::ContentEncoding::Aes128Gcm, message.as_bytes());
            let mut signature_builder = web_push::VapidSignatureBuilder::from_base64(
                &self.vapid.private_key,
                web_push::URL_SAFE_NO_PAD,
                &subscription_info,
            )?;
            signature_builder.add_claim("sub", self.vapid.subject.as_str());
            builder.set_vapid_signature(signature_builder.build()?);
            self.client.send(builder.build()?).await?;
            Ok(())
        })
    }
}

const SUBSCRIPTION_FILE: &str = "subscription.json";
const PREFERENCES_FILE: &str = "preferences.json";

/// Durable local key-value store: one JSON document per key under the data
/// directory. Writes go through a temp file and rename so each key is
/// replaced atomically; an absent file reads as `None`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn read_key<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        match std::fs::read_to_string(self.dir.join(file)) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_key<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(value)?;
        atomic_write(&self.dir.join(file), &contents)?;
        Ok(())
    }

    fn clear_key(&self, file: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.dir.join(file)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SubscriptionStore for JsonFileStore {
    fn load_subscription(&self) -> Result<Option<Subscription>, StoreError> {
        self.read_key(SUBSCRIPTION_FILE)
    }

    fn save_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        self.write_key(SUBSCRIPTION_FILE, subscription)
    }

    fn clear_subscription(&self) -> Result<(), StoreError> {
        self.clear_key(SUBSCRIPTION_FILE)
    }

    fn load_preferences(&self) -> Result<Option<NotificationPreferences>, StoreError> {
        self.read_key(PREFERENCES_FILE)
    }

    fn save_preferences(&self, preferences: &NotificationPreferences) -> Result<(), StoreError> {
        self.write_key(PREFERENCES_FILE, preferences)
    }

    fn clear_preferences(&self) -> Result<(), StoreError> {
        self.clear_key(PREFERENCES_FILE)
    }
}

fn atomic_write(path: &Path, contents: &str) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("missing parent directory"))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("record.json");
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    for attempt in 0..10u32 {
        let temp_name = format!(".{}.tmp-{}-{}-{}", file_name, pid, nanos, attempt);
        let temp_path = parent.join(temp_name);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
        {
            Ok(mut file) => {
                file.write_all(contents.as_bytes())?;
                file.flush()?;
                std::fs::rename(&temp_path, path)?;
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        "failed to create temp file",
    ))
}

/// The production [`NotificationPlatform`]: the browser owns the real
/// service-worker and push APIs, performs the calls, and reports their
/// outcomes with each lifecycle request. This adapter replays the reported
/// state so the subscription manager runs the same state machine on the
/// server as it does against a scripted platform in tests.
#[derive(Debug, Clone, Default)]
pub struct ReportedPlatform {
    pub worker_support: bool,
    pub push_support: bool,
    pub notification_support: bool,
    pub worker_registered: bool,
    pub permission: PermissionStatus,
    pub subscription: Option<Subscription>,
}

#[derive(Debug)]
pub struct ReportGap(&'static str);

impl std::fmt::Display for ReportGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl NotificationPlatform for ReportedPlatform {
    type Error = ReportGap;
    type RegisterFut<'a>
        = std::future::Ready<Result<(), Self::Error>>
    where
        Self: 'a;
    type PermissionFut<'a>
        = std::future::Ready<PermissionStatus>
    where
        Self: 'a;
    type SubscribeFut<'a>
        = std::future::Ready<Result<Subscription, Self::Error>>
    where
        Self: 'a;
    type CurrentFut<'a>
        = std::future::Ready<Result<Option<Subscription>, Self::Error>>
    where
        Self: 'a;
    type CancelFut<'a>
        = std::future::Ready<Result<(), Self::Error>>
    where
        Self: 'a;

    fn has_worker_support(&self) -> bool {
        self.worker_support
    }

    fn has_push_support(&self) -> bool {
        self.push_support
    }

    fn has_notification_support(&self) -> bool {
        self.notification_support
    }

    fn register_worker(&self) -> Self::RegisterFut<'_> {
        if self.worker_registered {
            std::future::ready(Ok(()))
        } else {
            std::future::ready(Err(ReportGap(
                "client did not report a delivery worker registration",
            )))
        }
    }

    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    fn request_permission(&self) -> Self::PermissionFut<'_> {
        std::future::ready(self.permission)
    }

    fn create_subscription<'a>(&'a self, _server_key: &'a [u8]) -> Self::SubscribeFut<'a> {
        match self.subscription.clone() {
            Some(subscription) => std::future::ready(Ok(subscription)),
            None => std::future::ready(Err(ReportGap(
                "client did not report a created subscription",
            ))),
        }
    }

    fn current_subscription(&self) -> Self::CurrentFut<'_> {
        std::future::ready(Ok(self.subscription.clone()))
    }

    fn cancel_subscription(&self) -> Self::CancelFut<'_> {
        // The client cancels its own subscription before reporting; nothing
        // to do on this side.
        std::future::ready(Ok(()))
    }
}

/// [`LocationSource`] over a client-reported geolocation outcome: either a
/// coordinate pair or the failure class of the platform call.
#[derive(Debug, Clone)]
pub struct ReportedLocation {
    outcome: Result<Coordinates, LocationError>,
}

impl ReportedLocation {
    pub fn fixed(coordinates: Coordinates) -> Self {
        Self {
            outcome: Ok(coordinates),
        }
    }

    pub fn failed(error: LocationError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl LocationSource for ReportedLocation {
    type Fut<'a>
        = std::future::Ready<Result<Coordinates, LocationError>>
    where
        Self: 'a;

    fn fix(&self) -> Self::Fut<'_> {
        std::future::ready(self.outcome)
    }
}
