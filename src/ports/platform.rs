use crate::types::push::{PermissionStatus, Subscription};

/// The push platform the subscription lifecycle runs against: capability
/// probes, delivery-worker registration, permission negotiation, and the
/// subscription operations themselves. In production the browser owns the
/// real APIs and an adapter replays their reported outcomes; tests drive a
/// scripted double.
pub trait NotificationPlatform: Send + Sync {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type RegisterFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type PermissionFut<'a>: Future<Output = PermissionStatus> + Send + 'a
    where
        Self: 'a;
    type SubscribeFut<'a>: Future<Output = Result<Subscription, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type CurrentFut<'a>: Future<Output = Result<Option<Subscription>, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type CancelFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    fn has_worker_support(&self) -> bool;
    fn has_push_support(&self) -> bool;
    fn has_notification_support(&self) -> bool;

    /// Register the background delivery worker. Called at most once per
    /// successful initialization.
    fn register_worker(&self) -> Self::RegisterFut<'_>;

    fn permission(&self) -> PermissionStatus;
    fn request_permission(&self) -> Self::PermissionFut<'_>;

    /// Create a push subscription keyed to the decoded application server
    /// key.
    fn create_subscription<'a>(&'a self, server_key: &'a [u8]) -> Self::SubscribeFut<'a>;

    fn current_subscription(&self) -> Self::CurrentFut<'_>;
    fn cancel_subscription(&self) -> Self::CancelFut<'_>;
}
