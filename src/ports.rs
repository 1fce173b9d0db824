pub mod location;
pub mod outage;
pub mod platform;
pub mod push;
pub mod store;
pub mod time;

pub use location::{LocationError, LocationSource};
pub use outage::{OutageProvider, ProviderError};
pub use platform::NotificationPlatform;
pub use push::PushSender;
pub use store::{StoreError, SubscriptionStore};
pub use time::TimeProvider;
