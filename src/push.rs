pub(crate) mod manager;
pub(crate) mod vapid;

pub use manager::{NotificationManager, NotifyError};
pub use vapid::{
    ServerKeyError, VapidConfig, VapidConfigStatus, VapidCredentials, decode_server_key,
    generate_vapid_credentials, load_vapid_config,
};
