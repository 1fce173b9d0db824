use crate::types::geo::Coordinates;

/// A single-shot source of the device position. The resolver bounds the wait
/// and recovers every failure, so implementations report errors freely.
pub trait LocationSource: Send + Sync {
    type Fut<'a>: Future<Output = Result<Coordinates, LocationError>> + Send + 'a
    where
        Self: 'a;

    fn fix(&self) -> Self::Fut<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    Unsupported,
    PermissionDenied,
    Unavailable,
    Timeout,
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::Unsupported => {
                f.write_str("location services are not available on this device")
            }
            LocationError::PermissionDenied => f.write_str("location permission was denied"),
            LocationError::Unavailable => f.write_str("location information is unavailable"),
            LocationError::Timeout => f.write_str("the location request timed out"),
        }
    }
}

impl std::error::Error for LocationError {}
