use crate::types::geo::Coordinates;
use crate::types::outage::OutageStatus;

/// Outage-data capability. This is the seam at which a real utility feed is
/// substituted without touching any caller.
pub trait OutageProvider: Clone + Send + Sync + 'static {
    type Fut<'a>: Future<Output = Result<OutageStatus, ProviderError>> + Send + 'a
    where
        Self: 'a;

    fn check_outage_status<'a>(&'a self, coords: Coordinates) -> Self::Fut<'a>;
}

#[derive(Debug, Clone)]
pub enum ProviderError {
    /// The backing data source could not be reached or answered badly.
    Unavailable(String),
    /// The provider is a deliberate stub; it must fail loudly, never return
    /// fabricated data.
    NotImplemented(&'static str),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable(detail) => {
                write!(f, "outage data source unavailable: {detail}")
            }
            ProviderError::NotImplemented(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ProviderError {}
