use std::pin::Pin;
use std::time::Duration;

use rand::Rng;

use crate::adapters::TokioTimeProvider;
use crate::config::OutageBackendKind;
use crate::ports::outage::{OutageProvider, ProviderError};
use crate::ports::time::TimeProvider;
use crate::types::geo::Coordinates;
use crate::types::outage::OutageStatus;

/// Bounding box the mock provider treats as affected (part of the Los
/// Angeles service area).
const OUTAGE_LAT_MIN: f64 = 33.0;
const OUTAGE_LAT_MAX: f64 = 34.0;
const OUTAGE_LNG_MIN: f64 = -118.5;
const OUTAGE_LNG_MAX: f64 = -117.5;

/// Stand-in for real network latency.
const MOCK_LATENCY: Duration = Duration::from_millis(500);

const OUTAGE_MESSAGE: &str =
    "Power outage detected in your area. Crews are working to restore service.";
const NO_OUTAGE_MESSAGE: &str = "No outage detected at your location.";

/// Deterministic development provider. Whether an outage is reported is a
/// pure function of the coordinates; the synthesized detail fields (restore
/// estimate, affected-customer count, outage id) are not reproducible
/// bit-for-bit.
#[derive(Debug, Clone)]
pub struct MockOutageProvider<T> {
    time: T,
}

impl<T: TimeProvider> MockOutageProvider<T> {
    pub fn new(time: T) -> Self {
        Self { time }
    }

    fn status_for(&self, coords: Coordinates) -> OutageStatus {
        let has_outage = (OUTAGE_LAT_MIN..=OUTAGE_LAT_MAX).contains(&coords.lat)
            && (OUTAGE_LNG_MIN..=OUTAGE_LNG_MAX).contains(&coords.lng);

        if !has_outage {
            return OutageStatus::clear(NO_OUTAGE_MESSAGE);
        }

        let mut rng = rand::thread_rng();
        OutageStatus {
            has_outage: true,
            outage_id: Some(format!("MOCK-OUTAGE-{}", rng.gen_range(0..10_000))),
            estimated_restore_time: Some(self.time.now() + time::Duration::hours(2)),
            affected_customers: Some(rng.gen_range(100..5_100)),
            message: Some(OUTAGE_MESSAGE.to_string()),
        }
    }
}

impl<T: TimeProvider> OutageProvider for MockOutageProvider<T> {
    type Fut<'a>
        = Pin<Box<dyn Future<Output = Result<OutageStatus, ProviderError>> + Send + 'a>>
    where
        Self: 'a;

    fn check_outage_status<'a>(&'a self, coords: Coordinates) -> Self::Fut<'a> {
        Box::pin(async move {
            self.time.sleep(MOCK_LATENCY).await;
            Ok(self.status_for(coords))
        })
    }
}

/// Extension point for a genuine utility outage feed. Deliberately
/// unfinished: every call fails loudly and immediately, and nothing is ever
/// fabricated. Not selected in the default configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityOutageProvider;

impl OutageProvider for UtilityOutageProvider {
    type Fut<'a>
        = std::future::Ready<Result<OutageStatus, ProviderError>>
    where
        Self: 'a;

    fn check_outage_status<'a>(&'a self, _coords: Coordinates) -> Self::Fut<'a> {
        std::future::ready(Err(ProviderError::NotImplemented(
            "utility outage feed is not implemented; run with the mock backend",
        )))
    }
}

/// The provider selected at startup. Substituting a backend swaps this value
/// in configuration; callers only ever see [`OutageProvider`].
#[derive(Debug, Clone)]
pub enum OutageBackend {
    Mock(MockOutageProvider<TokioTimeProvider>),
    Utility(UtilityOutageProvider),
}

impl OutageBackend {
    pub fn from_kind(kind: OutageBackendKind) -> Self {
        match kind {
            OutageBackendKind::Mock => {
                OutageBackend::Mock(MockOutageProvider::new(TokioTimeProvider))
            }
            OutageBackendKind::Utility => OutageBackend::Utility(UtilityOutageProvider),
        }
    }
}

impl OutageProvider for OutageBackend {
    type Fut<'a>
        = Pin<Box<dyn Future<Output = Result<OutageStatus, ProviderError>> + Send + 'a>>
    where
        Self: 'a;

    fn check_outage_status<'a>(&'a self, coords: Coordinates) -> Self::Fut<'a> {
        match self {
            OutageBackend::Mock(provider) => provider.check_outage_status(coords),
            OutageBackend::Utility(provider) => Box::pin(provider.check_outage_status(coords)),
        }
    }
}

/// Thin orchestration over the configured provider: logs failures and
/// re-raises them unchanged. Presenting a failed check to the user is the
/// UI layer's job.
#[derive(Debug, Clone)]
pub struct OutageService<P> {
    provider: P,
}

impl<P: OutageProvider> OutageService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn check_outage(&self, coords: Coordinates) -> Result<OutageStatus, ProviderError> {
        self.provider
            .check_outage_status(coords)
            .await
            .map_err(|err| {
                eprintln!(
                    "outage lookup failed: {err} (lat {}, lng {})",
                    coords.lat, coords.lng
                );
                err
            })
    }
}
