use std::time::Duration;

use crate::ports::location::{LocationError, LocationSource};
use crate::ports::time::TimeProvider;
use crate::types::geo::{Coordinates, LocationFix};

/// Default service-area location used whenever a live fix cannot be
/// obtained: Rosemead, CA.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    lat: 34.0517,
    lng: -118.0732,
};

/// Bounded wait for a single position fix.
const ACQUISITION_WAIT: Duration = Duration::from_secs(10);

/// Resolves a usable coordinate pair, always. A live fix from the source is
/// preferred; any failure, including the 10 second bound elapsing, recovers
/// to [`FALLBACK_COORDINATES`] with a reason string. Single-shot, no
/// retries, never an error to the caller.
#[derive(Debug, Clone)]
pub struct LocationResolver<L, T> {
    source: L,
    time: T,
}

impl<L, T> LocationResolver<L, T>
where
    L: LocationSource,
    T: TimeProvider,
{
    pub fn new(source: L, time: T) -> Self {
        Self { source, time }
    }

    pub async fn resolve(&self) -> LocationFix {
        let fix = self.source.fix();
        let bound = self.time.sleep(ACQUISITION_WAIT);
        tokio::pin!(fix);
        tokio::pin!(bound);

        let outcome = tokio::select! {
            result = &mut fix => result,
            _ = &mut bound => Err(LocationError::Timeout),
        };

        match outcome {
            Ok(coordinates) => LocationFix {
                coordinates,
                using_fallback: false,
                reason: None,
            },
            Err(err) => fallback_fix(err),
        }
    }
}

fn fallback_fix(err: LocationError) -> LocationFix {
    LocationFix {
        coordinates: FALLBACK_COORDINATES,
        using_fallback: true,
        reason: Some(err.to_string()),
    }
}
