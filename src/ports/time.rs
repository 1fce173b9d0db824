use std::time::Duration;

use time::OffsetDateTime;

/// Clock seam: everything in the subsystem that waits or stamps time goes
/// through this so tests can drive the clock by hand.
pub trait TimeProvider: Clone + Send + Sync + 'static {
    type Sleep<'a>: Future<Output = ()> + Send + 'a
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime;
    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a>;
}
