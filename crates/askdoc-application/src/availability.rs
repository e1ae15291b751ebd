//! Availability probe for the remote answer engine.

use askdoc_core::remote::RemoteAnswerEngine;
use std::sync::Arc;

/// Verifies the remote engine is reachable and configured before any
/// upload or question is permitted.
///
/// The probe is a single lightweight generate-content round-trip. Any
/// error from the remote call is captured as `false` and never
/// propagated. Callers run it once per session start and cache the
/// boolean in `SessionState`, re-probing only on demand.
pub struct AvailabilityProbe {
    engine: Arc<dyn RemoteAnswerEngine>,
}

impl AvailabilityProbe {
    pub fn new(engine: Arc<dyn RemoteAnswerEngine>) -> Self {
        Self { engine }
    }

    /// Returns true only on a successful round-trip.
    pub async fn check_availability(&self) -> bool {
        match self.engine.probe().await {
            Ok(()) => {
                tracing::info!("availability probe succeeded");
                true
            }
            Err(e) => {
                tracing::warn!("availability probe failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockEngine;

    #[tokio::test]
    async fn test_probe_success_is_true() {
        let probe = AvailabilityProbe::new(Arc::new(MockEngine::new("ok")));
        assert!(probe.check_availability().await);
    }

    #[tokio::test]
    async fn test_probe_failure_is_false_and_does_not_propagate() {
        let probe = AvailabilityProbe::new(Arc::new(MockEngine::unreachable_engine()));
        assert!(!probe.check_availability().await);
    }
}
