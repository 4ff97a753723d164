//! Signal-probe collector adapter.

use async_trait::async_trait;

use sitesignals::{SignalBundle, SignalProbe};

use super::BaseSignalCollector;

/// Wraps the sitesignals probe facade behind the collector trait.
pub struct ProbeSignalCollector {
    probe: SignalProbe,
}

impl ProbeSignalCollector {
    pub fn new(probe: SignalProbe) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl BaseSignalCollector for ProbeSignalCollector {
    async fn collect(&self, website: &str) -> SignalBundle {
        self.probe.collect(website).await
    }
}
