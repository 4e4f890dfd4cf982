use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::{
    ports::{DeliveryPort, ListingSource},
    state::StateStore,
    Result,
};

/// Aggregate counts for one run, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub new_ads: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Sequences one run: load state, fetch+filter, dedup, deliver with pacing,
/// persist state. Owns the in-memory state for the run's duration.
pub struct Runner {
    source: Arc<dyn ListingSource>,
    delivery: Arc<dyn DeliveryPort>,
    store: Arc<dyn StateStore>,
    send_interval: Duration,
}

impl Runner {
    pub fn new(
        source: Arc<dyn ListingSource>,
        delivery: Arc<dyn DeliveryPort>,
        store: Arc<dyn StateStore>,
        send_interval: Duration,
    ) -> Self {
        Self {
            source,
            delivery,
            store,
            send_interval,
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let mut state = self.store.load().await;

        info!("Fetching Lalafo ads...");
        let ads = self.source.fetch_filtered_ads().await?;
        info!(count = ads.len(), "Got ads after filters");

        let fetched = ads.len();
        let new_ads: Vec<_> = ads
            .into_iter()
            .filter(|ad| !state.contains(&ad.id))
            .collect();
        info!(count = new_ads.len(), "New ads to send");

        let mut sent = 0usize;
        let mut failed = 0usize;

        let new_count = new_ads.len();
        for ad in &new_ads {
            info!(id = %ad.id, title = %ad.title, "Sending ad");
            match self.delivery.deliver(ad).await {
                Ok(()) => {
                    state.mark_sent(ad.id.clone());
                    sent += 1;
                    sleep(self.send_interval).await;
                }
                Err(e) => {
                    error!(id = %ad.id, error = %e, "Failed to send ad");
                    failed += 1;
                }
            }
        }

        self.store.save(&state).await?;

        info!(sent, failed, "Done");
        Ok(RunReport {
            fetched,
            new_ads: new_count,
            sent,
            failed,
        })
    }
}
