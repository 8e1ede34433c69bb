// Repair Scheduler - periodic counter reconciliation

use crate::application::queue::repair;
use crate::error::Result;
use crate::port::{TimeProvider, TransactionalQueueStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

/// Repair scheduler
///
/// Runs the repair sweep (force-serve overtaken tickets, recompute
/// `active_count` from ground truth) in the background as a safety net
/// for denormalized counter drift.
pub struct RepairScheduler {
    store: Arc<dyn TransactionalQueueStore>,
    time_provider: Arc<dyn TimeProvider>,
    interval_hours: u64,
}

impl RepairScheduler {
    /// # Arguments
    /// * `store` - Transactional queue store
    /// * `time_provider` - Clock for `served_at` stamps
    /// * `interval_hours` - How often to run the sweep (hours)
    pub fn new(
        store: Arc<dyn TransactionalQueueStore>,
        time_provider: Arc<dyn TimeProvider>,
        interval_hours: u64,
    ) -> Self {
        Self {
            store,
            time_provider,
            interval_hours,
        }
    }

    /// Run repair loop (background task)
    ///
    /// Should be spawned in tokio::spawn
    pub async fn run(self) {
        info!(
            interval_hours = self.interval_hours,
            "Repair scheduler started"
        );

        let mut tick = interval(Duration::from_secs(self.interval_hours * 3600));

        loop {
            tick.tick().await;

            match repair::execute_all(self.store.as_ref(), self.time_provider.as_ref()).await {
                Ok(summary) => {
                    info!(
                        businesses = summary.businesses,
                        healed = summary.healed,
                        drift_corrected = summary.drift_corrected,
                        "Scheduled repair sweep completed"
                    );
                }
                Err(e) => {
                    error!(error = ?e, "Scheduled repair sweep failed");
                }
            }
        }
    }

    /// Run repair immediately (for manual trigger)
    pub async fn run_now(&self) -> Result<repair::RepairSummary> {
        repair::execute_all(self.store.as_ref(), self.time_provider.as_ref()).await
    }
}
