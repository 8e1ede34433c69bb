// Repair Use Case - recompute counters from ground truth

use crate::error::{AppError, Result};
use crate::port::{QueueStoreTransaction, TimeProvider, TransactionalQueueStore};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of repairing one business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairOutcome {
    pub slug: String,

    /// Waiting tickets force-served because the queue had advanced past them
    pub healed: u64,

    /// `active_count` after recomputation
    pub active_count: i64,

    /// Whether the stored `active_count` had drifted from ground truth
    pub drift_corrected: bool,
}

/// Result of repairing every business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairSummary {
    pub businesses: usize,
    pub healed: u64,
    pub drift_corrected: usize,
}

async fn repair_one(
    tx: &mut dyn QueueStoreTransaction,
    time_provider: &dyn TimeProvider,
    business: &mut crate::domain::Business,
) -> Result<RepairOutcome> {
    // Tickets the queue advanced over without an explicit transition are
    // self-healed to served.
    let healed = tx
        .serve_overtaken(
            &business.id,
            business.current_serving,
            time_provider.now_millis(),
        )
        .await?;

    let true_count = tx.count_waiting(&business.id).await?;
    let drift_corrected = business.active_count != true_count;
    business.active_count = true_count;

    tx.update_business(business).await?;

    Ok(RepairOutcome {
        slug: business.slug.clone(),
        healed,
        active_count: true_count,
        drift_corrected,
    })
}

/// Repair one business. Idempotent and safe to run at any time: a second
/// run right after the first finds nothing to heal and no drift.
pub async fn execute(
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
    slug: &str,
) -> Result<RepairOutcome> {
    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;

    let outcome = repair_one(tx.as_mut(), time_provider, &mut business).await?;
    tx.commit().await?;

    if outcome.healed > 0 || outcome.drift_corrected {
        info!(
            slug = %outcome.slug,
            healed = outcome.healed,
            active_count = outcome.active_count,
            "Repaired queue counters"
        );
    }

    Ok(outcome)
}

/// Repair every business (maintenance entry point)
pub async fn execute_all(
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
) -> Result<RepairSummary> {
    let mut tx = store.begin_transaction().await?;

    let mut businesses = tx.find_all_businesses().await?;

    let mut healed = 0;
    let mut drift_corrected = 0;
    for business in &mut businesses {
        let outcome = repair_one(tx.as_mut(), time_provider, business).await?;
        healed += outcome.healed;
        if outcome.drift_corrected {
            drift_corrected += 1;
        }
    }

    tx.commit().await?;

    info!(
        businesses = businesses.len(),
        healed = healed,
        drift_corrected = drift_corrected,
        "Repair sweep completed"
    );

    Ok(RepairSummary {
        businesses: businesses.len(),
        healed,
        drift_corrected,
    })
}
