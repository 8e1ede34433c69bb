// Reset Queue Use Case

use crate::error::{AppError, Result};
use crate::port::TransactionalQueueStore;
use tracing::warn;

/// Execute reset use case (single transaction).
///
/// Destructive and irreversible: zeroes both counters and bulk-cancels
/// every waiting ticket, so numbering restarts from 1 on the next join.
/// Intended as an emergency operation, not a normal business-day reset.
/// Returns the number of tickets cancelled.
pub async fn execute(store: &dyn TransactionalQueueStore, slug: &str) -> Result<u64> {
    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;

    let cancelled = tx.cancel_all_waiting(&business.id).await?;

    business.reset_counters();
    tx.update_business(&business).await?;
    tx.commit().await?;

    warn!(slug = %slug, cancelled = cancelled, "Queue reset");

    Ok(cancelled)
}
