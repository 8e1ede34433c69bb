// Toggle Online Status Use Case

use crate::error::{AppError, Result};
use crate::port::TransactionalQueueStore;

/// Flip a business's online flag. An unset flag counts as online, so the
/// first toggle on a legacy row takes it offline. Returns the new state.
pub async fn execute(store: &dyn TransactionalQueueStore, slug: &str) -> Result<bool> {
    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;

    let now_online = business.toggle_online();

    tx.update_business(&business).await?;
    tx.commit().await?;

    Ok(now_online)
}
