// Legacy Credential Migration Use Case

use crate::error::Result;
use crate::port::{CredentialHasher, TransactionalQueueStore};
use tracing::info;

/// Rehash every legacy plaintext credential with the current hasher.
/// Idempotent: already-hashed and absent credentials are skipped.
/// Returns the number of credentials upgraded.
pub async fn execute(
    store: &dyn TransactionalQueueStore,
    hasher: &dyn CredentialHasher,
) -> Result<u64> {
    let mut tx = store.begin_transaction().await?;

    let mut upgraded = 0u64;
    for mut business in tx.find_all_businesses().await? {
        if business.has_hashed_credential() {
            continue;
        }
        let Some(plaintext) = business.credential.clone() else {
            continue;
        };

        business.credential = Some(hasher.hash(&plaintext)?);
        tx.update_business(&business).await?;
        upgraded += 1;
    }

    tx.commit().await?;

    info!(upgraded = upgraded, "Legacy credential rehash completed");

    Ok(upgraded)
}
