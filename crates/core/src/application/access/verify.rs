// Password Verification Use Case

use crate::error::Result;
use crate::port::{CredentialHasher, TransactionalQueueStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Verify request, optionally flipping the online flag on success
/// (admin login marks the business online, logout marks it offline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub slug: String,
    pub password: String,

    #[serde(default)]
    pub set_online: Option<bool>,
}

/// Execute password verification.
///
/// Hashed credentials (detected by the `$argon2` prefix) go through the
/// hasher's verify; anything else is a legacy plaintext credential and is
/// compared directly. The legacy path is a migration shim — operators
/// should run the rehash maintenance operation to retire it.
///
/// On success with `set_online` requested, the flag is patched in the
/// same transaction. Always returns Ok(bool); missing businesses and
/// wrong credentials are `false`, not errors.
pub async fn execute(
    store: &dyn TransactionalQueueStore,
    hasher: &dyn CredentialHasher,
    req: VerifyRequest,
) -> Result<bool> {
    let mut tx = store.begin_transaction().await?;

    let Some(mut business) = tx.find_business_by_slug(&req.slug).await? else {
        return Ok(false);
    };

    let Some(stored) = business.credential.clone() else {
        return Ok(false);
    };

    let matched = if business.has_hashed_credential() {
        hasher.verify(&req.password, &stored)
    } else {
        warn!(slug = %req.slug, "Legacy plaintext credential in use; run rehash maintenance");
        stored == req.password
    };

    if !matched {
        return Ok(false);
    }

    if let Some(online) = req.set_online {
        business.is_online = Some(online);
        tx.update_business(&business).await?;
        tx.commit().await?;
    }

    Ok(true)
}
