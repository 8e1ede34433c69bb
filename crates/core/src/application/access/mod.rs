// Access Guard - credentials and tenant provisioning

pub mod provisioning;
pub mod rehash;
pub mod verify;

pub use provisioning::{CreateBusinessRequest, UpdateBusinessRequest};
pub use verify::VerifyRequest;

use crate::domain::BusinessId;
use crate::error::Result;
use crate::port::{CredentialHasher, IdProvider, TimeProvider, TransactionalQueueStore};
use std::sync::Arc;

/// Shared operator credential, read from process configuration.
/// Deliberately not a database row: there is one super admin per
/// deployment, not per tenant.
#[derive(Debug, Clone)]
pub struct SuperAdminConfig {
    pub user: String,
    pub password: String,
}

impl SuperAdminConfig {
    /// Load from `WAITLINE_SUPER_ADMIN_USER` / `WAITLINE_SUPER_ADMIN_PASSWORD`.
    /// Returns None when either is unset; super-admin checks then always fail.
    pub fn from_env() -> Option<Self> {
        let user = std::env::var("WAITLINE_SUPER_ADMIN_USER").ok()?;
        let password = std::env::var("WAITLINE_SUPER_ADMIN_PASSWORD").ok()?;
        Some(Self { user, password })
    }
}

/// Access Service: password verification gating the queue controller's
/// mutating operations, plus super-admin tenant provisioning.
pub struct AccessService {
    store: Arc<dyn TransactionalQueueStore>,
    hasher: Arc<dyn CredentialHasher>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    super_admin: Option<SuperAdminConfig>,
}

impl AccessService {
    pub fn new(
        store: Arc<dyn TransactionalQueueStore>,
        hasher: Arc<dyn CredentialHasher>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        super_admin: Option<SuperAdminConfig>,
    ) -> Self {
        Self {
            store,
            hasher,
            id_provider,
            time_provider,
            super_admin,
        }
    }

    /// Check a business admin password. Returns false for a missing
    /// business or wrong credential — this is an authorization check, not
    /// existence validation, so it never errors for bad input.
    pub async fn verify_password(&self, req: VerifyRequest) -> Result<bool> {
        verify::execute(self.store.as_ref(), self.hasher.as_ref(), req).await
    }

    /// Check the shared operator credential from configuration
    pub fn verify_super_admin(&self, user: &str, password: &str) -> bool {
        match &self.super_admin {
            Some(config) => config.user == user && config.password == password,
            None => false,
        }
    }

    /// Provision a new business (super-admin operation)
    pub async fn create_business(&self, req: CreateBusinessRequest) -> Result<BusinessId> {
        provisioning::create(
            self.store.as_ref(),
            self.hasher.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Update name/slug/password. The password is rehashed only when a
    /// non-empty replacement is supplied.
    pub async fn update_business(&self, req: UpdateBusinessRequest) -> Result<()> {
        provisioning::update(self.store.as_ref(), self.hasher.as_ref(), req).await
    }

    /// Delete a business and (via cascade) all its tickets
    pub async fn delete_business(&self, id: &BusinessId) -> Result<()> {
        provisioning::delete(self.store.as_ref(), id).await
    }

    /// One-time migration: rehash every legacy plaintext credential.
    /// Returns the number of credentials upgraded.
    pub async fn rehash_legacy_credentials(&self) -> Result<u64> {
        rehash::execute(self.store.as_ref(), self.hasher.as_ref()).await
    }
}
