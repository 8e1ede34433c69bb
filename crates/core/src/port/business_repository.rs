// Business Repository Port (Interface)

use crate::domain::{Business, BusinessId};
use crate::error::Result;
use async_trait::async_trait;

/// Read-side repository for Business lookups.
///
/// Pure queries only; every mutation goes through a
/// [`QueueStoreTransaction`](crate::port::QueueStoreTransaction) so it
/// stays atomic with the ticket rows it touches.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Find business by slug (unique index)
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>>;

    /// Find business by ID
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>>;

    /// List every business (super-admin dashboard)
    async fn find_all(&self) -> Result<Vec<Business>>;
}
