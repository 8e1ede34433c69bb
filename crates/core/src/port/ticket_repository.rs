// Ticket Repository Port (Interface)

use crate::domain::{BusinessId, Ticket, TicketId};
use crate::error::Result;
use async_trait::async_trait;

/// Read-side repository for Ticket lookups and the wait-estimator inputs.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find ticket by ID
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>>;

    /// Find ticket by (business, number)
    async fn find_by_number(&self, business_id: &BusinessId, number: i64)
        -> Result<Option<Ticket>>;

    /// Count waiting tickets with a lower number ("people ahead")
    async fn count_waiting_before(&self, business_id: &BusinessId, number: i64) -> Result<i64>;

    /// Most recently served tickets, newest first (estimator sample)
    async fn recent_served(&self, business_id: &BusinessId, limit: i64) -> Result<Vec<Ticket>>;
}
