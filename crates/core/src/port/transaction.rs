// Transaction port for atomic operations

use crate::domain::{Business, BusinessId, Ticket, TicketId};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Entry point for transactional queue-store operations
#[async_trait]
pub trait TransactionalQueueStore: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn QueueStoreTransaction>>;
}

/// Business + ticket operations within a transaction.
///
/// Every mutating use case (join, leave, advance, reset, provisioning)
/// touches both a business row and ticket rows; running them through one
/// transaction is what makes each operation all-or-nothing and serializes
/// concurrent advances and joins per business.
#[async_trait]
pub trait QueueStoreTransaction: Transaction {
    async fn find_business_by_slug(&mut self, slug: &str) -> Result<Option<Business>>;

    async fn find_business_by_id(&mut self, id: &BusinessId) -> Result<Option<Business>>;

    async fn find_all_businesses(&mut self) -> Result<Vec<Business>>;

    async fn insert_business(&mut self, business: &Business) -> Result<()>;

    /// Persist all mutable business fields (name, slug, credential,
    /// online flag, counters)
    async fn update_business(&mut self, business: &Business) -> Result<()>;

    /// Delete a business; its tickets cascade
    async fn delete_business(&mut self, id: &BusinessId) -> Result<()>;

    async fn insert_ticket(&mut self, ticket: &Ticket) -> Result<()>;

    async fn find_ticket(&mut self, id: &TicketId) -> Result<Option<Ticket>>;

    /// Find the waiting ticket with this number, if any. Terminal tickets
    /// are never matched (cancelled tickets are not retroactively served).
    async fn find_waiting_ticket_by_number(
        &mut self,
        business_id: &BusinessId,
        number: i64,
    ) -> Result<Option<Ticket>>;

    async fn update_ticket(&mut self, ticket: &Ticket) -> Result<()>;

    /// Bulk-cancel every waiting ticket for a business. Returns the number
    /// of rows transitioned.
    async fn cancel_all_waiting(&mut self, business_id: &BusinessId) -> Result<u64>;

    /// Force-serve waiting tickets whose number is already at or behind
    /// `current_serving` (self-healing for tickets advanced over without
    /// an explicit transition). Returns the number of rows transitioned.
    async fn serve_overtaken(
        &mut self,
        business_id: &BusinessId,
        current_serving: i64,
        served_at: i64,
    ) -> Result<u64>;

    /// Ground-truth count of waiting tickets
    async fn count_waiting(&mut self, business_id: &BusinessId) -> Result<i64>;
}
