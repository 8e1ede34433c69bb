// Queue Service - Core use cases for ticket and queue management

pub mod advance;
pub mod join;
pub mod leave;
pub mod repair;
pub mod reset;
pub mod toggle;

pub use advance::AdvanceOutcome;
pub use join::JoinRequest;
pub use leave::LeaveRequest;
pub use repair::{RepairOutcome, RepairSummary};

use crate::domain::TicketId;
use crate::error::Result;
use crate::port::{IdProvider, Notifier, TimeProvider, TransactionalQueueStore};
use std::sync::Arc;
use tracing::info;

/// Queue Service: the ticket ledger and queue controller operations.
///
/// Each mutating operation runs inside one store transaction; the only
/// side effect outside a transaction is the fire-and-forget notification
/// dispatched after a successful advance.
pub struct QueueService {
    store: Arc<dyn TransactionalQueueStore>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    notifier: Arc<dyn Notifier>,
}

impl QueueService {
    pub fn new(
        store: Arc<dyn TransactionalQueueStore>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            id_provider,
            time_provider,
            notifier,
        }
    }

    /// Issue a new ticket for a customer
    pub async fn join(&self, req: JoinRequest) -> Result<TicketId> {
        join::execute(
            self.store.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Cancel a customer's own ticket (idempotent)
    pub async fn leave(&self, req: LeaveRequest) -> Result<bool> {
        leave::execute(self.store.as_ref(), req).await
    }

    /// Call the next customer; dispatches a heads-up notification to the
    /// ticket a few spots back, without blocking or failing the advance.
    pub async fn next_customer(&self, slug: &str) -> Result<AdvanceOutcome> {
        let outcome =
            advance::execute(self.store.as_ref(), self.time_provider.as_ref(), slug).await?;

        if let Some(ticket) = &outcome.ticket_to_notify {
            if let Some(phone) = ticket.phone.clone() {
                let message = format!(
                    "Heads up! Ticket #{}, you are almost up. Please head to the counter.",
                    ticket.number
                );
                let notifier = Arc::clone(&self.notifier);
                tokio::spawn(async move {
                    notifier.send(&phone, &message).await;
                });
            }
        }

        info!(
            slug = %slug,
            now_serving = outcome.now_serving,
            served = outcome.served_ticket.as_ref().map(|t| t.number),
            "Queue advanced"
        );

        Ok(outcome)
    }

    /// Flip the online flag. Returns the new state.
    pub async fn toggle_status(&self, slug: &str) -> Result<bool> {
        toggle::execute(self.store.as_ref(), slug).await
    }

    /// Emergency reset: zero counters and cancel all waiting tickets.
    /// Returns the number of tickets cancelled.
    pub async fn reset_queue(&self, slug: &str) -> Result<u64> {
        reset::execute(self.store.as_ref(), slug).await
    }

    /// Recompute one business's counters from ground truth
    pub async fn repair(&self, slug: &str) -> Result<RepairOutcome> {
        repair::execute(self.store.as_ref(), self.time_provider.as_ref(), slug).await
    }

    /// Recompute every business's counters from ground truth
    pub async fn repair_counts(&self) -> Result<RepairSummary> {
        repair::execute_all(self.store.as_ref(), self.time_provider.as_ref()).await
    }
}
