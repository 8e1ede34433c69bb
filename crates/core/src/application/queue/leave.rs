// Leave Queue Use Case

use crate::error::{AppError, Result};
use crate::port::TransactionalQueueStore;
use serde::{Deserialize, Serialize};

/// Leave request: customer gives up their place in the queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub slug: String,
    pub ticket_id: String,
}

/// Execute leave use case.
///
/// Idempotent: an absent ticket, a ticket in a terminal state, or a ticket
/// belonging to a different business all result in a successful no-op —
/// the caller's intent ("make sure I'm not in the queue") is already
/// satisfied. Returns whether a ticket was actually cancelled.
///
/// # Errors
///
/// * [`AppError::NotFound`] if no business owns the slug
pub async fn execute(store: &dyn TransactionalQueueStore, req: LeaveRequest) -> Result<bool> {
    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(&req.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", req.slug)))?;

    let Some(mut ticket) = tx.find_ticket(&req.ticket_id).await? else {
        return Ok(false);
    };

    if ticket.business_id != business.id || !ticket.is_waiting() {
        return Ok(false);
    }

    ticket.cancel()?;
    business.release_slot();

    tx.update_ticket(&ticket).await?;
    tx.update_business(&business).await?;
    tx.commit().await?;

    Ok(true)
}
