// Advance Queue Use Case ("next customer")

use crate::domain::Ticket;
use crate::error::{AppError, Result};
use crate::port::{TimeProvider, TransactionalQueueStore};

/// How many spots ahead of their turn a customer gets a heads-up message
pub const NOTIFY_SPOTS_AHEAD: i64 = 3;

/// Result of advancing the queue
#[derive(Debug)]
pub struct AdvanceOutcome {
    /// The new `current_serving` value
    pub now_serving: i64,

    /// The ticket transitioned to served, if one matched. The first
    /// advance on a fresh queue looks for ticket #0, which never exists;
    /// that silent no-op is preserved observed behavior.
    pub served_ticket: Option<Ticket>,

    /// The waiting ticket a few spots back, for notification dispatch
    pub ticket_to_notify: Option<Ticket>,
}

/// Execute advance use case (single transaction).
///
/// Increments `current_serving`, releases one waiting slot and marks the
/// ticket that was just finished (`current_serving - 1` after the bump)
/// as served. Only waiting tickets are matched: a cancelled ticket is
/// never retroactively served.
///
/// # Errors
///
/// * [`AppError::NotFound`] if no business owns the slug
/// * [`AppError::QueueEmpty`] when `current_serving > last_issued`
pub async fn execute(
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
    slug: &str,
) -> Result<AdvanceOutcome> {
    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;

    if business.current_serving > business.last_issued {
        return Err(AppError::QueueEmpty(format!(
            "Nothing left to call for '{}'",
            business.name
        )));
    }

    let now_serving = business.advance();

    let served_ticket = match tx
        .find_waiting_ticket_by_number(&business.id, now_serving - 1)
        .await?
    {
        Some(mut ticket) => {
            ticket.serve(time_provider.now_millis())?;
            tx.update_ticket(&ticket).await?;
            Some(ticket)
        }
        None => None,
    };

    tx.update_business(&business).await?;

    let ticket_to_notify = tx
        .find_waiting_ticket_by_number(&business.id, now_serving + NOTIFY_SPOTS_AHEAD)
        .await?;

    tx.commit().await?;

    Ok(AdvanceOutcome {
        now_serving,
        served_ticket,
        ticket_to_notify,
    })
}
