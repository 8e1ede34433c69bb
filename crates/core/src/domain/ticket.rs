// Ticket Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::business::BusinessId;
use crate::domain::error::{DomainError, Result};

/// Ticket ID (UUID v4)
pub type TicketId = String;

/// Ticket status. `Waiting` is the only non-terminal state; the valid
/// transitions are `waiting -> served` and `waiting -> cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Waiting,
    Served,
    Cancelled,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Waiting => write!(f, "waiting"),
            TicketStatus::Served => write!(f, "served"),
            TicketStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "waiting" => Ok(TicketStatus::Waiting),
            "served" => Ok(TicketStatus::Served),
            "cancelled" => Ok(TicketStatus::Cancelled),
            other => Err(DomainError::ValidationError(format!(
                "Unknown ticket status: {}",
                other
            ))),
        }
    }
}

/// Ticket entity: one customer's place in a business's queue.
///
/// Status transitions go through [`Ticket::serve`] and [`Ticket::cancel`]
/// so the state machine is enforced in one place, not by caller discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub business_id: BusinessId,

    /// Sequential number within the business, assigned from 1. Never
    /// changes after creation.
    pub number: i64,

    pub name: Option<String>,
    pub phone: Option<String>,

    pub status: TicketStatus,

    pub created_at: i64, // epoch ms
    pub served_at: Option<i64>,
}

impl Ticket {
    /// Create a new waiting ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique ticket ID (injected, not generated)
    /// * `created_at` - Issuance timestamp in epoch ms (injected)
    /// * `business_id` - Owning business
    /// * `number` - Sequential number allocated by the business
    /// * `name` / `phone` - Optional customer identifier
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        business_id: impl Into<String>,
        number: i64,
        name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            business_id: business_id.into(),
            number,
            name,
            phone,
            status: TicketStatus::Waiting,
            created_at,
            served_at: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status == TicketStatus::Waiting
    }

    /// Transition to Served with explicit timestamp
    pub fn serve(&mut self, now_millis: i64) -> Result<()> {
        if self.status != TicketStatus::Waiting {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: TicketStatus::Served.to_string(),
            });
        }
        self.status = TicketStatus::Served;
        self.served_at = Some(now_millis);
        Ok(())
    }

    /// Transition to Cancelled
    pub fn cancel(&mut self) -> Result<()> {
        if self.status != TicketStatus::Waiting {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: TicketStatus::Cancelled.to_string(),
            });
        }
        self.status = TicketStatus::Cancelled;
        Ok(())
    }
}

impl Ticket {
    /// Create a test ticket with deterministic ID and timestamp.
    ///
    /// **Note**: This method should only be used in tests.
    pub fn new_test(business_id: impl Into<String>, number: i64) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let id = format!("ticket-{}", counter);
        let created_at = (counter * 1000) as i64;

        Self::new(id, created_at, business_id, number, None, None)
    }
}
