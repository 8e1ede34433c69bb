// Join Queue Use Case

use crate::domain::{Ticket, TicketId};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, TimeProvider, TransactionalQueueStore};
use serde::{Deserialize, Serialize};

/// Join request: customer asks for the next ticket number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub slug: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

const MAX_SLUG_LEN: usize = 64;
const MAX_NAME_LEN: usize = 128;

pub(crate) fn validate_request(req: &JoinRequest) -> Result<()> {
    if req.slug.is_empty() {
        return Err(AppError::Validation("Slug must not be empty".to_string()));
    }
    if req.slug.len() > MAX_SLUG_LEN {
        return Err(AppError::Validation(format!(
            "Slug too long (max {} chars)",
            MAX_SLUG_LEN
        )));
    }
    if let Some(name) = &req.name {
        if name.len() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Name too long (max {} chars)",
                MAX_NAME_LEN
            )));
        }
    }
    Ok(())
}

/// Execute join use case (with transaction for atomicity)
///
/// Assigns `number = last_issued + 1` and increments the business counters
/// in the same transaction that inserts the ticket, so concurrent joins
/// never allocate the same number twice.
///
/// # Errors
///
/// * [`AppError::NotFound`] if no business owns the slug
/// * [`AppError::Closed`] if the business is not accepting tickets
pub async fn execute(
    store: &dyn TransactionalQueueStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: JoinRequest,
) -> Result<TicketId> {
    validate_request(&req)?;

    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_slug(&req.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", req.slug)))?;

    if !business.is_open() {
        return Err(AppError::Closed(format!(
            "'{}' is not taking new tickets right now",
            business.name
        )));
    }

    let number = business.issue_number();

    let ticket = Ticket::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        business.id.clone(),
        number,
        req.name,
        req.phone,
    );

    tx.insert_ticket(&ticket).await?;
    tx.update_business(&business).await?;
    tx.commit().await?;

    Ok(ticket.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_slug() {
        let req = JoinRequest {
            slug: "".to_string(),
            name: None,
            phone: None,
        };
        let result = validate_request(&req);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_slug_too_long() {
        let req = JoinRequest {
            slug: "a".repeat(65),
            name: None,
            phone: None,
        };
        let result = validate_request(&req);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_valid_request() {
        let req = JoinRequest {
            slug: "corner-cafe".to_string(),
            name: Some("Ada".to_string()),
            phone: Some("+15551234567".to_string()),
        };
        assert!(validate_request(&req).is_ok());
    }
}
