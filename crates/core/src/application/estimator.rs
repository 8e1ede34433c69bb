// Wait Estimator - live position and predicted wait time

use crate::domain::{Business, Ticket};
use crate::error::Result;
use crate::port::TicketRepository;
use std::sync::Arc;

/// How many recently served tickets feed the moving average
pub const SAMPLE_SIZE: i64 = 5;

/// Fallback minutes per person when there is not enough service history
pub const DEFAULT_MINUTES_PER_PERSON: i64 = 10;

/// Average inter-service time in whole minutes, from `served_at`
/// timestamps ordered newest first. Floored at 1 minute per ticket.
///
/// This is a simple moving-average throughput predictor, intentionally
/// naive: no smoothing, no outlier rejection, no confidence interval.
pub fn minutes_per_person(served_at_desc: &[i64]) -> i64 {
    let n = served_at_desc.len() as i64;
    if n < 2 {
        return DEFAULT_MINUTES_PER_PERSON;
    }

    let newest = served_at_desc[0];
    let oldest = served_at_desc[served_at_desc.len() - 1];
    let avg_ms = (newest - oldest) / (n - 1);

    (avg_ms / 60_000).max(1)
}

/// Predicted wait in minutes for `people_ahead` customers
pub fn estimate_wait_minutes(served_at_desc: &[i64], people_ahead: i64) -> i64 {
    minutes_per_person(served_at_desc) * people_ahead.max(0)
}

/// Live estimate attached to a ticket query
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TicketEstimate {
    pub people_ahead: i64,
    pub estimated_wait_minutes: i64,

    /// False when the ticket's number is already at or behind
    /// `current_serving` — the customer has been called and
    /// `people_ahead` is irrelevant.
    pub still_waiting_to_be_called: bool,
}

/// Wait Estimator: derives `people_ahead` and a predicted wait time for a
/// ticket from ledger state. Recomputed fresh on every query, never cached.
pub struct WaitEstimator {
    tickets: Arc<dyn TicketRepository>,
}

impl WaitEstimator {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// Waiting tickets of the same business with a lower number
    pub async fn people_ahead(&self, ticket: &Ticket) -> Result<i64> {
        self.tickets
            .count_waiting_before(&ticket.business_id, ticket.number)
            .await
    }

    /// Full estimate for a ticket against its business's current state
    pub async fn estimate(&self, business: &Business, ticket: &Ticket) -> Result<TicketEstimate> {
        let people_ahead = self.people_ahead(ticket).await?;

        let samples: Vec<i64> = self
            .tickets
            .recent_served(&ticket.business_id, SAMPLE_SIZE)
            .await?
            .iter()
            .filter_map(|t| t.served_at)
            .collect();

        Ok(TicketEstimate {
            people_ahead,
            estimated_wait_minutes: estimate_wait_minutes(&samples, people_ahead),
            still_waiting_to_be_called: ticket.number > business.current_serving,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_with_too_few_samples() {
        assert_eq!(minutes_per_person(&[]), DEFAULT_MINUTES_PER_PERSON);
        assert_eq!(minutes_per_person(&[120_000]), DEFAULT_MINUTES_PER_PERSON);
    }

    #[test]
    fn test_average_inter_service_time() {
        // Served at 0, 3, 6, 9, 12 minutes -> 3 minutes apart
        let samples = [720_000, 540_000, 360_000, 180_000, 0];
        assert_eq!(minutes_per_person(&samples), 3);
    }

    #[test]
    fn test_floor_at_one_minute() {
        // 10 seconds apart is still charged as 1 minute per person
        let samples = [20_000, 10_000, 0];
        assert_eq!(minutes_per_person(&samples), 1);
    }

    #[test]
    fn test_estimate_scales_with_people_ahead() {
        let samples = [720_000, 540_000, 360_000, 180_000, 0];
        assert_eq!(estimate_wait_minutes(&samples, 4), 12);
        assert_eq!(estimate_wait_minutes(&samples, 0), 0);
        // Negative position never yields a negative estimate
        assert_eq!(estimate_wait_minutes(&samples, -1), 0);
    }

    #[test]
    fn test_estimate_with_no_history_uses_default() {
        assert_eq!(estimate_wait_minutes(&[], 2), 2 * DEFAULT_MINUTES_PER_PERSON);
    }
}
