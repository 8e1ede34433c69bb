//! Queue Lifecycle Integration Tests
//!
//! Exercises the ticket ledger and queue controller against real SQLite:
//! sequential numbering, advance semantics, idempotent leave, reset and
//! the repair sweep.

use std::sync::Arc;

use waitline_core::application::queue::{JoinRequest, LeaveRequest};
use waitline_core::application::QueueService;
use waitline_core::domain::{Business, TicketStatus};
use waitline_core::error::AppError;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{
    BusinessRepository, NoopNotifier, TicketRepository, TransactionalQueueStore,
};
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueStore};

async fn setup() -> (Arc<SqliteQueueStore>, QueueService) {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqliteQueueStore::new(pool));
    let service = QueueService::new(
        store.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(NoopNotifier),
    );
    (store, service)
}

async fn seed_business(store: &SqliteQueueStore, slug: &str) -> Business {
    let business = Business::new_test(slug, "Test Business");
    let mut tx = store.begin_transaction().await.unwrap();
    tx.insert_business(&business).await.unwrap();
    tx.commit().await.unwrap();
    business
}

async fn business_by_slug(store: &SqliteQueueStore, slug: &str) -> Business {
    BusinessRepository::find_by_slug(store, slug)
        .await
        .unwrap()
        .unwrap()
}

fn join(slug: &str) -> JoinRequest {
    JoinRequest {
        slug: slug.to_string(),
        name: None,
        phone: None,
    }
}

#[tokio::test]
async fn test_ticket_numbers_are_sequential_from_one() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let ticket_id = service.join(join("cafe")).await.unwrap();
        let ticket = TicketRepository::find_by_id(store.as_ref(), &ticket_id)
            .await
            .unwrap()
            .unwrap();
        numbers.push(ticket.number);
    }
    assert_eq!(numbers, vec![1, 2, 3]);

    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.last_issued, 3);
    assert_eq!(business.active_count, 3);
    assert_eq!(business.current_serving, 0);
}

#[tokio::test]
async fn test_join_closed_queue_rejected() {
    let (store, service) = setup().await;
    let mut business = Business::new_test("closed-cafe", "Closed Cafe");
    business.is_online = Some(false);
    let mut tx = store.begin_transaction().await.unwrap();
    tx.insert_business(&business).await.unwrap();
    tx.commit().await.unwrap();

    let result = service.join(join("closed-cafe")).await;
    assert!(matches!(result, Err(AppError::Closed(_))));

    // Nothing was issued
    let after = business_by_slug(&store, "closed-cafe").await;
    assert_eq!(after.last_issued, 0);
}

#[tokio::test]
async fn test_join_unknown_slug_not_found() {
    let (_store, service) = setup().await;
    let result = service.join(join("ghost")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_first_advance_calls_nobody() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let ticket_id = service.join(join("cafe")).await.unwrap();

    // The first advance looks back at ticket #0, which never exists
    let outcome = service.next_customer("cafe").await.unwrap();
    assert_eq!(outcome.now_serving, 1);
    assert!(outcome.served_ticket.is_none());

    let ticket = TicketRepository::find_by_id(store.as_ref(), &ticket_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Waiting);
}

#[tokio::test]
async fn test_advance_serves_previous_number() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let first = service.join(join("cafe")).await.unwrap();
    service.join(join("cafe")).await.unwrap();

    service.next_customer("cafe").await.unwrap();
    let outcome = service.next_customer("cafe").await.unwrap();

    assert_eq!(outcome.now_serving, 2);
    assert_eq!(outcome.served_ticket.as_ref().map(|t| t.number), Some(1));

    let ticket = TicketRepository::find_by_id(store.as_ref(), &first)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Served);
    assert!(ticket.served_at.is_some());

    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.current_serving, 2);
    assert_eq!(business.active_count, 0);
}

#[tokio::test]
async fn test_advance_past_last_issued_is_queue_empty() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    // Fresh queue: one advance is allowed (serving catches up to issuance)
    service.next_customer("cafe").await.unwrap();

    let result = service.next_customer("cafe").await;
    assert!(matches!(result, Err(AppError::QueueEmpty(_))));

    // The failed advance must not bump the counter
    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.current_serving, 1);
}

#[tokio::test]
async fn test_leave_is_idempotent() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let ticket_id = service.join(join("cafe")).await.unwrap();

    let req = LeaveRequest {
        slug: "cafe".to_string(),
        ticket_id: ticket_id.clone(),
    };
    assert!(service.leave(req.clone()).await.unwrap());

    // Second leave is a successful no-op
    assert!(!service.leave(req).await.unwrap());

    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.active_count, 0);

    let ticket = TicketRepository::find_by_id(store.as_ref(), &ticket_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Cancelled);
}

#[tokio::test]
async fn test_leave_for_unknown_ticket_is_noop() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let cancelled = service
        .leave(LeaveRequest {
            slug: "cafe".to_string(),
            ticket_id: "no-such-ticket".to_string(),
        })
        .await
        .unwrap();
    assert!(!cancelled);
}

#[tokio::test]
async fn test_cancelled_ticket_never_retroactively_served() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let first = service.join(join("cafe")).await.unwrap();
    let second = service.join(join("cafe")).await.unwrap();

    service
        .leave(LeaveRequest {
            slug: "cafe".to_string(),
            ticket_id: first.clone(),
        })
        .await
        .unwrap();

    service.next_customer("cafe").await.unwrap();
    let outcome = service.next_customer("cafe").await.unwrap();
    // Ticket #1 was cancelled, so the advance over it serves nothing
    assert!(outcome.served_ticket.is_none());

    let outcome = service.next_customer("cafe").await.unwrap();
    assert_eq!(outcome.now_serving, 3);
    assert_eq!(outcome.served_ticket.as_ref().map(|t| t.number), Some(2));

    let cancelled = TicketRepository::find_by_id(store.as_ref(), &first)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, TicketStatus::Cancelled);

    let served = TicketRepository::find_by_id(store.as_ref(), &second)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(served.status, TicketStatus::Served);
}

#[tokio::test]
async fn test_notification_targets_three_spots_back() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    for _ in 0..5 {
        service.join(join("cafe")).await.unwrap();
    }

    let outcome = service.next_customer("cafe").await.unwrap();
    assert_eq!(outcome.now_serving, 1);
    assert_eq!(outcome.ticket_to_notify.as_ref().map(|t| t.number), Some(4));
}

#[tokio::test]
async fn test_toggle_status_round_trip() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    assert!(!service.toggle_status("cafe").await.unwrap());
    assert!(service.toggle_status("cafe").await.unwrap());

    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.is_online, Some(true));
}

#[tokio::test]
async fn test_reset_cancels_waiting_and_restarts_numbering() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    let ids: Vec<String> = {
        let mut v = Vec::new();
        for _ in 0..3 {
            v.push(service.join(join("cafe")).await.unwrap());
        }
        v
    };

    let cancelled = service.reset_queue("cafe").await.unwrap();
    assert_eq!(cancelled, 3);

    let business = business_by_slug(&store, "cafe").await;
    assert_eq!(business.current_serving, 0);
    assert_eq!(business.last_issued, 0);
    assert_eq!(business.active_count, 0);

    for id in &ids {
        let ticket = TicketRepository::find_by_id(store.as_ref(), id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Cancelled);
    }

    // Numbering restarts from 1
    let ticket_id = service.join(join("cafe")).await.unwrap();
    let ticket = TicketRepository::find_by_id(store.as_ref(), &ticket_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.number, 1);
}

#[tokio::test]
async fn test_repair_heals_overtaken_tickets() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    service.join(join("cafe")).await.unwrap();
    service.join(join("cafe")).await.unwrap();

    // Two advances leave ticket #2 at the counter but still 'waiting'
    service.next_customer("cafe").await.unwrap();
    service.next_customer("cafe").await.unwrap();

    let outcome = service.repair("cafe").await.unwrap();
    assert_eq!(outcome.healed, 1);
    assert_eq!(outcome.active_count, 0);

    // Second run finds nothing left to fix
    let again = service.repair("cafe").await.unwrap();
    assert_eq!(again.healed, 0);
    assert!(!again.drift_corrected);
}

#[tokio::test]
async fn test_repair_corrects_counter_drift() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe").await;

    for _ in 0..3 {
        service.join(join("cafe")).await.unwrap();
    }

    // Corrupt the cached count directly, as if a crash left it stale
    let mut business = business_by_slug(&store, "cafe").await;
    business.active_count = 99;
    let mut tx = store.begin_transaction().await.unwrap();
    tx.update_business(&business).await.unwrap();
    tx.commit().await.unwrap();

    let outcome = service.repair("cafe").await.unwrap();
    assert!(outcome.drift_corrected);
    assert_eq!(outcome.healed, 0);
    assert_eq!(outcome.active_count, 3);

    let after = business_by_slug(&store, "cafe").await;
    assert_eq!(after.active_count, 3);
}

#[tokio::test]
async fn test_repair_all_sweeps_every_business() {
    let (store, service) = setup().await;
    seed_business(&store, "cafe-a").await;
    seed_business(&store, "cafe-b").await;

    // One advance leaves ticket #1 at the counter but still 'waiting'
    service.join(join("cafe-a")).await.unwrap();
    service.next_customer("cafe-a").await.unwrap();

    let summary = service.repair_counts().await.unwrap();
    assert_eq!(summary.businesses, 2);
    assert_eq!(summary.healed, 1);
    assert_eq!(summary.drift_corrected, 0);
}
