// SQLite Queue Store Implementation (read side + transaction entry point)

use crate::rows::{map_sqlx_error, BusinessRow, TicketRow};
use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::SqlitePool;
use waitline_core::domain::{Business, BusinessId, Ticket, TicketId, TicketStatus};
use waitline_core::error::Result;
use waitline_core::port::{
    BusinessRepository, QueueStoreTransaction, TicketRepository, TransactionalQueueStore,
};

pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for SqliteQueueStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>("SELECT * FROM businesses WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_business()))
    }

    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_business()))
    }

    async fn find_all(&self) -> Result<Vec<Business>> {
        let rows: Vec<BusinessRow> =
            sqlx::query_as("SELECT * FROM businesses ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_business()).collect())
    }
}

#[async_trait]
impl TicketRepository for SqliteQueueStore {
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_ticket()))
    }

    async fn find_by_number(
        &self,
        business_id: &BusinessId,
        number: i64,
    ) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(
            "SELECT * FROM tickets WHERE business_id = ? AND number = ?",
        )
        .bind(business_id)
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_ticket()))
    }

    async fn count_waiting_before(&self, business_id: &BusinessId, number: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM tickets
            WHERE business_id = ? AND status = ? AND number < ?
            "#,
        )
        .bind(business_id)
        .bind(TicketStatus::Waiting.to_string())
        .bind(number)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn recent_served(&self, business_id: &BusinessId, limit: i64) -> Result<Vec<Ticket>> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            r#"
            SELECT * FROM tickets
            WHERE business_id = ? AND status = ? AND served_at IS NOT NULL
            ORDER BY served_at DESC
            LIMIT ?
            "#,
        )
        .bind(business_id)
        .bind(TicketStatus::Served.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_ticket()).collect())
    }
}

#[async_trait]
impl TransactionalQueueStore for SqliteQueueStore {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueStoreTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use waitline_core::domain::Business;

    async fn setup_store() -> SqliteQueueStore {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteQueueStore::new(pool)
    }

    async fn insert_business(store: &SqliteQueueStore, business: &Business) {
        let mut tx = store.begin_transaction().await.unwrap();
        tx.insert_business(business).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_find_by_slug() {
        let store = setup_store().await;
        let business = Business::new_test("corner-cafe", "Corner Cafe");
        insert_business(&store, &business).await;

        let found = BusinessRepository::find_by_slug(&store, "corner-cafe")
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, business.id);

        let missing = BusinessRepository::find_by_slug(&store, "nope")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = setup_store().await;
        insert_business(&store, &Business::new_test("dup", "First")).await;

        let mut tx = store.begin_transaction().await.unwrap();
        let result = tx.insert_business(&Business::new_test("dup", "Second")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ticket_queries() {
        let store = setup_store().await;
        let business = Business::new_test("cafe", "Cafe");
        insert_business(&store, &business).await;

        let mut tx = store.begin_transaction().await.unwrap();
        for number in 1..=4 {
            let ticket = Ticket::new_test(business.id.clone(), number);
            tx.insert_ticket(&ticket).await.unwrap();
        }
        tx.commit().await.unwrap();

        // peopleAhead for ticket #3: tickets #1 and #2 are waiting
        let ahead = store.count_waiting_before(&business.id, 3).await.unwrap();
        assert_eq!(ahead, 2);

        let by_number = TicketRepository::find_by_number(&store, &business.id, 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_number.number, 2);
    }

    #[tokio::test]
    async fn test_recent_served_ordered_by_recency() {
        let store = setup_store().await;
        let business = Business::new_test("cafe", "Cafe");
        insert_business(&store, &business).await;

        let mut tx = store.begin_transaction().await.unwrap();
        for number in 1..=3 {
            let mut ticket = Ticket::new_test(business.id.clone(), number);
            ticket.serve(number * 60_000).unwrap();
            tx.insert_ticket(&ticket).await.unwrap();
        }
        tx.commit().await.unwrap();

        let served = store.recent_served(&business.id, 2).await.unwrap();
        assert_eq!(served.len(), 2);
        assert_eq!(served[0].served_at, Some(180_000));
        assert_eq!(served[1].served_at, Some(120_000));
    }
}
