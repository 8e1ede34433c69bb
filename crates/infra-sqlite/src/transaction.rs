// SQLite Transaction Implementation

use crate::rows::{map_sqlx_error, BusinessRow, TicketRow};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use waitline_core::domain::{Business, BusinessId, Ticket, TicketId, TicketStatus};
use waitline_core::error::Result;
use waitline_core::port::{QueueStoreTransaction, Transaction};

pub struct SqliteQueueTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteQueueTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueStoreTransaction for SqliteQueueTransaction<'_> {
    async fn find_business_by_slug(&mut self, slug: &str) -> Result<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>("SELECT * FROM businesses WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_business()))
    }

    async fn find_business_by_id(&mut self, id: &BusinessId) -> Result<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_business()))
    }

    async fn find_all_businesses(&mut self) -> Result<Vec<Business>> {
        let rows: Vec<BusinessRow> =
            sqlx::query_as("SELECT * FROM businesses ORDER BY created_at ASC")
                .fetch_all(&mut *self.tx)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_business()).collect())
    }

    async fn insert_business(&mut self, business: &Business) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO businesses (
                id, slug, name, credential, is_online,
                current_serving, last_issued, active_count, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&business.id)
        .bind(&business.slug)
        .bind(&business.name)
        .bind(&business.credential)
        .bind(business.is_online.map(i64::from))
        .bind(business.current_serving)
        .bind(business.last_issued)
        .bind(business.active_count)
        .bind(business.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update_business(&mut self, business: &Business) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE businesses
            SET slug = ?, name = ?, credential = ?, is_online = ?,
                current_serving = ?, last_issued = ?, active_count = ?
            WHERE id = ?
            "#,
        )
        .bind(&business.slug)
        .bind(&business.name)
        .bind(&business.credential)
        .bind(business.is_online.map(i64::from))
        .bind(business.current_serving)
        .bind(business.last_issued)
        .bind(business.active_count)
        .bind(&business.id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_business(&mut self, id: &BusinessId) -> Result<()> {
        sqlx::query("DELETE FROM businesses WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn insert_ticket(&mut self, ticket: &Ticket) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, business_id, number, name, phone,
                status, created_at, served_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.business_id)
        .bind(ticket.number)
        .bind(&ticket.name)
        .bind(&ticket.phone)
        .bind(ticket.status.to_string())
        .bind(ticket.created_at)
        .bind(ticket.served_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_ticket(&mut self, id: &TicketId) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_ticket()))
    }

    async fn find_waiting_ticket_by_number(
        &mut self,
        business_id: &BusinessId,
        number: i64,
    ) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT * FROM tickets
            WHERE business_id = ? AND number = ? AND status = ?
            "#,
        )
        .bind(business_id)
        .bind(number)
        .bind(TicketStatus::Waiting.to_string())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_ticket()))
    }

    async fn update_ticket(&mut self, ticket: &Ticket) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE tickets
            SET status = ?, served_at = ?
            WHERE id = ?
            "#,
        )
        .bind(ticket.status.to_string())
        .bind(ticket.served_at)
        .bind(&ticket.id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn cancel_all_waiting(&mut self, business_id: &BusinessId) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET status = ?
            WHERE business_id = ? AND status = ?
            "#,
        )
        .bind(TicketStatus::Cancelled.to_string())
        .bind(business_id)
        .bind(TicketStatus::Waiting.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn serve_overtaken(
        &mut self,
        business_id: &BusinessId,
        current_serving: i64,
        served_at: i64,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET status = ?, served_at = ?
            WHERE business_id = ? AND status = ? AND number <= ?
            "#,
        )
        .bind(TicketStatus::Served.to_string())
        .bind(served_at)
        .bind(business_id)
        .bind(TicketStatus::Waiting.to_string())
        .bind(current_serving)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count_waiting(&mut self, business_id: &BusinessId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tickets WHERE business_id = ? AND status = ?",
        )
        .bind(business_id)
        .bind(TicketStatus::Waiting.to_string())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count)
    }
}
