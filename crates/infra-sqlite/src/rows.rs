// Row types shared by the pool-backed store and the transaction

use waitline_core::domain::{Business, Ticket, TicketStatus};
use waitline_core::error::AppError;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE constraint failed (duplicate slug)
                        AppError::Conflict(format!(
                            "Unique constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "787" | "3850" => {
                        // FOREIGN KEY constraint failed
                        AppError::Database(format!(
                            "Foreign key constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "5" => {
                        // SQLITE_BUSY - database is locked
                        AppError::Database(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => {
                        // Other database errors
                        AppError::Database(format!(
                            "Database error [{}]: {}",
                            code_str,
                            db_err.message()
                        ))
                    }
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => {
            // Connection, pool, protocol errors
            AppError::Database(err.to_string())
        }
    }
}

/// SQLite row representation of a business
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BusinessRow {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub credential: Option<String>,
    pub is_online: Option<i64>, // SQLite boolean as integer, NULL = unset
    pub current_serving: i64,
    pub last_issued: i64,
    pub active_count: i64,
    pub created_at: i64,
}

impl BusinessRow {
    pub fn into_business(self) -> Business {
        Business {
            id: self.id,
            slug: self.slug,
            name: self.name,
            credential: self.credential,
            is_online: self.is_online.map(|v| v != 0),
            current_serving: self.current_serving,
            last_issued: self.last_issued,
            active_count: self.active_count,
            created_at: self.created_at,
        }
    }
}

/// SQLite row representation of a ticket
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TicketRow {
    pub id: String,
    pub business_id: String,
    pub number: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub served_at: Option<i64>,
}

impl TicketRow {
    pub fn into_ticket(self) -> Ticket {
        let status = match self.status.as_str() {
            "waiting" => TicketStatus::Waiting,
            "served" => TicketStatus::Served,
            "cancelled" => TicketStatus::Cancelled,
            // Unknown rows are treated as terminal rather than waiting
            _ => TicketStatus::Cancelled,
        };

        Ticket {
            id: self.id,
            business_id: self.business_id,
            number: self.number,
            name: self.name,
            phone: self.phone,
            status,
            created_at: self.created_at,
            served_at: self.served_at,
        }
    }
}
