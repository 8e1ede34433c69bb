// Waitline Infrastructure - SQLite Adapter
// Implements: BusinessRepository, TicketRepository, TransactionalQueueStore

mod connection;
mod migration;
mod rows;
mod store;
mod transaction;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use store::SqliteQueueStore;
pub use transaction::SqliteQueueTransaction;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
