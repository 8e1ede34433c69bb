// Port Layer - Interfaces for external dependencies

pub mod business_repository;
pub mod credential_hasher;
pub mod id_provider; // For deterministic testing
pub mod notifier;
pub mod ticket_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use business_repository::BusinessRepository;
pub use credential_hasher::{Argon2Hasher, CredentialHasher};
pub use id_provider::IdProvider;
pub use notifier::{NoopNotifier, Notifier};
pub use ticket_repository::TicketRepository;
pub use time_provider::TimeProvider;
pub use transaction::{QueueStoreTransaction, Transaction, TransactionalQueueStore};
