// Domain Layer - Pure business logic and entities

pub mod business;
pub mod error;
pub mod ticket;

// Re-exports
pub use business::{Business, BusinessId, HASH_PREFIX};
pub use error::DomainError;
pub use ticket::{Ticket, TicketId, TicketStatus};
