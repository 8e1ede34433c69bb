//! Waitline SDK - Rust Client Library
//!
//! Typed client for the Waitline daemon's JSON-RPC surface.
//!
//! # Example
//!
//! ```no_run
//! use waitline_sdk::WaitlineClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WaitlineClient::connect("http://127.0.0.1:9533")?;
//!
//!     let ticket = client.join_queue("cafe-luna", Some("Ana"), None).await?;
//!     println!("You are ticket #{}", ticket.number);
//!
//!     if let Some(view) = client.get_active_ticket("cafe-luna", &ticket.ticket_id).await? {
//!         println!("{} people ahead, ~{} min", view.people_ahead, view.estimated_wait_minutes);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::WaitlineClient;
pub use error::{Result, SdkError};
pub use types::{
    BusinessView, CreateBusinessRequest, CreateBusinessResponse, DeleteBusinessResponse,
    GetAllBusinessesResponse, JoinQueueResponse, LeaveQueueResponse, NextCustomerResponse,
    RehashCredentialsResponse, RepairCountsResponse, ResetQueueResponse, TicketView,
    ToggleStatusResponse, UpdateBusinessRequest, UpdateBusinessResponse, VerifyPasswordResponse,
    VerifySuperAdminResponse,
};
