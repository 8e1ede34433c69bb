//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server exposing the Waitline operation
//! surface (queue, auth and admin method families).

pub mod error;
pub mod handler;
pub mod rate_limiter;
pub mod server;
pub mod types;

pub use handler::RpcHandler;
pub use server::{RpcServer, RpcServerConfig};
