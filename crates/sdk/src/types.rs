//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC wire types from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Public projection of a business (never carries the credential)
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub is_online: bool,
    pub current_serving: i64,
    pub last_issued: i64,
    pub active_count: i64,
    pub created_at: i64,
}

/// Ticket projection with the live wait estimate attached
#[derive(Debug, Clone, Deserialize)]
pub struct TicketView {
    pub ticket_id: String,
    pub number: i64,
    pub status: String,
    pub name: Option<String>,
    pub now_serving: i64,
    pub people_ahead: i64,
    pub estimated_wait_minutes: i64,
    pub still_waiting_to_be_called: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetBusinessRequest {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetBusinessResponse {
    pub business: Option<BusinessView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetActiveTicketRequest {
    pub slug: String,
    pub ticket_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetTicketByNumberRequest {
    pub slug: String,
    pub number: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketLookupResponse {
    pub ticket: Option<TicketView>,
}

/// Request to join a queue
#[derive(Debug, Clone, Serialize)]
pub struct JoinQueueRequest {
    pub slug: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinQueueResponse {
    pub ticket_id: String,
    pub number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveQueueRequest {
    pub slug: String,
    pub ticket_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveQueueResponse {
    pub cancelled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextCustomerResponse {
    pub now_serving: i64,
    pub served_number: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetQueueResponse {
    pub cancelled_tickets: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleStatusResponse {
    pub is_online: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPasswordRequest {
    pub slug: String,
    pub password: String,
    pub set_online: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifySuperAdminRequest {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifySuperAdminResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetAllBusinessesResponse {
    pub businesses: Vec<BusinessView>,
}

/// Request to provision a business
#[derive(Debug, Clone, Serialize)]
pub struct CreateBusinessRequest {
    pub slug: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBusinessResponse {
    pub id: String,
}

/// Request to edit a business; `password: None` keeps the credential
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBusinessRequest {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBusinessResponse {
    pub updated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteBusinessResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepairCountsResponse {
    pub businesses: usize,
    pub healed: u64,
    pub drift_corrected: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RehashCredentialsResponse {
    pub upgraded: u64,
}
