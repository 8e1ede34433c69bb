//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results. Views never carry
//! the stored credential; it stays on the server side.

use serde::{Deserialize, Serialize};
use waitline_core::application::estimator::TicketEstimate;
use waitline_core::domain::{Business, Ticket};

/// Public projection of a business. Credential is deliberately omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl From<&Business> for BusinessView {
    fn from(b: &Business) -> Self {
        Self {
            id: b.id.clone(),
            slug: b.slug.clone(),
            name: b.name.clone(),
            is_online: b.is_open(),
            current_serving: b.current_serving,
            last_issued: b.last_issued,
            active_count: b.active_count,
            created_at: b.created_at,
        }
    }
}

/// Ticket projection with the live wait estimate attached
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl TicketView {
    pub fn from_parts(business: &Business, ticket: &Ticket, estimate: &TicketEstimate) -> Self {
        Self {
            ticket_id: ticket.id.clone(),
            number: ticket.number,
            status: ticket.status.to_string(),
            name: ticket.name.clone(),
            now_serving: business.current_serving,
            people_ahead: estimate.people_ahead,
            estimated_wait_minutes: estimate.estimated_wait_minutes,
            still_waiting_to_be_called: estimate.still_waiting_to_be_called,
        }
    }
}

/// queue.getBusiness.v1 - Public queue status lookup
#[derive(Debug, Deserialize)]
pub struct GetBusinessRequest {
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetBusinessResponse {
    /// None when no business owns the slug (not an error for this query)
    pub business: Option<BusinessView>,
}

/// queue.getActiveTicket.v1 - Customer's own ticket with live estimate
#[derive(Debug, Deserialize)]
pub struct GetActiveTicketRequest {
    pub slug: String,
    pub ticket_id: String,
}

/// queue.getTicketByNumber.v1 - Admin lookup by ticket number
#[derive(Debug, Deserialize)]
pub struct GetTicketByNumberRequest {
    pub slug: String,
    pub number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketLookupResponse {
    /// None for absent tickets and slug mismatches
    pub ticket: Option<TicketView>,
}

/// queue.joinQueue.v1 - Issue a ticket
#[derive(Debug, Deserialize)]
pub struct JoinQueueRequest {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinQueueResponse {
    pub ticket_id: String,
    pub number: i64,
}

/// queue.leaveQueue.v1 - Cancel own ticket (idempotent)
#[derive(Debug, Deserialize)]
pub struct LeaveQueueRequest {
    pub slug: String,
    pub ticket_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveQueueResponse {
    /// False when the ticket was already gone or terminal
    pub cancelled: bool,
}

/// queue.nextCustomer.v1 - Advance the queue
#[derive(Debug, Deserialize)]
pub struct NextCustomerRequest {
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextCustomerResponse {
    pub now_serving: i64,
    /// Number of the ticket transitioned to served, if one matched
    pub served_number: Option<i64>,
}

/// queue.resetQueue.v1 - Emergency reset
#[derive(Debug, Deserialize)]
pub struct ResetQueueRequest {
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetQueueResponse {
    pub cancelled_tickets: u64,
}

/// queue.toggleStatus.v1 - Flip the online flag
#[derive(Debug, Deserialize)]
pub struct ToggleStatusRequest {
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleStatusResponse {
    pub is_online: bool,
}

/// auth.verifyPassword.v1 - Business admin login check
#[derive(Debug, Deserialize)]
pub struct VerifyPasswordRequest {
    pub slug: String,
    pub password: String,
    /// When set, the online flag is patched on successful verification
    #[serde(default)]
    pub set_online: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

/// auth.verifySuperAdmin.v1 - Operator credential check
#[derive(Debug, Deserialize)]
pub struct VerifySuperAdminRequest {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifySuperAdminResponse {
    pub valid: bool,
}

/// admin.getAllBusinesses.v1 - Operator dashboard listing
#[derive(Debug, Deserialize)]
pub struct GetAllBusinessesRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllBusinessesResponse {
    pub businesses: Vec<BusinessView>,
}

/// admin.createBusiness.v1 - Provision a tenant
#[derive(Debug, Deserialize)]
pub struct CreateBusinessRpcRequest {
    pub slug: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBusinessResponse {
    pub id: String,
}

/// admin.updateBusiness.v1 - Edit a tenant
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRpcRequest {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Empty or absent keeps the stored credential untouched
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBusinessResponse {
    pub updated: bool,
}

/// admin.deleteBusiness.v1 - Remove a tenant and all its tickets
#[derive(Debug, Deserialize)]
pub struct DeleteBusinessRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBusinessResponse {
    pub deleted: bool,
}

/// admin.repairCounts.v1 - Recompute counters from ground truth
#[derive(Debug, Deserialize)]
pub struct RepairCountsRequest {
    /// Repair one business, or every business when absent
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepairCountsResponse {
    pub businesses: usize,
    pub healed: u64,
    pub drift_corrected: usize,
}

/// admin.rehashCredentials.v1 - Upgrade legacy plaintext credentials
#[derive(Debug, Deserialize)]
pub struct RehashCredentialsRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct RehashCredentialsResponse {
    pub upgraded: u64,
}
