//! Waitline Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    BusinessView, CreateBusinessRequest, CreateBusinessResponse, DeleteBusinessResponse,
    GetActiveTicketRequest, GetAllBusinessesResponse, GetBusinessRequest, GetBusinessResponse,
    GetTicketByNumberRequest, JoinQueueRequest, JoinQueueResponse, LeaveQueueRequest,
    LeaveQueueResponse, NextCustomerResponse, RehashCredentialsResponse, RepairCountsResponse,
    ResetQueueResponse, TicketLookupResponse, TicketView, ToggleStatusResponse,
    UpdateBusinessRequest, UpdateBusinessResponse, VerifyPasswordRequest, VerifyPasswordResponse,
    VerifySuperAdminRequest, VerifySuperAdminResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Serialize a request struct into named JSON-RPC params
fn to_params<P: Serialize>(request: &P) -> Result<ObjectParams> {
    let value = serde_json::to_value(request)?;
    let mut params = ObjectParams::new();
    if let serde_json::Value::Object(map) = value {
        for (key, field) in map {
            params.insert(&key, field)?;
        }
    }
    Ok(params)
}

/// Waitline daemon client
///
/// # Example
///
/// ```no_run
/// use waitline_sdk::WaitlineClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WaitlineClient::connect("http://127.0.0.1:9533")?;
/// let ticket = client.join_queue("cafe-luna", Some("Ana"), None).await?;
/// println!("Ticket #{}", ticket.number);
/// # Ok(())
/// # }
/// ```
pub struct WaitlineClient {
    client: HttpClient,
}

impl WaitlineClient {
    /// Connect to the Waitline daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9533`)
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url.as_ref())
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    async fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, request: &P) -> Result<R> {
        let params = to_params(request)?;
        let response: R = self.client.request(method, params).await?;
        Ok(response)
    }

    /// Fetch a business's public queue state. Returns None for an unknown
    /// slug.
    pub async fn get_business(&self, slug: impl Into<String>) -> Result<Option<BusinessView>> {
        let response: GetBusinessResponse = self
            .call("queue.getBusiness.v1", &GetBusinessRequest { slug: slug.into() })
            .await?;
        Ok(response.business)
    }

    /// Fetch a customer's ticket with its live wait estimate
    pub async fn get_active_ticket(
        &self,
        slug: impl Into<String>,
        ticket_id: impl Into<String>,
    ) -> Result<Option<TicketView>> {
        let response: TicketLookupResponse = self
            .call(
                "queue.getActiveTicket.v1",
                &GetActiveTicketRequest {
                    slug: slug.into(),
                    ticket_id: ticket_id.into(),
                },
            )
            .await?;
        Ok(response.ticket)
    }

    /// Look up a ticket by its number
    pub async fn get_ticket_by_number(
        &self,
        slug: impl Into<String>,
        number: i64,
    ) -> Result<Option<TicketView>> {
        let response: TicketLookupResponse = self
            .call(
                "queue.getTicketByNumber.v1",
                &GetTicketByNumberRequest {
                    slug: slug.into(),
                    number,
                },
            )
            .await?;
        Ok(response.ticket)
    }

    /// Join a queue and get a ticket
    pub async fn join_queue(
        &self,
        slug: impl Into<String>,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<JoinQueueResponse> {
        self.call(
            "queue.joinQueue.v1",
            &JoinQueueRequest {
                slug: slug.into(),
                name: name.map(String::from),
                phone: phone.map(String::from),
            },
        )
        .await
    }

    /// Cancel a ticket. Idempotent: `cancelled` is false when the ticket
    /// was already gone.
    pub async fn leave_queue(
        &self,
        slug: impl Into<String>,
        ticket_id: impl Into<String>,
    ) -> Result<LeaveQueueResponse> {
        self.call(
            "queue.leaveQueue.v1",
            &LeaveQueueRequest {
                slug: slug.into(),
                ticket_id: ticket_id.into(),
            },
        )
        .await
    }

    /// Call the next customer
    pub async fn next_customer(&self, slug: impl Into<String>) -> Result<NextCustomerResponse> {
        self.call(
            "queue.nextCustomer.v1",
            &GetBusinessRequest { slug: slug.into() },
        )
        .await
    }

    /// Reset the queue: zero counters, cancel every waiting ticket
    pub async fn reset_queue(&self, slug: impl Into<String>) -> Result<ResetQueueResponse> {
        self.call(
            "queue.resetQueue.v1",
            &GetBusinessRequest { slug: slug.into() },
        )
        .await
    }

    /// Flip the queue's open/closed flag
    pub async fn toggle_status(&self, slug: impl Into<String>) -> Result<ToggleStatusResponse> {
        self.call(
            "queue.toggleStatus.v1",
            &GetBusinessRequest { slug: slug.into() },
        )
        .await
    }

    /// Verify a business admin password, optionally flipping the online
    /// flag on success
    pub async fn verify_password(
        &self,
        slug: impl Into<String>,
        password: impl Into<String>,
        set_online: Option<bool>,
    ) -> Result<VerifyPasswordResponse> {
        self.call(
            "auth.verifyPassword.v1",
            &VerifyPasswordRequest {
                slug: slug.into(),
                password: password.into(),
                set_online,
            },
        )
        .await
    }

    /// Verify the deployment's super-admin credential
    pub async fn verify_super_admin(
        &self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<VerifySuperAdminResponse> {
        self.call(
            "auth.verifySuperAdmin.v1",
            &VerifySuperAdminRequest {
                user: user.into(),
                password: password.into(),
            },
        )
        .await
    }

    /// List every business (super-admin)
    pub async fn get_all_businesses(&self) -> Result<Vec<BusinessView>> {
        let response: GetAllBusinessesResponse = self
            .call("admin.getAllBusinesses.v1", &serde_json::json!({}))
            .await?;
        Ok(response.businesses)
    }

    /// Provision a business (super-admin)
    pub async fn create_business(
        &self,
        request: CreateBusinessRequest,
    ) -> Result<CreateBusinessResponse> {
        self.call("admin.createBusiness.v1", &request).await
    }

    /// Edit a business (super-admin)
    pub async fn update_business(
        &self,
        request: UpdateBusinessRequest,
    ) -> Result<UpdateBusinessResponse> {
        self.call("admin.updateBusiness.v1", &request).await
    }

    /// Delete a business and all its tickets (super-admin)
    pub async fn delete_business(&self, id: impl Into<String>) -> Result<DeleteBusinessResponse> {
        self.call(
            "admin.deleteBusiness.v1",
            &serde_json::json!({ "id": id.into() }),
        )
        .await
    }

    /// Recompute queue counters from ground truth. Pass None to repair
    /// every business.
    pub async fn repair_counts(&self, slug: Option<&str>) -> Result<RepairCountsResponse> {
        self.call(
            "admin.repairCounts.v1",
            &serde_json::json!({ "slug": slug }),
        )
        .await
    }

    /// Upgrade legacy plaintext credentials to argon2 hashes
    pub async fn rehash_credentials(&self) -> Result<RehashCredentialsResponse> {
        self.call("admin.rehashCredentials.v1", &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params_named_fields() {
        let req = JoinQueueRequest {
            slug: "cafe".to_string(),
            name: Some("Ana".to_string()),
            phone: None,
        };
        // Must not panic or error; wire shape is checked in integration tests
        assert!(to_params(&req).is_ok());
    }
}
