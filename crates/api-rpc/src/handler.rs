//! RPC Method Handlers
//!
//! Bridges the JSON-RPC surface to the core services. Each handler checks
//! the rate limiter, translates wire types to use-case requests and maps
//! application errors to RPC error objects.

use crate::error::{throttled, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    BusinessView, CreateBusinessResponse, CreateBusinessRpcRequest, DeleteBusinessRequest,
    DeleteBusinessResponse, GetActiveTicketRequest, GetAllBusinessesRequest,
    GetAllBusinessesResponse, GetBusinessRequest, GetBusinessResponse, GetTicketByNumberRequest,
    JoinQueueRequest, JoinQueueResponse, LeaveQueueRequest, LeaveQueueResponse,
    NextCustomerRequest, NextCustomerResponse, RehashCredentialsRequest,
    RehashCredentialsResponse, RepairCountsRequest, RepairCountsResponse, ResetQueueRequest,
    ResetQueueResponse, TicketLookupResponse, TicketView, ToggleStatusRequest,
    ToggleStatusResponse, UpdateBusinessRpcRequest, UpdateBusinessResponse,
    VerifyPasswordRequest, VerifyPasswordResponse, VerifySuperAdminRequest,
    VerifySuperAdminResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use waitline_core::application::access::{
    CreateBusinessRequest, UpdateBusinessRequest, VerifyRequest,
};
use waitline_core::application::queue::{JoinRequest, LeaveRequest};
use waitline_core::application::{AccessService, QueueService, WaitEstimator};
use waitline_core::domain::Ticket;
use waitline_core::error::AppError;
use waitline_core::port::{BusinessRepository, TicketRepository};

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    queue: Arc<QueueService>,
    access: Arc<AccessService>,
    businesses: Arc<dyn BusinessRepository>,
    tickets: Arc<dyn TicketRepository>,
    estimator: Arc<WaitEstimator>,
    rate_limiter: RateLimiter,
}

impl RpcHandler {
    pub fn new(
        queue: Arc<QueueService>,
        access: Arc<AccessService>,
        businesses: Arc<dyn BusinessRepository>,
        tickets: Arc<dyn TicketRepository>,
        estimator: Arc<WaitEstimator>,
    ) -> Self {
        // Default: 200 burst, 100 req/sec (configurable via env)
        let max_burst: u32 = std::env::var("WAITLINE_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("WAITLINE_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            queue,
            access,
            businesses,
            tickets,
            estimator,
            rate_limiter: RateLimiter::new(max_burst, rate_per_sec),
        }
    }

    async fn throttle(&self) -> Result<(), ErrorObjectOwned> {
        if self.rate_limiter.check().await {
            Ok(())
        } else {
            Err(throttled())
        }
    }

    /// Build a ticket view, or None when the ticket does not belong to the
    /// slug's business
    async fn ticket_view(
        &self,
        slug: &str,
        ticket: Option<Ticket>,
    ) -> Result<Option<TicketView>, ErrorObjectOwned> {
        let Some(business) = self
            .businesses
            .find_by_slug(slug)
            .await
            .map_err(to_rpc_error)?
        else {
            return Ok(None);
        };

        let Some(ticket) = ticket else {
            return Ok(None);
        };

        if ticket.business_id != business.id {
            return Ok(None);
        }

        let estimate = self
            .estimator
            .estimate(&business, &ticket)
            .await
            .map_err(to_rpc_error)?;

        Ok(Some(TicketView::from_parts(&business, &ticket, &estimate)))
    }

    /// queue.getBusiness.v1
    pub async fn get_business(
        &self,
        params: GetBusinessRequest,
    ) -> Result<GetBusinessResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let business = self
            .businesses
            .find_by_slug(&params.slug)
            .await
            .map_err(to_rpc_error)?;

        Ok(GetBusinessResponse {
            business: business.as_ref().map(BusinessView::from),
        })
    }

    /// queue.getActiveTicket.v1
    pub async fn get_active_ticket(
        &self,
        params: GetActiveTicketRequest,
    ) -> Result<TicketLookupResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let ticket = self
            .tickets
            .find_by_id(&params.ticket_id)
            .await
            .map_err(to_rpc_error)?;

        let view = self.ticket_view(&params.slug, ticket).await?;
        Ok(TicketLookupResponse { ticket: view })
    }

    /// queue.getTicketByNumber.v1
    pub async fn get_ticket_by_number(
        &self,
        params: GetTicketByNumberRequest,
    ) -> Result<TicketLookupResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let Some(business) = self
            .businesses
            .find_by_slug(&params.slug)
            .await
            .map_err(to_rpc_error)?
        else {
            return Ok(TicketLookupResponse { ticket: None });
        };

        let ticket = self
            .tickets
            .find_by_number(&business.id, params.number)
            .await
            .map_err(to_rpc_error)?;

        let view = self.ticket_view(&params.slug, ticket).await?;
        Ok(TicketLookupResponse { ticket: view })
    }

    /// queue.joinQueue.v1
    pub async fn join_queue(
        &self,
        params: JoinQueueRequest,
    ) -> Result<JoinQueueResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let ticket_id = self
            .queue
            .join(JoinRequest {
                slug: params.slug,
                name: params.name,
                phone: params.phone,
            })
            .await
            .map_err(to_rpc_error)?;

        // Read back for the assigned number; the insert just committed
        let ticket = self
            .tickets
            .find_by_id(&ticket_id)
            .await
            .map_err(to_rpc_error)?
            .ok_or_else(|| {
                to_rpc_error(AppError::Internal(format!(
                    "Ticket {} vanished after join",
                    ticket_id
                )))
            })?;

        Ok(JoinQueueResponse {
            ticket_id,
            number: ticket.number,
        })
    }

    /// queue.leaveQueue.v1
    pub async fn leave_queue(
        &self,
        params: LeaveQueueRequest,
    ) -> Result<LeaveQueueResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let cancelled = self
            .queue
            .leave(LeaveRequest {
                slug: params.slug,
                ticket_id: params.ticket_id,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(LeaveQueueResponse { cancelled })
    }

    /// queue.nextCustomer.v1
    pub async fn next_customer(
        &self,
        params: NextCustomerRequest,
    ) -> Result<NextCustomerResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let outcome = self
            .queue
            .next_customer(&params.slug)
            .await
            .map_err(to_rpc_error)?;

        Ok(NextCustomerResponse {
            now_serving: outcome.now_serving,
            served_number: outcome.served_ticket.map(|t| t.number),
        })
    }

    /// queue.resetQueue.v1
    pub async fn reset_queue(
        &self,
        params: ResetQueueRequest,
    ) -> Result<ResetQueueResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let cancelled_tickets = self
            .queue
            .reset_queue(&params.slug)
            .await
            .map_err(to_rpc_error)?;

        Ok(ResetQueueResponse { cancelled_tickets })
    }

    /// queue.toggleStatus.v1
    pub async fn toggle_status(
        &self,
        params: ToggleStatusRequest,
    ) -> Result<ToggleStatusResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let is_online = self
            .queue
            .toggle_status(&params.slug)
            .await
            .map_err(to_rpc_error)?;

        Ok(ToggleStatusResponse { is_online })
    }

    /// auth.verifyPassword.v1
    pub async fn verify_password(
        &self,
        params: VerifyPasswordRequest,
    ) -> Result<VerifyPasswordResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let valid = self
            .access
            .verify_password(VerifyRequest {
                slug: params.slug,
                password: params.password,
                set_online: params.set_online,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(VerifyPasswordResponse { valid })
    }

    /// auth.verifySuperAdmin.v1
    pub async fn verify_super_admin(
        &self,
        params: VerifySuperAdminRequest,
    ) -> Result<VerifySuperAdminResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let valid = self
            .access
            .verify_super_admin(&params.user, &params.password);

        Ok(VerifySuperAdminResponse { valid })
    }

    /// admin.getAllBusinesses.v1
    pub async fn get_all_businesses(
        &self,
        _params: GetAllBusinessesRequest,
    ) -> Result<GetAllBusinessesResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let businesses = self
            .businesses
            .find_all()
            .await
            .map_err(to_rpc_error)?
            .iter()
            .map(BusinessView::from)
            .collect();

        Ok(GetAllBusinessesResponse { businesses })
    }

    /// admin.createBusiness.v1
    pub async fn create_business(
        &self,
        params: CreateBusinessRpcRequest,
    ) -> Result<CreateBusinessResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let id = self
            .access
            .create_business(CreateBusinessRequest {
                slug: params.slug,
                name: params.name,
                password: params.password,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(CreateBusinessResponse { id })
    }

    /// admin.updateBusiness.v1
    pub async fn update_business(
        &self,
        params: UpdateBusinessRpcRequest,
    ) -> Result<UpdateBusinessResponse, ErrorObjectOwned> {
        self.throttle().await?;

        self.access
            .update_business(UpdateBusinessRequest {
                id: params.id,
                slug: params.slug,
                name: params.name,
                password: params.password,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(UpdateBusinessResponse { updated: true })
    }

    /// admin.deleteBusiness.v1
    pub async fn delete_business(
        &self,
        params: DeleteBusinessRequest,
    ) -> Result<DeleteBusinessResponse, ErrorObjectOwned> {
        self.throttle().await?;

        self.access
            .delete_business(&params.id)
            .await
            .map_err(to_rpc_error)?;

        Ok(DeleteBusinessResponse { deleted: true })
    }

    /// admin.repairCounts.v1
    pub async fn repair_counts(
        &self,
        params: RepairCountsRequest,
    ) -> Result<RepairCountsResponse, ErrorObjectOwned> {
        self.throttle().await?;

        match params.slug {
            Some(slug) => {
                let outcome = self.queue.repair(&slug).await.map_err(to_rpc_error)?;
                Ok(RepairCountsResponse {
                    businesses: 1,
                    healed: outcome.healed,
                    drift_corrected: usize::from(outcome.drift_corrected),
                })
            }
            None => {
                let summary = self.queue.repair_counts().await.map_err(to_rpc_error)?;
                Ok(RepairCountsResponse {
                    businesses: summary.businesses,
                    healed: summary.healed,
                    drift_corrected: summary.drift_corrected,
                })
            }
        }
    }

    /// admin.rehashCredentials.v1
    pub async fn rehash_credentials(
        &self,
        _params: RehashCredentialsRequest,
    ) -> Result<RehashCredentialsResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let upgraded = self
            .access
            .rehash_legacy_credentials()
            .await
            .map_err(to_rpc_error)?;

        Ok(RehashCredentialsResponse { upgraded })
    }
}
