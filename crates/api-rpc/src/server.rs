//! JSON-RPC Server
//!
//! Binds the method table to a TCP listener on localhost. External
//! exposure is a reverse proxy's job; the daemon itself never listens on
//! a public interface.

use crate::handler::RpcHandler;
use crate::types::{
    CreateBusinessRpcRequest, DeleteBusinessRequest, GetActiveTicketRequest,
    GetAllBusinessesRequest, GetBusinessRequest, GetTicketByNumberRequest, JoinQueueRequest,
    LeaveQueueRequest, NextCustomerRequest, RehashCredentialsRequest, RepairCountsRequest,
    ResetQueueRequest, ToggleStatusRequest, UpdateBusinessRpcRequest, VerifyPasswordRequest,
    VerifySuperAdminRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9533;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// Registers a method that parses its params into the given request type
/// and forwards to the handler method of the same name.
macro_rules! register {
    ($module:expr, $handler:expr, $name:literal, $req:ty, $method:ident) => {{
        let handler = Arc::clone(&$handler);
        $module
            .register_async_method($name, move |params, _, _| {
                let handler = Arc::clone(&handler);
                async move {
                    let req: $req = params.parse()?;
                    handler.$method(req).await
                }
            })
            .map_err(|e| e.to_string())?;
    }};
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, handler: RpcHandler) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
        }
    }

    /// Start the JSON-RPC server on localhost TCP
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());
        let h = self.handler;

        // Queue surface (customers and business admins)
        register!(module, h, "queue.getBusiness.v1", GetBusinessRequest, get_business);
        register!(module, h, "queue.getActiveTicket.v1", GetActiveTicketRequest, get_active_ticket);
        register!(module, h, "queue.getTicketByNumber.v1", GetTicketByNumberRequest, get_ticket_by_number);
        register!(module, h, "queue.joinQueue.v1", JoinQueueRequest, join_queue);
        register!(module, h, "queue.leaveQueue.v1", LeaveQueueRequest, leave_queue);
        register!(module, h, "queue.nextCustomer.v1", NextCustomerRequest, next_customer);
        register!(module, h, "queue.resetQueue.v1", ResetQueueRequest, reset_queue);
        register!(module, h, "queue.toggleStatus.v1", ToggleStatusRequest, toggle_status);

        // Auth surface
        register!(module, h, "auth.verifyPassword.v1", VerifyPasswordRequest, verify_password);
        register!(module, h, "auth.verifySuperAdmin.v1", VerifySuperAdminRequest, verify_super_admin);

        // Super-admin surface
        register!(module, h, "admin.getAllBusinesses.v1", GetAllBusinessesRequest, get_all_businesses);
        register!(module, h, "admin.createBusiness.v1", CreateBusinessRpcRequest, create_business);
        register!(module, h, "admin.updateBusiness.v1", UpdateBusinessRpcRequest, update_business);
        register!(module, h, "admin.deleteBusiness.v1", DeleteBusinessRequest, delete_business);
        register!(module, h, "admin.repairCounts.v1", RepairCountsRequest, repair_counts);
        register!(module, h, "admin.rehashCredentials.v1", RehashCredentialsRequest, rehash_credentials);

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
