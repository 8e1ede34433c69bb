// Notification Dispatcher Port

use async_trait::async_trait;

/// Out-of-band customer notification (SMS/WhatsApp).
///
/// Delivery is best-effort by contract: implementations log failures and
/// never return an error, so queue operations succeed independent of
/// notification delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a message to a phone number, fire-and-forget
    async fn send(&self, phone: &str, message: &str);
}

/// Notifier that drops every message (default when no provider is configured)
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, phone: &str, _message: &str) {
        tracing::debug!(phone = %phone, "Notification dropped (no provider configured)");
    }
}
