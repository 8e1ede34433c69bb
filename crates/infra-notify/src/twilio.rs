// Twilio WhatsApp Notifier

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use waitline_core::port::Notifier;

/// Twilio account configuration, read from the environment
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sending number, without the `whatsapp:` prefix
    pub from_phone: String,
}

impl TwilioConfig {
    /// Load from `TWILIO_SID` / `TWILIO_TOKEN` / `TWILIO_PHONE`.
    /// Returns None when any is unset; the daemon then falls back to the
    /// no-op notifier.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            account_sid: std::env::var("TWILIO_SID").ok()?,
            auth_token: std::env::var("TWILIO_TOKEN").ok()?,
            from_phone: std::env::var("TWILIO_PHONE").ok()?,
        })
    }
}

/// Notifier that delivers WhatsApp messages through the Twilio REST API.
///
/// Failures are logged and swallowed: queue operations must succeed
/// independent of notification delivery.
pub struct TwilioNotifier {
    config: TwilioConfig,
    client: reqwest::Client,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send(&self, phone: &str, message: &str) {
        if phone.is_empty() {
            return;
        }

        let params = [
            ("From", format!("whatsapp:{}", self.config.from_phone)),
            ("To", format!("whatsapp:{}", phone)),
            ("Body", message.to_string()),
        ];

        let result = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(phone = %phone, "Notification sent");
            }
            Ok(response) => {
                warn!(
                    phone = %phone,
                    status = %response.status(),
                    "Twilio rejected notification"
                );
            }
            Err(e) => {
                warn!(phone = %phone, error = %e, "Twilio request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let notifier = TwilioNotifier::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_phone: "+15550001111".to_string(),
        });
        assert_eq!(
            notifier.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        // No Twilio backend is reachable here; send must still return
        let notifier = TwilioNotifier::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_phone: "+15550001111".to_string(),
        });
        notifier.send("+15552223333", "test").await;
    }
}
