// Waitline Infrastructure - Notification Adapter
// Implements: Notifier (best-effort WhatsApp delivery via Twilio)

mod twilio;

pub use twilio::{TwilioConfig, TwilioNotifier};
