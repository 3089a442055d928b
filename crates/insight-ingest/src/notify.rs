//! Notification sender seam.
//!
//! The SMS gateway is an external collaborator consumed fire-and-forget;
//! nothing in this workspace implements real delivery.

use tracing::info;

use insight_model::Result;

/// Fire-and-forget SMS send.
pub trait NotificationSender {
    fn send(&self, phone: &str, body: &str) -> Result<()>;
}

/// Sender that only logs the send. Stands in wherever no gateway is wired.
#[derive(Debug, Default)]
pub struct LoggingSender;

impl NotificationSender for LoggingSender {
    fn send(&self, phone: &str, body: &str) -> Result<()> {
        info!(phone, chars = body.len(), "sms send (logging sender, not delivered)");
        Ok(())
    }
}
