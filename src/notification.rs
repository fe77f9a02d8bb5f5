//! Outbound notification seam.
//!
//! Actual delivery (SMTP, transactional email APIs) is an external concern;
//! the checkout service only needs somewhere to hand a message. Failures are
//! reported so callers can log them, but a lost confirmation email never
//! fails a placed order.

use thiserror::Error;

/// Error returned when a notification cannot be handed off.
#[derive(Debug, Error)]
#[error("failed to send notification: {0}")]
pub struct NotificationError(pub String);

/// External notification collaborator.
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message to `to`.
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Notifier that writes messages to the application log.
///
/// Default wiring for development and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        log::info!("notification to {to}: {subject}\n{body}");
        Ok(())
    }
}
