use contact_relay_core::error::MailTransportError;
use contact_relay_core::message::OutboundEmail;

/// Delivers a rendered notification. Called at most once per invocation.
pub trait MailTransport {
    fn send_email(&self, email: &OutboundEmail) -> Result<(), MailTransportError>;
}
