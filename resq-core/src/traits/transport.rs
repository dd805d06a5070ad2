//! Text-message transport trait

use resq_protocol::InboundSms;

/// Errors reported when handing a message to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Transport cannot accept another message right now
    Busy,
    /// Transport refused the message (bad recipient, modem error)
    Rejected,
}

/// Best-effort SMS transport
///
/// Delivery is not guaranteed; `Ok` only means the message was accepted.
pub trait MessageTransport {
    /// Queue a message for sending
    fn send(&mut self, recipient: &str, body: &str) -> Result<(), TransportError>;

    /// Take the next received message, if any
    fn poll_incoming(&mut self) -> Option<InboundSms>;
}
