//! Channel-backed SMS transport
//!
//! The controller talks to the modem tasks through [`MessageTransport`];
//! this adapter turns those calls into non-blocking channel operations.

use resq_core::traits::{MessageTransport, TransportError};
use resq_protocol::{InboundSms, Number, OutboundBody};

use crate::channels::{OutgoingSms, INBOUND_SMS, OUTBOUND_SMS};

pub struct ChannelTransport;

impl MessageTransport for ChannelTransport {
    fn send(&mut self, recipient: &str, body: &str) -> Result<(), TransportError> {
        let recipient = Number::try_from(recipient).map_err(|_| TransportError::Rejected)?;
        let body = OutboundBody::try_from(body).map_err(|_| TransportError::Rejected)?;

        OUTBOUND_SMS
            .try_send(OutgoingSms { recipient, body })
            .map_err(|_| TransportError::Busy)
    }

    fn poll_incoming(&mut self) -> Option<InboundSms> {
        INBOUND_SMS.try_receive().ok()
    }
}
