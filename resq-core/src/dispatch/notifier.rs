//! Alert sequence composition

use heapless::Vec;
use resq_protocol::outbound::{self, ComposeError, OutboundBody};
use resq_protocol::{Contact, Coordinates, Number, MAX_PAIRS};

use super::outbox::{MessageKind, OutboundMessage, Outbox, OutboxError};
use crate::config::ModemTiming;
use crate::contacts::ContactTable;

/// One user message plus one per emergency contact
const SEQUENCE_CAPACITY: usize = MAX_PAIRS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    Compose(ComposeError),
    Outbox(OutboxError),
}

impl From<ComposeError> for DispatchError {
    fn from(e: ComposeError) -> Self {
        DispatchError::Compose(e)
    }
}

impl From<OutboxError> for DispatchError {
    fn from(e: OutboxError) -> Self {
        DispatchError::Outbox(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// No coordinates or no contacts; nothing queued
    Skipped,
    /// Sequence queued for the user and this many contacts; `dropped`
    /// older queued messages were evicted to make room
    Queued { contacts: u8, dropped: u8 },
}

/// Composes messages and queues them with the modem's pacing
#[derive(Debug, Clone)]
pub struct Dispatcher {
    timing: ModemTiming,
}

impl Dispatcher {
    pub fn new(timing: ModemTiming) -> Self {
        Self { timing }
    }

    /// Hold time after a message of this kind
    fn hold_after(&self, kind: MessageKind) -> u32 {
        let settle = self.timing.post_send_delay_ms();
        match kind {
            MessageKind::ContactAlert => settle.saturating_add(self.timing.contact_gap_ms),
            _ => settle,
        }
    }

    fn message(
        &self,
        kind: MessageKind,
        recipient: &Number,
        body: OutboundBody,
    ) -> OutboundMessage {
        OutboundMessage {
            kind,
            recipient: recipient.clone(),
            body,
            hold_after_ms: self.hold_after(kind),
        }
    }

    /// Queue a single message
    pub fn queue(
        &self,
        outbox: &mut Outbox,
        kind: MessageKind,
        recipient: &Number,
        body: OutboundBody,
    ) -> Result<(), OutboxError> {
        outbox.push(self.message(kind, recipient, body))
    }

    /// Queue the full alert sequence
    ///
    /// The user hears first, then each emergency contact in table order.
    /// Coordinates and contacts are consumed: both are cleared once the
    /// sequence is queued. With either one empty nothing happens. A full
    /// outbox never blocks the sequence; older messages are evicted instead
    /// (see [`Outbox::make_room`]).
    pub fn dispatch(
        &self,
        outbox: &mut Outbox,
        user: &Contact,
        coordinates: &mut Coordinates,
        contacts: &mut ContactTable,
    ) -> Result<DispatchOutcome, DispatchError> {
        if contacts.is_empty() || coordinates.is_empty() {
            return Ok(DispatchOutcome::Skipped);
        }

        let mut sequence: Vec<OutboundMessage, SEQUENCE_CAPACITY> = Vec::new();
        let user_alert = outbound::compose_user_alert(coordinates.as_str())?;
        sequence
            .push(self.message(MessageKind::UserAlert, &user.number, user_alert))
            .map_err(|_| OutboxError::Full)?;

        for contact in contacts.iter() {
            let body = outbound::compose_contact_alert(coordinates.as_str(), &contact.name)?;
            sequence
                .push(self.message(MessageKind::ContactAlert, &contact.number, body))
                .map_err(|_| OutboxError::Full)?;
        }

        let dropped = outbox.make_room(sequence.len());
        for message in sequence {
            outbox.push(message)?;
        }

        let notified = contacts.len() as u8;
        coordinates.clear();
        contacts.clear();
        Ok(DispatchOutcome::Queued {
            contacts: notified,
            dropped: dropped as u8,
        })
    }
}
