//! Paced FIFO of outbound messages

use heapless::Deque;
use resq_protocol::{Number, OutboundBody};

use crate::traits::{MessageTransport, TransportError};

/// Maximum queued outbound messages (two full alert sequences and notices)
pub const OUTBOX_CAPACITY: usize = 32;

/// What an outbound message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKind {
    RegistrationConfirmation,
    CrashPrompt,
    UserAlert,
    ContactAlert,
}

impl MessageKind {
    /// Whether the message belongs to an alert sequence
    pub fn is_alert(self) -> bool {
        matches!(self, MessageKind::UserAlert | MessageKind::ContactAlert)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboxError {
    /// Not enough free slots
    Full,
}

/// A composed message waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub kind: MessageKind,
    pub recipient: Number,
    pub body: OutboundBody,
    /// Time the next message must wait after this one is handed over
    pub hold_after_ms: u32,
}

/// Result of handing one message to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendReport {
    pub kind: MessageKind,
    pub recipient: Number,
    pub result: Result<(), TransportError>,
}

/// Outbound message queue
///
/// Sends are fire-and-forget: a message is removed when it is handed to the
/// transport whether or not the transport accepts it.
#[derive(Debug)]
pub struct Outbox {
    queue: Deque<OutboundMessage, OUTBOX_CAPACITY>,
    last_send_ms: u32,
    hold_ms: u32,
}

impl Default for Outbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Outbox {
    pub fn new() -> Self {
        Self {
            queue: Deque::new(),
            last_send_ms: 0,
            hold_ms: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn free_slots(&self) -> usize {
        OUTBOX_CAPACITY - self.queue.len()
    }

    /// Message that will be sent next
    pub fn peek(&self) -> Option<&OutboundMessage> {
        self.queue.front()
    }

    pub fn push(&mut self, message: OutboundMessage) -> Result<(), OutboxError> {
        self.queue.push_back(message).map_err(|_| OutboxError::Full)
    }

    /// Free at least `needed` slots
    ///
    /// Queued notices go first, then the oldest alert messages. Returns the
    /// number of messages dropped.
    pub fn make_room(&mut self, needed: usize) -> usize {
        let needed = needed.min(OUTBOX_CAPACITY);
        let notices = self.evict(needed, false);
        notices + self.evict(needed, true)
    }

    fn evict(&mut self, needed: usize, alerts: bool) -> usize {
        let mut excess = needed.saturating_sub(self.free_slots());
        let mut evicted = 0;
        for _ in 0..self.queue.len() {
            let Some(message) = self.queue.pop_front() else {
                break;
            };
            if excess > 0 && message.kind.is_alert() == alerts {
                excess -= 1;
                evicted += 1;
            } else {
                // Reuses the slot pop_front just freed
                let _ = self.queue.push_back(message);
            }
        }
        evicted
    }

    /// Whether the hold time of the previous send has passed
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_send_ms) >= self.hold_ms
    }

    /// Hand the next message to the transport if its turn has come
    pub fn flush<T>(&mut self, now_ms: u32, transport: &mut T) -> Option<SendReport>
    where
        T: MessageTransport + ?Sized,
    {
        if !self.is_due(now_ms) {
            return None;
        }
        let message = self.queue.pop_front()?;

        let result = transport.send(&message.recipient, &message.body);
        self.last_send_ms = now_ms;
        self.hold_ms = message.hold_after_ms;

        Some(SendReport {
            kind: message.kind,
            recipient: message.recipient,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resq_protocol::InboundSms;

    #[derive(Default)]
    struct RecordingTransport {
        sent: heapless::Vec<(Number, OutboundBody), 20>,
        reject: bool,
    }

    impl MessageTransport for RecordingTransport {
        fn send(&mut self, recipient: &str, body: &str) -> Result<(), TransportError> {
            if self.reject {
                return Err(TransportError::Rejected);
            }
            let mut r = Number::new();
            r.push_str(recipient).unwrap();
            let mut b = OutboundBody::new();
            b.push_str(body).unwrap();
            self.sent.push((r, b)).unwrap();
            Ok(())
        }

        fn poll_incoming(&mut self) -> Option<InboundSms> {
            None
        }
    }

    fn message(recipient: &str, hold_after_ms: u32) -> OutboundMessage {
        let mut number = Number::new();
        number.push_str(recipient).unwrap();
        let mut body = OutboundBody::new();
        body.push_str("hello").unwrap();
        OutboundMessage {
            kind: MessageKind::ContactAlert,
            recipient: number,
            body,
            hold_after_ms,
        }
    }

    #[test]
    fn test_first_send_is_immediate() {
        let mut outbox = Outbox::new();
        let mut transport = RecordingTransport::default();
        outbox.push(message("+1", 1_000)).unwrap();

        let report = outbox.flush(5, &mut transport).unwrap();
        assert_eq!(report.result, Ok(()));
        assert_eq!(transport.sent.len(), 1);
    }

    #[test]
    fn test_pacing_between_sends() {
        let mut outbox = Outbox::new();
        let mut transport = RecordingTransport::default();
        outbox.push(message("+1", 6_000)).unwrap();
        outbox.push(message("+2", 6_000)).unwrap();

        assert!(outbox.flush(100, &mut transport).is_some());
        assert!(outbox.flush(200, &mut transport).is_none());
        assert!(outbox.flush(6_099, &mut transport).is_none());
        let report = outbox.flush(6_100, &mut transport).unwrap();
        assert_eq!(report.recipient.as_str(), "+2");
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut outbox = Outbox::new();
        let mut transport = RecordingTransport::default();
        for r in ["+1", "+2", "+3"] {
            outbox.push(message(r, 0)).unwrap();
        }
        for t in 0..3 {
            outbox.flush(t, &mut transport);
        }
        let order: heapless::Vec<&str, 3> =
            transport.sent.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(order.as_slice(), &["+1", "+2", "+3"]);
    }

    #[test]
    fn test_failed_send_not_retried() {
        let mut outbox = Outbox::new();
        let mut transport = RecordingTransport {
            reject: true,
            ..Default::default()
        };
        outbox.push(message("+1", 0)).unwrap();
        let report = outbox.flush(0, &mut transport).unwrap();
        assert_eq!(report.result, Err(TransportError::Rejected));
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_full() {
        let mut outbox = Outbox::new();
        for _ in 0..OUTBOX_CAPACITY {
            outbox.push(message("+1", 0)).unwrap();
        }
        assert_eq!(outbox.free_slots(), 0);
        assert_eq!(outbox.push(message("+1", 0)), Err(OutboxError::Full));
    }

    #[test]
    fn test_pacing_across_clock_wrap() {
        let mut outbox = Outbox::new();
        let mut transport = RecordingTransport::default();
        outbox.push(message("+1", 1_000)).unwrap();
        outbox.push(message("+2", 0)).unwrap();

        let start = u32::MAX - 100;
        outbox.flush(start, &mut transport).unwrap();
        assert!(outbox.flush(start.wrapping_add(999), &mut transport).is_none());
        assert!(outbox.flush(start.wrapping_add(1_000), &mut transport).is_some());
    }

    #[test]
    fn test_make_room_drops_notices_first() {
        let mut outbox = Outbox::new();
        for i in 0..OUTBOX_CAPACITY {
            let mut m = message("+1", 0);
            if i % 4 == 0 {
                m.kind = MessageKind::CrashPrompt;
            }
            outbox.push(m).unwrap();
        }

        assert_eq!(outbox.make_room(3), 3);
        assert_eq!(outbox.free_slots(), 3);
        let notices = outbox
            .queue
            .iter()
            .filter(|m| m.kind == MessageKind::CrashPrompt)
            .count();
        assert_eq!(notices, OUTBOX_CAPACITY / 4 - 3);
    }

    #[test]
    fn test_make_room_drops_oldest_alerts() {
        let mut outbox = Outbox::new();
        for i in 0..OUTBOX_CAPACITY {
            let mut number: heapless::String<8> = heapless::String::new();
            core::fmt::write(&mut number, format_args!("+{}", i)).unwrap();
            outbox.push(message(&number, 0)).unwrap();
        }

        assert_eq!(outbox.make_room(2), 2);
        assert_eq!(outbox.peek().unwrap().recipient.as_str(), "+2");
        assert_eq!(outbox.len(), OUTBOX_CAPACITY - 2);
    }

    #[test]
    fn test_make_room_noop_with_space() {
        let mut outbox = Outbox::new();
        outbox.push(message("+1", 0)).unwrap();
        assert_eq!(outbox.make_room(OUTBOX_CAPACITY - 1), 0);
        assert_eq!(outbox.len(), 1);
    }
}
