//! Outbound notification scheduling
//!
//! Nothing talks to the transport directly. Messages are composed up front,
//! queued in the [`Outbox`], and handed over one at a time with the modem's
//! settle delays between them, so the controller never blocks while a long
//! alert sequence drains.

pub mod notifier;
pub mod outbox;

pub use notifier::{DispatchError, DispatchOutcome, Dispatcher};
pub use outbox::{MessageKind, OutboundMessage, Outbox, OutboxError, SendReport, OUTBOX_CAPACITY};
