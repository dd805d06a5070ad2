//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use resq_drivers::indicator::IndicatorMode;
use resq_protocol::{InboundSms, Number, OutboundBody};

/// Channel capacity for received SMS records
const INBOUND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for SMS waiting on the modem
const OUTBOUND_CHANNEL_SIZE: usize = 2;

/// One SMS handed from the controller to the modem TX task
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutgoingSms {
    pub recipient: Number,
    pub body: OutboundBody,
}

/// Complete SMS records assembled by the modem RX task
pub static INBOUND_SMS: Channel<CriticalSectionRawMutex, InboundSms, INBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Messages released by the controller's outbox
pub static OUTBOUND_SMS: Channel<CriticalSectionRawMutex, OutgoingSms, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the modem printed the `>` body prompt
pub static PROMPT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Indicator pattern requested by the controller
pub static INDICATOR_MODE: Signal<CriticalSectionRawMutex, IndicatorMode> = Signal::new();
