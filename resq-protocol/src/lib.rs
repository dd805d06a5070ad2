//! ResQ Text Messaging Protocol
//!
//! Everything the helmet says or hears travels as plain SMS text through a
//! SIM800 modem. This crate holds the three layers of that conversation:
//!
//! ```text
//! ┌──────────────┐   bytes   ┌────────────┐  InboundSms  ┌──────────────┐
//! │ SIM800 UART  │ ────────▶ │ at::       │ ───────────▶ │ message::    │
//! │              │ ◀──────── │ LineBuffer │              │ parse_body   │
//! └──────────────┘ AT+CMGS   │ UrcParser  │              └──────────────┘
//!                            └────────────┘
//!                                  ▲
//!                                  │ OutboundBody
//!                           ┌──────────────┐
//!                           │ outbound::   │
//!                           │ compose_*    │
//!                           └──────────────┘
//! ```
//!
//! Inbound bodies are line-oriented. Each line of interest is a *pair line*
//! of the form `left - right`; a body whose first line starts with `null - `
//! carries the rider's coordinates ahead of the contact list.

#![no_std]
#![deny(unsafe_code)]

pub mod at;
pub mod message;
pub mod outbound;
pub mod pair;

pub use at::{AtError, LineBuffer, UrcParser};
pub use message::{
    parse_body, parse_registration, Body, Contact, ContactList, Coordinates, InboundSms,
    MessageError, Name, Number, ParsedBody, MAX_PAIRS,
};
pub use outbound::{ComposeError, OutboundBody};
pub use pair::{PairError, PairLine};
