//! Board-agnostic core logic for the ResQ crash-response helmet
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motion sensor, SMS transport, indicator)
//! - Crash detection from raw accelerometer samples
//! - Button click classification (double = send now, triple = cancel)
//! - Alert state machine
//! - Rider registration and emergency-contact bookkeeping
//! - Paced outbound message scheduling
//! - Configuration types and a small TOML-subset parser
//!
//! [`controller::AlertController`] ties these together in a single
//! `tick()` that the firmware calls every 100 ms.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod contacts;
pub mod controller;
pub mod detect;
pub mod dispatch;
pub mod input;
pub mod state;
pub mod traits;

pub use controller::{Activities, Activity, AlertController};
