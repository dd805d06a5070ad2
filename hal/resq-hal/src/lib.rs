//! ResQ Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the helmet drivers
//! are written against. Chip HALs that already implement `embedded-hal` 1.0
//! plug in through the [`Compat`] adapter, so no per-chip crate is needed.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  resq-drivers (MPU6050, indicator)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  resq-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Compat<embassy-rp / any e-h 1.0 HAL>   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (LED, buzzer)
//! - [`i2c::I2cBus`] - I2C master operations (IMU)

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod i2c;

pub use compat::Compat;
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig, I2cError};
