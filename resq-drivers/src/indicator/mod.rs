//! Alert indicator outputs

pub mod gpio;

pub use gpio::{GpioIndicator, IndicatorMode};
