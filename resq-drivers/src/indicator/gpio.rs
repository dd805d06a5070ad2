//! GPIO alert indicator
//!
//! Drives the LED and buzzer (or a pair of them, see `resq_hal::OutputPin`
//! for tuples) from one logical output. Blinking is rendered by calling
//! [`GpioIndicator::refresh`] periodically with the current time.

use resq_core::traits::AlertIndicator;
use resq_hal::OutputPin;

/// What the indicator is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorMode {
    Off,
    /// Countdown pattern
    Blinking,
    /// Fault signal
    Steady,
}

/// GPIO alert indicator
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, indicator ON = pin LOW
    inverted: bool,
    mode: IndicatorMode,
    half_period_ms: u32,
    /// Current logical output (true = lit)
    lit: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new indicator, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO output to drive
    /// - `inverted`: If true, the output is active-low
    /// - `half_period_ms`: On and off time of the blink pattern
    pub fn new(pin: P, inverted: bool, half_period_ms: u32) -> Self {
        let mut indicator = Self {
            pin,
            inverted,
            mode: IndicatorMode::Off,
            half_period_ms: half_period_ms.max(1),
            lit: true,
        };
        indicator.drive(false);
        indicator
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn drive(&mut self, lit: bool) {
        if lit == self.lit {
            return;
        }
        self.lit = lit;
        self.pin.set_state(lit != self.inverted);
    }

    /// Switch pattern; steady and off take effect immediately
    pub fn set_mode(&mut self, mode: IndicatorMode) {
        self.mode = mode;
        match mode {
            IndicatorMode::Off => self.drive(false),
            IndicatorMode::Steady => self.drive(true),
            IndicatorMode::Blinking => {}
        }
    }

    /// Update the output for the current time
    ///
    /// While blinking the output is lit during odd half periods.
    pub fn refresh(&mut self, now_ms: u32) {
        if self.mode == IndicatorMode::Blinking {
            let lit = (now_ms / self.half_period_ms) % 2 == 1;
            self.drive(lit);
        }
    }
}

impl<P: OutputPin> AlertIndicator for GpioIndicator<P> {
    fn set_blinking(&mut self, on: bool) {
        if on {
            self.set_mode(IndicatorMode::Blinking);
        } else if self.mode == IndicatorMode::Blinking {
            self.set_mode(IndicatorMode::Off);
        }
    }

    fn set_steady(&mut self, on: bool) {
        if on {
            self.set_mode(IndicatorMode::Steady);
        } else if self.mode == IndicatorMode::Steady {
            self.set_mode(IndicatorMode::Off);
        }
    }
}
