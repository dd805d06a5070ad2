//! GPIO pin abstractions

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Two outputs driven in lockstep (e.g. LED and buzzer on one alert line)
impl<A: OutputPin, B: OutputPin> OutputPin for (A, B) {
    fn set_high(&mut self) {
        self.0.set_high();
        self.1.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
        self.1.set_low();
    }
}
