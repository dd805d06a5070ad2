//! Alert indicator trait

/// LED/buzzer output signalling the alert state to the rider
pub trait AlertIndicator {
    /// Start or stop the countdown blink pattern
    fn set_blinking(&mut self, on: bool);

    /// Hold the output on or off (fault signal)
    fn set_steady(&mut self, on: bool);
}
