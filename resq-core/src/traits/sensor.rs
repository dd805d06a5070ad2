//! Motion sensor trait

/// Errors that can occur with the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not answer or identified as something else
    NotDetected,
    /// Bus transaction failed
    Bus,
}

/// Raw accelerometer reading
///
/// Units are sensor LSBs; at the ±2 g range used here 16384 LSB = 1 g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Trait for 3-axis accelerometers
pub trait MotionSensor {
    /// Read the current raw acceleration
    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError>;

    /// Verify the device is present and configured
    ///
    /// Called once at start-up; a failure is fatal for the alert logic.
    fn self_test(&mut self) -> Result<(), SensorError>;
}
