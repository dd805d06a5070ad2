//! Hardware abstraction traits
//!
//! These traits define the interface between the alert logic and the
//! modem, IMU and indicator implementations.

pub mod indicator;
pub mod sensor;
pub mod transport;

pub use indicator::AlertIndicator;
pub use sensor::{AccelSample, MotionSensor, SensorError};
pub use transport::{MessageTransport, TransportError};
