//! Crash detection
//!
//! A crash is a large sample-to-sample jump on any axis while the helmet is
//! tilted well away from upright.

pub mod crash;

pub use crash::{tilt_degrees, CrashDetector};
