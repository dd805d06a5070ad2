//! Events that trigger state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Detector flagged impact plus tilt
    CrashDetected,
    /// Rider double-clicked: send now
    Confirmed,
    /// Rider triple-clicked: false alarm
    Cancelled,
    /// Countdown ran out without an answer
    CountdownElapsed,
    /// Alert sequence queued (or skipped)
    DispatchComplete,
    /// Start-up check failed
    FaultDetected(FaultKind),
}
