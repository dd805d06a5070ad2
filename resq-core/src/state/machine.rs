//! State machine definition

use super::events::Event;
use crate::traits::SensorError;

/// Alert states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertState {
    /// Monitoring for crashes
    Idle,
    /// Crash detected, countdown running, rider may confirm or cancel
    PendingConfirmation,
    /// Alert sequence being queued
    Dispatched,
    /// Start-up check failed; alert logic halted
    Faulted(FaultKind),
}

/// Types of faults that halt the alert logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Motion sensor missing or misidentified
    SensorNotDetected,
    /// Motion sensor bus failure during start-up
    SensorBus,
}

impl From<SensorError> for FaultKind {
    fn from(e: SensorError) -> Self {
        match e {
            SensorError::NotDetected => FaultKind::SensorNotDetected,
            SensorError::Bus => FaultKind::SensorBus,
        }
    }
}

impl AlertState {
    /// Check if a countdown is running
    pub fn is_pending(&self) -> bool {
        matches!(self, AlertState::PendingConfirmation)
    }

    /// Check if this is a fault state
    pub fn is_faulted(&self) -> bool {
        matches!(self, AlertState::Faulted(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use AlertState::*;
        use Event::*;

        match (self, event) {
            // Faults are terminal for the process lifetime
            (Faulted(_), _) => self,
            (_, FaultDetected(kind)) => Faulted(kind),

            (Idle, CrashDetected) => PendingConfirmation,

            (PendingConfirmation, Confirmed) => Dispatched,
            (PendingConfirmation, CountdownElapsed) => Dispatched,
            (PendingConfirmation, Cancelled) => Idle,

            (Dispatched, DispatchComplete) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
