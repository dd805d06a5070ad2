//! Alert state machine
//!
//! The alert lifecycle is explicit, finite, and deterministic: every change
//! of state is the result of one [`Event`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{AlertState, FaultKind};
