//! Button input handling

pub mod clicks;

pub use clicks::{ClickClassifier, ClickCount};
