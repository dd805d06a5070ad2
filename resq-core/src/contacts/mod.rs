//! Rider registration and emergency-contact bookkeeping

pub mod registration;
pub mod table;

pub use registration::Registration;
pub use table::ContactTable;
