//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod indicator;
pub mod modem_rx;
pub mod modem_tx;
pub mod tick;

pub use controller::controller_task;
pub use indicator::indicator_task;
pub use modem_rx::modem_rx_task;
pub use modem_tx::modem_tx_task;
pub use tick::tick_task;
