//! Modem UART transmit task
//!
//! Brings the SIM800 into text mode and performs the `AT+CMGS` exchange for
//! each message the controller releases.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{with_timeout, Duration, Timer};
use embedded_io_async::Write;

use resq_core::config::ModemTiming;
use resq_protocol::at::{self, AtError, COMMAND_TERMINATOR, CTRL_Z, INIT_SEQUENCE};

use crate::channels::{OutgoingSms, OUTBOUND_SMS, PROMPT_RECEIVED};

/// Wait for the modem to boot before the first command
const BOOT_DELAY_MS: u64 = 1_000;

/// Gap between initialisation commands
const INIT_COMMAND_GAP_MS: u64 = 500;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum SendError {
    Command(AtError),
    Uart,
}

/// Modem TX task - writes commands and message bodies
#[embassy_executor::task]
pub async fn modem_tx_task(mut tx: BufferedUartTx, timing: ModemTiming) {
    info!("Modem TX task started");

    init_modem(&mut tx).await;

    loop {
        let sms = OUTBOUND_SMS.receive().await;

        match send_sms(&mut tx, &sms, &timing).await {
            Ok(()) => debug!("SMS to {} written", sms.recipient.as_str()),
            Err(e) => warn!("Failed to send SMS to {}: {:?}", sms.recipient.as_str(), e),
        }

        // The modem ignores commands while it transmits
        Timer::after_millis(timing.settle_ms as u64).await;
    }
}

/// Send the text-mode initialisation sequence
async fn init_modem(tx: &mut BufferedUartTx) {
    Timer::after_millis(BOOT_DELAY_MS).await;

    for command in INIT_SEQUENCE {
        if let Err(e) = write_command(tx, command.as_bytes()).await {
            warn!("Failed to send {}: {:?}", command, e);
        }
        Timer::after_millis(INIT_COMMAND_GAP_MS).await;
    }

    info!("Modem initialised");
}

/// One `AT+CMGS` exchange
///
/// The body is written once the prompt arrives or the prompt timeout
/// expires, whichever happens first.
async fn send_sms(
    tx: &mut BufferedUartTx,
    sms: &OutgoingSms,
    timing: &ModemTiming,
) -> Result<(), SendError> {
    let command = at::encode_send_command(&sms.recipient).map_err(SendError::Command)?;

    PROMPT_RECEIVED.reset();
    tx.write_all(command.as_bytes())
        .await
        .map_err(|_| SendError::Uart)?;

    let prompt_timeout = Duration::from_millis(timing.prompt_timeout_ms as u64);
    if with_timeout(prompt_timeout, PROMPT_RECEIVED.wait()).await.is_err() {
        debug!("No prompt from modem, writing body anyway");
    }

    tx.write_all(sms.body.as_bytes())
        .await
        .map_err(|_| SendError::Uart)?;
    tx.write_all(&[CTRL_Z]).await.map_err(|_| SendError::Uart)?;
    tx.flush().await.map_err(|_| SendError::Uart)
}

async fn write_command(tx: &mut BufferedUartTx, command: &[u8]) -> Result<(), SendError> {
    tx.write_all(command).await.map_err(|_| SendError::Uart)?;
    tx.write_all(COMMAND_TERMINATOR)
        .await
        .map_err(|_| SendError::Uart)
}
