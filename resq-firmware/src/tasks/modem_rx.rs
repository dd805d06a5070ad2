//! Modem UART receive task
//!
//! Assembles SIM800 output into lines, forwards completed `+CMT` records to
//! the controller and wakes the TX task when the body prompt appears.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use resq_protocol::at::{self, RxEvent};
use resq_protocol::{InboundSms, LineBuffer, UrcParser};

use crate::channels::{INBOUND_SMS, PROMPT_RECEIVED};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Modem RX task - tokenizes modem output
///
/// A record has no terminator of its own; it is closed by the next header,
/// a final result code, the body prompt of our own send, or `idle_ms` of
/// silence on the line.
#[embassy_executor::task]
pub async fn modem_rx_task(mut rx: BufferedUartRx, idle_ms: u32) {
    info!("Modem RX task started");

    let mut lines = LineBuffer::new();
    let mut parser = UrcParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let idle = Duration::from_millis(idle_ms as u64);

    loop {
        match with_timeout(idle, rx.read(&mut buf)).await {
            Ok(Ok(n)) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match lines.feed(byte) {
                        Ok(Some(RxEvent::Prompt)) => {
                            trace!("Prompt received");
                            // A send is under way; nothing after this belongs to an SMS
                            if let Some(sms) = parser.flush() {
                                deliver(sms);
                            }
                            PROMPT_RECEIVED.signal(());
                        }
                        Ok(Some(RxEvent::Line(line))) => {
                            handle_line(&mut parser, &line);
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Line error: {:?}", e);
                        }
                    }
                }
            }
            Ok(Ok(_)) => {
                // No bytes read, continue
            }
            Ok(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Err(_) => {
                if let Some(sms) = parser.flush() {
                    deliver(sms);
                }
            }
        }
    }
}

/// Handle one complete modem line
fn handle_line(parser: &mut UrcParser, line: &str) {
    if at::is_send_confirmation(line) {
        debug!("Modem accepted SMS: {}", line);
    } else if at::is_error(line) {
        warn!("Modem error: {}", line);
    }

    match parser.feed_line(line) {
        Ok(Some(sms)) => deliver(sms),
        Ok(None) => {}
        Err(e) => warn!("Dropped incoming SMS: {:?}", e),
    }
}

/// Hand a record to the controller, dropping it if the queue is full
fn deliver(sms: InboundSms) {
    debug!("SMS from {}", sms.sender.as_str());
    if INBOUND_SMS.try_send(sms).is_err() {
        warn!("Inbound SMS channel full, dropping message");
    }
}
