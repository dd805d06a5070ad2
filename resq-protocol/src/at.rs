//! SIM800 text-mode AT codec.
//!
//! Only the handful of exchanges the helmet needs are covered:
//!
//! - start-up handshake ([`INIT_SEQUENCE`]), one command per line
//! - sending: `AT+CMGS="<number>"\r`, wait for the `>` prompt, body, Ctrl-Z
//! - receiving: with `AT+CNMI=1,2,0,0,0` the modem pushes every SMS as a
//!   `+CMT: "<sender>",...` header line followed by the body lines
//!
//! Bytes go through [`LineBuffer`], whose lines go through [`UrcParser`].

use heapless::{String, Vec};

use crate::message::{InboundSms, Number, NUMBER_CAPACITY};

/// Commands sent once after power-up, in order
///
/// `ATE0` turns command echo off so our own commands never show up inside a
/// received message.
pub const INIT_SEQUENCE: [&str; 4] = ["AT", "ATE0", "AT+CMGF=1", "AT+CNMI=1,2,0,0,0"];

/// Line terminator for commands
pub const COMMAND_TERMINATOR: &[u8] = b"\r\n";

/// Terminates an SMS body after `AT+CMGS`
pub const CTRL_Z: u8 = 0x1A;

/// Sent by the modem when it is ready for the SMS body
pub const PROMPT: u8 = b'>';

/// Unsolicited header announcing a received SMS
pub const CMT_HEADER: &str = "+CMT:";

/// Longest line the codec assembles
pub const LINE_CAPACITY: usize = 256;

/// `AT+CMGS="` + number + `"\r`
pub const SEND_COMMAND_CAPACITY: usize = 12 + NUMBER_CAPACITY;

pub type Line = String<LINE_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AtError {
    /// `+CMT:` header without a quoted sender
    MalformedHeader,
    /// Phone number does not fit [`NUMBER_CAPACITY`]
    NumberTooLong,
    /// Line exceeded [`LINE_CAPACITY`] and was dropped
    LineTooLong,
    /// Line was not valid UTF-8 and was dropped
    InvalidEncoding,
    /// Received body exceeded its capacity and the record was dropped
    BodyTooLong,
}

/// Build the `AT+CMGS` command that opens an outgoing SMS
pub fn encode_send_command(number: &str) -> Result<String<SEND_COMMAND_CAPACITY>, AtError> {
    if number.len() > NUMBER_CAPACITY {
        return Err(AtError::NumberTooLong);
    }
    let mut command = String::new();
    for part in ["AT+CMGS=\"", number, "\"\r"] {
        command
            .push_str(part)
            .map_err(|_| AtError::NumberTooLong)?;
    }
    Ok(command)
}

/// What a received byte completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RxEvent {
    /// A full line, CR stripped
    Line(Line),
    /// The `>` prompt at the start of a line
    Prompt,
}

/// Assembles modem bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, LINE_CAPACITY>,
    overflowed: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed one byte
    ///
    /// A `>` arriving at the start of a line is reported as [`RxEvent::Prompt`]
    /// and not buffered.
    pub fn feed(&mut self, byte: u8) -> Result<Option<RxEvent>, AtError> {
        match byte {
            b'\r' => Ok(None),
            b'\n' => {
                let overflowed = self.overflowed;
                let bytes = core::mem::take(&mut self.buffer);
                self.overflowed = false;
                if overflowed {
                    return Err(AtError::LineTooLong);
                }
                let text = core::str::from_utf8(&bytes).map_err(|_| AtError::InvalidEncoding)?;
                let mut line = Line::new();
                line.push_str(text).map_err(|_| AtError::LineTooLong)?;
                Ok(Some(RxEvent::Line(line)))
            }
            PROMPT if self.buffer.is_empty() && !self.overflowed => Ok(Some(RxEvent::Prompt)),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
        }
    }
}

/// Turns modem lines into received SMS records
///
/// A record is open from its `+CMT:` header until the next header, a final
/// result code, or [`UrcParser::flush`] (called by the receiver after an
/// idle gap on the line).
#[derive(Debug, Clone, Default)]
pub struct UrcParser {
    pending: Option<InboundSms>,
    discarding: bool,
}

impl UrcParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record is being assembled
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one line, returning a record it completed
    pub fn feed_line(&mut self, line: &str) -> Result<Option<InboundSms>, AtError> {
        if let Some(rest) = line.strip_prefix(CMT_HEADER) {
            let completed = self.flush();
            self.discarding = false;
            match parse_sender(rest) {
                Ok(sender) => {
                    self.pending = Some(InboundSms {
                        sender,
                        body: Default::default(),
                    });
                    return Ok(completed);
                }
                Err(e) => {
                    self.discarding = true;
                    return match completed {
                        Some(sms) => Ok(Some(sms)),
                        None => Err(e),
                    };
                }
            }
        }

        if is_final_result(line) {
            self.discarding = false;
            return Ok(self.flush());
        }

        let Some(sms) = self.pending.as_mut() else {
            return Ok(None);
        };

        if line.is_empty() && sms.body.is_empty() {
            return Ok(None);
        }
        let appended = if sms.body.is_empty() {
            sms.body.push_str(line)
        } else {
            sms.body
                .push('\n')
                .map_err(|_| ())
                .and_then(|_| sms.body.push_str(line))
        };
        if appended.is_err() {
            self.pending = None;
            self.discarding = true;
            return Err(AtError::BodyTooLong);
        }
        Ok(None)
    }

    /// Close the open record, if any
    pub fn flush(&mut self) -> Option<InboundSms> {
        self.pending.take()
    }
}

fn parse_sender(header: &str) -> Result<Number, AtError> {
    let mut parts = header.splitn(3, '"');
    parts.next();
    let sender = parts.next().ok_or(AtError::MalformedHeader)?;
    parts.next().ok_or(AtError::MalformedHeader)?;

    let mut number = Number::new();
    number
        .push_str(sender)
        .map_err(|_| AtError::NumberTooLong)?;
    Ok(number)
}

fn is_final_result(line: &str) -> bool {
    line == "OK" || is_error(line) || is_send_confirmation(line)
}

/// Whether a line is the modem's reply to a completed `AT+CMGS`
pub fn is_send_confirmation(line: &str) -> bool {
    line.starts_with("+CMGS:")
}

/// Whether a line reports a failed command
pub fn is_error(line: &str) -> bool {
    line == "ERROR" || line.starts_with("+CMS ERROR") || line.starts_with("+CME ERROR")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(buffer: &mut LineBuffer, bytes: &[u8]) -> heapless::Vec<RxEvent, 8> {
        let mut events = heapless::Vec::new();
        for &b in bytes {
            if let Ok(Some(event)) = buffer.feed(b) {
                events.push(event).unwrap();
            }
        }
        events
    }

    fn line(text: &str) -> RxEvent {
        let mut l = Line::new();
        l.push_str(text).unwrap();
        RxEvent::Line(l)
    }

    #[test]
    fn test_send_command() {
        let cmd = encode_send_command("+15550100").unwrap();
        assert_eq!(cmd.as_str(), "AT+CMGS=\"+15550100\"\r");
    }

    #[test]
    fn test_send_command_number_too_long() {
        assert_eq!(
            encode_send_command("1234567890123456789012345"),
            Err(AtError::NumberTooLong)
        );
    }

    #[test]
    fn test_line_buffer_strips_cr() {
        let mut buffer = LineBuffer::new();
        let events = feed_all(&mut buffer, b"OK\r\n\r\n+CMTI\r\n");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], line("OK"));
        assert_eq!(events[1], line(""));
        assert_eq!(events[2], line("+CMTI"));
    }

    #[test]
    fn test_line_buffer_prompt() {
        let mut buffer = LineBuffer::new();
        let events = feed_all(&mut buffer, b"\r\n> ");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], RxEvent::Prompt);
    }

    #[test]
    fn test_prompt_char_mid_line_is_data() {
        let mut buffer = LineBuffer::new();
        let events = feed_all(&mut buffer, b"a>b\n");
        assert_eq!(events[0], line("a>b"));
    }

    #[test]
    fn test_line_buffer_overflow_discards_line() {
        let mut buffer = LineBuffer::new();
        for _ in 0..LINE_CAPACITY + 10 {
            assert_eq!(buffer.feed(b'x'), Ok(None));
        }
        assert_eq!(buffer.feed(b'\n'), Err(AtError::LineTooLong));
        let events = feed_all(&mut buffer, b"next\n");
        assert_eq!(events[0], line("next"));
    }

    #[test]
    fn test_cmt_record_closed_by_next_header() {
        let mut parser = UrcParser::new();
        assert_eq!(
            parser.feed_line("+CMT: \"+100\",\"\",\"24/01/01,10:00:00+00\""),
            Ok(None)
        );
        assert_eq!(parser.feed_line("Alice - 5559999"), Ok(None));
        assert_eq!(parser.feed_line("Bob - 5558888"), Ok(None));
        let sms = parser
            .feed_line("+CMT: \"+200\",\"\",\"24/01/01,10:00:05+00\"")
            .unwrap()
            .unwrap();
        assert_eq!(sms.sender.as_str(), "+100");
        assert_eq!(sms.body.as_str(), "Alice - 5559999\nBob - 5558888");
        assert!(parser.has_pending());
        let sms = parser.flush().unwrap();
        assert_eq!(sms.sender.as_str(), "+200");
        assert!(sms.body.is_empty());
    }

    #[test]
    fn test_cmt_record_closed_by_final_result() {
        let mut parser = UrcParser::new();
        parser.feed_line("+CMT: \"+100\",,\"x\"").unwrap();
        parser.feed_line("").unwrap();
        parser.feed_line("null - 1,2").unwrap();
        let sms = parser.feed_line("OK").unwrap().unwrap();
        assert_eq!(sms.body.as_str(), "null - 1,2");
        assert!(!parser.has_pending());
    }

    #[test]
    fn test_cmt_record_closed_by_send_reply() {
        let mut parser = UrcParser::new();
        parser.feed_line("+CMT: \"+100\",,\"x\"").unwrap();
        parser.feed_line("null - 1,2").unwrap();
        let sms = parser.feed_line("+CMGS: 12").unwrap().unwrap();
        assert_eq!(sms.body.as_str(), "null - 1,2");
        assert_eq!(parser.feed_line("OK"), Ok(None));
    }

    #[test]
    fn test_echo_disabled_before_text_mode() {
        let echo = INIT_SEQUENCE.iter().position(|c| *c == "ATE0").unwrap();
        let text_mode = INIT_SEQUENCE.iter().position(|c| *c == "AT+CMGF=1").unwrap();
        assert!(echo < text_mode);
    }

    #[test]
    fn test_lines_outside_record_ignored() {
        let mut parser = UrcParser::new();
        assert_eq!(parser.feed_line("RING"), Ok(None));
        assert_eq!(parser.feed_line("+CMGS: 12"), Ok(None));
        assert!(parser.flush().is_none());
    }

    #[test]
    fn test_malformed_header() {
        let mut parser = UrcParser::new();
        assert_eq!(
            parser.feed_line("+CMT: +100,,"),
            Err(AtError::MalformedHeader)
        );
        assert_eq!(parser.feed_line("Alice - 5559999"), Ok(None));
        assert!(parser.flush().is_none());
    }

    #[test]
    fn test_oversized_body_dropped() {
        let mut parser = UrcParser::new();
        parser.feed_line("+CMT: \"+100\"").unwrap();
        let chunk = [b'x'; 200];
        let chunk = core::str::from_utf8(&chunk).unwrap();
        let mut result = Ok(None);
        for _ in 0..4 {
            result = parser.feed_line(chunk);
        }
        assert_eq!(result, Err(AtError::BodyTooLong));
        assert!(!parser.has_pending());
        assert_eq!(parser.feed_line(chunk), Ok(None));
    }

    #[test]
    fn test_response_classification() {
        assert!(is_send_confirmation("+CMGS: 7"));
        assert!(is_error("+CMS ERROR: 500"));
        assert!(is_error("ERROR"));
        assert!(!is_error("OK"));
    }
}
