//! Outbound message templates.

use core::fmt::Write;

use heapless::String;

/// Capacity of a composed outbound message
pub const OUTBOUND_CAPACITY: usize = 256;

pub type OutboundBody = String<OUTBOUND_CAPACITY>;

/// Location reference prefix; the coordinate token is appended verbatim
pub const MAP_LINK_PREFIX: &str = "https://www.google.com/maps?q=";

pub const REGISTRATION_CONFIRMATION: &str =
    "Smart Helmet registered. Emergency alerts will be sent to this number.";

pub const CRASH_PROMPT: &str =
    "CRASH DETECTED! Please respond with your location and emergency contacts.";

const USER_ALERT_HEADER: &str = "Emergency alert activated! Help is being notified.";

const CONTACT_ALERT_HEADER: &str = "EMERGENCY: Motorcycle rider needs assistance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComposeError {
    /// Composed text exceeds [`OUTBOUND_CAPACITY`]
    Overflow,
}

impl From<core::fmt::Error> for ComposeError {
    fn from(_: core::fmt::Error) -> Self {
        ComposeError::Overflow
    }
}

pub fn compose_registration_confirmation() -> Result<OutboundBody, ComposeError> {
    fixed(REGISTRATION_CONFIRMATION)
}

pub fn compose_crash_prompt() -> Result<OutboundBody, ComposeError> {
    fixed(CRASH_PROMPT)
}

/// Message telling the rider that the alert went out
pub fn compose_user_alert(coordinates: &str) -> Result<OutboundBody, ComposeError> {
    let mut body = OutboundBody::new();
    write!(
        body,
        "{}\nYour location: {}{}",
        USER_ALERT_HEADER, MAP_LINK_PREFIX, coordinates
    )?;
    Ok(body)
}

/// Message sent to each emergency contact
pub fn compose_contact_alert(
    coordinates: &str,
    facility: &str,
) -> Result<OutboundBody, ComposeError> {
    let mut body = OutboundBody::new();
    write!(
        body,
        "{}\nReported location: {}{}\nNearest facility: {}",
        CONTACT_ALERT_HEADER, MAP_LINK_PREFIX, coordinates, facility
    )?;
    Ok(body)
}

fn fixed(text: &str) -> Result<OutboundBody, ComposeError> {
    let mut body = OutboundBody::new();
    body.push_str(text).map_err(|_| ComposeError::Overflow)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_alert() {
        let body = compose_user_alert("12.34,56.78").unwrap();
        assert_eq!(
            body.as_str(),
            "Emergency alert activated! Help is being notified.\n\
             Your location: https://www.google.com/maps?q=12.34,56.78"
        );
    }

    #[test]
    fn test_contact_alert() {
        let body = compose_contact_alert("12.34,56.78", "HospitalA").unwrap();
        assert_eq!(
            body.as_str(),
            "EMERGENCY: Motorcycle rider needs assistance\n\
             Reported location: https://www.google.com/maps?q=12.34,56.78\n\
             Nearest facility: HospitalA"
        );
    }

    #[test]
    fn test_fixed_texts() {
        assert_eq!(
            compose_registration_confirmation().unwrap().as_str(),
            REGISTRATION_CONFIRMATION
        );
        assert_eq!(compose_crash_prompt().unwrap().as_str(), CRASH_PROMPT);
    }

    #[test]
    fn test_overflow() {
        let long = [b'x'; OUTBOUND_CAPACITY];
        let facility = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            compose_contact_alert("1,2", facility),
            Err(ComposeError::Overflow)
        );
    }

    #[test]
    fn test_bounded_inputs_always_fit() {
        let coords = [b'9'; crate::message::COORDINATES_CAPACITY];
        let name = [b'n'; crate::message::NAME_CAPACITY];
        let body = compose_contact_alert(
            core::str::from_utf8(&coords).unwrap(),
            core::str::from_utf8(&name).unwrap(),
        );
        assert!(body.is_ok());
    }
}
