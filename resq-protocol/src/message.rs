//! Inbound message records and the body grammar.
//!
//! Two body shapes are recognised once the rider is registered:
//!
//! ```text
//! null - 12.34, 56.78        <- coordinate update (first line only)
//! HospitalA - 5551234        <- emergency contacts, one pair line each
//! Clinic - 5550101
//! ```
//!
//! A body without the `null - ` prefix is a plain contact list. Malformed
//! lines are skipped; only an oversized coordinate token rejects a message.

use heapless::{String, Vec};

use crate::pair::{body_lines, PairError, PairLine};

/// Maximum number of emergency contacts kept at once
pub const MAX_PAIRS: usize = 10;

/// Capacity of a contact name
pub const NAME_CAPACITY: usize = 32;

/// Capacity of a phone number or transport address
pub const NUMBER_CAPACITY: usize = 24;

/// Capacity of the coordinate token
pub const COORDINATES_CAPACITY: usize = 48;

/// Capacity of an inbound message body
pub const BODY_CAPACITY: usize = 640;

/// First-line prefix marking a coordinate update
pub const COORDINATE_PREFIX: &str = "null - ";

/// Numbers that are never accepted as emergency contacts
const RESERVED_NUMBER: &str = "911";

/// Right-hand sides of this length or shorter are not phone numbers
const MIN_NUMBER_LEN: usize = 3;

pub type Name = String<NAME_CAPACITY>;
pub type Number = String<NUMBER_CAPACITY>;
pub type Coordinates = String<COORDINATES_CAPACITY>;
pub type Body = String<BODY_CAPACITY>;
pub type ContactList = Vec<Contact, MAX_PAIRS>;

/// Errors that reject a whole message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Coordinate token does not fit [`COORDINATES_CAPACITY`]
    CoordinatesTooLong,
    /// Body does not fit [`BODY_CAPACITY`]
    BodyTooLong,
    /// Sender address does not fit [`NUMBER_CAPACITY`]
    SenderTooLong,
}

/// A name and phone number
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contact {
    pub name: Name,
    pub number: Number,
}

impl Contact {
    pub fn new(name: &str, number: &str) -> Result<Self, PairError> {
        let mut contact = Self {
            name: Name::new(),
            number: Number::new(),
        };
        contact
            .name
            .push_str(name)
            .map_err(|_| PairError::FieldTooLong)?;
        contact
            .number
            .push_str(number)
            .map_err(|_| PairError::FieldTooLong)?;
        Ok(contact)
    }

    /// Whether this contact may receive emergency alerts
    pub fn is_reachable(&self) -> bool {
        self.number.len() > MIN_NUMBER_LEN && self.number.as_str() != RESERVED_NUMBER
    }
}

impl<'a> TryFrom<PairLine<'a>> for Contact {
    type Error = PairError;

    fn try_from(pair: PairLine<'a>) -> Result<Self, Self::Error> {
        Contact::new(pair.left, pair.right)
    }
}

/// A received text message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InboundSms {
    /// Transport address of the sender
    pub sender: Number,
    /// Message text, lines separated by `\n`
    pub body: Body,
}

impl InboundSms {
    pub fn new(sender: &str, body: &str) -> Result<Self, MessageError> {
        let mut sms = Self {
            sender: Number::new(),
            body: Body::new(),
        };
        sms.sender
            .push_str(sender)
            .map_err(|_| MessageError::SenderTooLong)?;
        sms.body
            .push_str(body)
            .map_err(|_| MessageError::BodyTooLong)?;
        Ok(sms)
    }
}

/// Structured content of a post-registration message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParsedBody {
    /// `null - <coords>` followed by an optional contact list
    ///
    /// `contacts` is `None` when the body had no lines after the first; the
    /// stored contact table must then be left as it is.
    CoordinateUpdate {
        coordinates: Coordinates,
        contacts: Option<ContactList>,
    },
    /// Replacement emergency-contact table
    ContactList(ContactList),
}

/// Decode a message body received after registration
pub fn parse_body(body: &str) -> Result<ParsedBody, MessageError> {
    let mut lines = body_lines(body).peekable();

    let coordinates = match lines.peek() {
        Some(first) if first.starts_with(COORDINATE_PREFIX) => {
            Some(parse_coordinates(&first[COORDINATE_PREFIX.len()..])?)
        }
        _ => None,
    };

    match coordinates {
        Some(coordinates) => {
            lines.next();
            let contacts = if lines.peek().is_some() {
                Some(collect_contacts(lines))
            } else {
                None
            };
            Ok(ParsedBody::CoordinateUpdate {
                coordinates,
                contacts,
            })
        }
        None => Ok(ParsedBody::ContactList(collect_contacts(lines))),
    }
}

/// Decode a registration message into the user contact
///
/// The body must hold at least one usable pair line. Its left side names
/// the rider; the right side is ignored in favour of `sender`, the address
/// the message actually came from.
pub fn parse_registration(body: &str, sender: &str) -> Option<Contact> {
    body_lines(body)
        .filter_map(|line| PairLine::parse(line).ok())
        .find_map(|pair| Contact::new(pair.left, sender).ok())
}

/// Strip the separators riders tend to type into a coordinate pair
fn parse_coordinates(raw: &str) -> Result<Coordinates, MessageError> {
    let mut coordinates = Coordinates::new();
    for c in raw.trim().chars().filter(|&c| c != ':' && c != ' ') {
        coordinates
            .push(c)
            .map_err(|_| MessageError::CoordinatesTooLong)?;
    }
    Ok(coordinates)
}

fn collect_contacts<'a>(lines: impl Iterator<Item = &'a str>) -> ContactList {
    let mut contacts = ContactList::new();
    for line in lines {
        if line.starts_with(COORDINATE_PREFIX) {
            continue;
        }
        let Ok(contact) = PairLine::parse(line).and_then(Contact::try_from) else {
            continue;
        };
        if !contact.is_reachable() {
            continue;
        }
        if contacts.push(contact).is_err() {
            break;
        }
    }
    contacts
}
