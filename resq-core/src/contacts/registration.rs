//! Rider registration
//!
//! The first message the helmet receives after power-up registers its
//! sender as the rider. Registration cannot be changed afterwards.

use resq_protocol::Contact;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Registration {
    #[default]
    Unregistered,
    Registered(Contact),
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }

    /// The rider's contact, once registered
    pub fn user(&self) -> Option<&Contact> {
        match self {
            Registration::Registered(contact) => Some(contact),
            Registration::Unregistered => None,
        }
    }

    /// Capture the rider's contact
    ///
    /// Returns false, leaving the existing contact in place, if already
    /// registered.
    pub fn register(&mut self, user: Contact) -> bool {
        if self.is_registered() {
            return false;
        }
        *self = Registration::Registered(user);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_once() {
        let mut reg = Registration::default();
        assert!(reg.user().is_none());

        assert!(reg.register(Contact::new("Alice", "+100").unwrap()));
        assert!(reg.is_registered());

        assert!(!reg.register(Contact::new("Mallory", "+666").unwrap()));
        assert_eq!(reg.user().map(|c| c.number.as_str()), Some("+100"));
    }
}
