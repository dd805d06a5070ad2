//! Emergency-contact table

use resq_protocol::{Contact, ContactList};

/// Up to [`resq_protocol::MAX_PAIRS`] emergency contacts
///
/// Rebuilt wholesale from each contact-list message; there is no
/// incremental merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactTable {
    contacts: ContactList,
}

impl ContactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with `contacts`
    pub fn replace(&mut self, contacts: ContactList) {
        self.contacts = contacts;
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }
}
