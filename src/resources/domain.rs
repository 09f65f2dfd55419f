//! The directory of contact resources.

use std::str::FromStr;

use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error,
    validation::{ValidationError, non_blank},
};

/// The ID of a contact.
pub type ContactId = i64;

/// A person who can be contacted for help.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// The details submitted to add a contact, as entered in the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// Parse an email address, requiring a dot in the domain so that addresses
/// like "user@localhost" are rejected.
fn parse_email(raw: &str) -> Result<EmailAddress, ValidationError> {
    let raw = raw.trim();

    match EmailAddress::from_str(raw) {
        Ok(email) if email.domain().contains('.') => Ok(email),
        _ => Err(ValidationError::InvalidEmail(raw.to_owned())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a contact to the end of the directory.
    ///
    /// Optional fields that are blank are stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the name is blank or the email is not a valid address.
    pub fn add_contact(&mut self, new_contact: NewContact) -> Result<&Contact, Error> {
        let name = non_blank(&new_contact.name).ok_or(ValidationError::EmptyContactName)?;
        let email = parse_email(&new_contact.email)?;

        let id = self.next_id;
        self.next_id += 1;

        self.contacts.push(Contact {
            id,
            name,
            email,
            phone: non_blank(&new_contact.phone),
            position: non_blank(&new_contact.position),
            department: non_blank(&new_contact.department),
            location: non_blank(&new_contact.location),
            notes: non_blank(&new_contact.notes),
        });

        let contact = self.contacts.len() - 1;
        Ok(&self.contacts[contact])
    }

    /// Remove the contact `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [Error::ContactNotFound] if there is no contact with that ID.
    pub fn remove_contact(&mut self, id: ContactId) -> Result<Contact, Error> {
        let index = self
            .contacts
            .iter()
            .position(|contact| contact.id == id)
            .ok_or(Error::ContactNotFound(id))?;

        Ok(self.contacts.remove(index))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
