//! The directory of people to contact for help.

mod contacts;
mod domain;
mod page;

pub use contacts::{create_resource_endpoint, delete_resource_endpoint};
pub use domain::{Contact, ContactDirectory, ContactId, NewContact};
pub use page::get_resources_page;
