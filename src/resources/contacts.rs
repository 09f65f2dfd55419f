//! Endpoints for adding and removing contact resources.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    resources::{
        ContactDirectory, ContactId, NewContact,
        page::{ResourcesState, resources_content_view},
    },
};

fn lock_contacts(
    state: &ResourcesState,
) -> Result<std::sync::MutexGuard<'_, ContactDirectory>, Error> {
    state
        .contacts
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire contacts lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

pub async fn create_resource_endpoint(
    State(state): State<ResourcesState>,
    Form(new_contact): Form<NewContact>,
) -> Response {
    let mut contacts = match lock_contacts(&state) {
        Ok(contacts) => contacts,
        Err(error) => return error.into_alert_response(),
    };

    let alert = match contacts.add_contact(new_contact) {
        Ok(contact) => {
            tracing::info!("Added contact {}", contact.id);

            Alert::Success {
                message: "Resource added successfully!".to_owned(),
                details: format!("{} was added to resources", contact.name),
            }
        }
        Err(error) => {
            tracing::warn!("Rejected new contact: {error}");
            return error.into_alert_response();
        }
    };

    html!(
        (resources_content_view(&contacts))
        (alert.into_oob_html())
    )
    .into_response()
}

pub async fn delete_resource_endpoint(
    Path(contact_id): Path<ContactId>,
    State(state): State<ResourcesState>,
) -> Response {
    let mut contacts = match lock_contacts(&state) {
        Ok(contacts) => contacts,
        Err(error) => return error.into_alert_response(),
    };

    match contacts.remove_contact(contact_id) {
        Ok(_) => {
            tracing::info!("Removed contact {contact_id}");

            let alert = Alert::SuccessSimple {
                message: "Resource removed".to_owned(),
            };

            html!(
                (resources_content_view(&contacts))
                (alert.into_oob_html())
            )
            .into_response()
        }
        Err(error) => {
            tracing::warn!("Could not remove contact {contact_id}: {error}");
            error.into_alert_response()
        }
    }
}
