//! The resources page: a card per contact and a form to add one.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::with_sidebar,
    resources::{Contact, ContactDirectory},
};

/// The state needed for the resources page and its endpoints.
#[derive(Debug, Clone)]
pub struct ResourcesState {
    pub contacts: Arc<Mutex<ContactDirectory>>,
}

impl FromRef<AppState> for ResourcesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            contacts: state.contacts.clone(),
        }
    }
}

pub async fn get_resources_page(State(state): State<ResourcesState>) -> Result<Response, Error> {
    let contacts = state
        .contacts
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire contacts lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-6"
            {
                h1 class="text-2xl font-bold" { "Resources" }
                p class="text-gray-600 dark:text-gray-400" { "People to contact for help." }
            }

            (resources_content_view(&contacts))
        }
    );

    Ok(base(
        "Resources",
        &[],
        &with_sidebar(endpoints::RESOURCES_VIEW, &content),
    )
    .into_response())
}

/// The contact cards and the add form, swapped after each change.
pub(super) fn resources_content_view(contacts: &ContactDirectory) -> Markup {
    html!(
        div id="resources-content" class="grid grid-cols-1 lg:grid-cols-3 gap-6"
        {
            section class="lg:col-span-2"
            {
                @if contacts.is_empty() {
                    p class="text-gray-600 dark:text-gray-400" { "No resources added yet" }
                } @else {
                    div id="contact-cards" class="grid grid-cols-1 md:grid-cols-2 gap-4"
                    {
                        @for contact in contacts.contacts() {
                            (contact_card_view(contact))
                        }
                    }
                }
            }

            section class=(CARD_STYLE)
            {
                (add_contact_form_view())
            }
        }
    )
}

fn contact_card_view(contact: &Contact) -> Markup {
    let detail_style = "flex gap-2 text-sm";
    let label_style = "text-gray-500 dark:text-gray-400";

    html!(
        article id={ "contact-" (contact.id) } class=(CARD_STYLE)
        {
            div class="flex justify-between items-start gap-2"
            {
                div
                {
                    h3 class="font-medium" { (contact.name) }

                    @if let Some(position) = &contact.position {
                        p class="text-sm text-gray-500 dark:text-gray-400" { (position) }
                    }
                }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(format_endpoint(endpoints::DELETE_RESOURCE, contact.id))
                    hx-target="#resources-content"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm={ "Remove " (contact.name) " from resources?" }
                {
                    "Remove"
                }
            }

            dl class="mt-4 space-y-2"
            {
                div class=(detail_style)
                {
                    dt class=(label_style) { "Email" }
                    dd
                    {
                        a href={ "mailto:" (contact.email) } class=(LINK_STYLE) { (contact.email) }
                    }
                }

                @if let Some(phone) = &contact.phone {
                    div class=(detail_style)
                    {
                        dt class=(label_style) { "Phone" }
                        dd { (phone) }
                    }
                }

                @if let Some(department) = &contact.department {
                    div class=(detail_style)
                    {
                        dt class=(label_style) { "Department" }
                        dd { (department) }
                    }
                }

                @if let Some(location) = &contact.location {
                    div class=(detail_style)
                    {
                        dt class=(label_style) { "Location" }
                        dd { (location) }
                    }
                }
            }

            @if let Some(notes) = &contact.notes {
                p class="mt-4 pt-4 text-sm border-t border-gray-200 dark:border-gray-700" { (notes) }
            }
        }
    )
}

fn add_contact_form_view() -> Markup {
    let optional_fields = [
        ("phone", "Phone", "tel"),
        ("position", "Position", "text"),
        ("department", "Department", "text"),
        ("location", "Location", "text"),
    ];

    html!(
        form
            hx-post=(endpoints::POST_RESOURCE)
            hx-target="#resources-content"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Add Resource" }

            div
            {
                label for="contact-name" class=(FORM_LABEL_STYLE) { "Name" }
                input
                    id="contact-name"
                    type="text"
                    name="name"
                    placeholder="Full name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="contact-email" class=(FORM_LABEL_STYLE) { "Email" }
                input
                    id="contact-email"
                    type="email"
                    name="email"
                    placeholder="name@example.com"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @for (name, label, input_type) in optional_fields {
                div
                {
                    label for={ "contact-" (name) } class=(FORM_LABEL_STYLE) { (label) }
                    input
                        id={ "contact-" (name) }
                        type=(input_type)
                        name=(name)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="contact-notes" class=(FORM_LABEL_STYLE) { "Notes" }
                textarea
                    id="contact-notes"
                    name="notes"
                    rows="3"
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Resource" }
        }
    )
}
