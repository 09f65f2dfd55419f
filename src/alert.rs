//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element at the bottom of
//! every page, either as the target of a failed htmx request or as an
//! out-of-band swap alongside a successful response. The client script
//! dismisses them automatically after a few seconds.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A toast-style message describing the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message on its own.
    SuccessSimple { message: String },
    /// An error message with extra details, such as how to fix the problem.
    Error { message: String, details: String },
    /// An error message on its own.
    #[allow(dead_code)]
    ErrorSimple { message: String },
}

impl Alert {
    fn parts(&self) -> (bool, &str, &str) {
        match self {
            Alert::Success { message, details } => (true, message, details),
            Alert::SuccessSimple { message } => (true, message, ""),
            Alert::Error { message, details } => (false, message, details),
            Alert::ErrorSimple { message } => (false, message, ""),
        }
    }

    /// Render the alert body, to be swapped into `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = self.parts();

        let container_style = if is_success {
            "flex items-start p-4 mb-4 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start p-4 mb-4 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html!(
            div
                class=(container_style)
                role="alert"
                data-alert-kind=(if is_success { "success" } else { "error" })
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-3 -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                        items-center justify-center h-8 w-8 hover:bg-gray-200
                        dark:hover:bg-gray-700"
                    aria-label="Dismiss"
                    data-dismiss-alert
                {
                    "×"
                }
            }
        )
    }

    /// Render the alert as an out-of-band swap that replaces the contents of
    /// `#alert-container` while the main response is swapped elsewhere.
    pub fn into_oob_html(self) -> Markup {
        html!(
            div
                id="alert-container"
                hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}
