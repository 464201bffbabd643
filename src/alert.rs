//! Alert fragments for showing error messages after an htmx request.
//!
//! Alerts are swapped into the `#alert-container` element that [base](crate::html::base)
//! places at the bottom of every page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible error message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error message with details on how to fix it.
    Error { message: String, details: String },
    /// An error message on its own.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html!(
            div
                role="alert"
                class="flex items-start gap-3 p-4 rounded-lg border shadow-md \
                    text-red-800 bg-red-50 border-red-300 \
                    dark:bg-slate-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        span class="block mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                    class="text-lg leading-none opacity-70 hover:opacity-100"
                {
                    "×"
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
