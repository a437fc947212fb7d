//! Handlers for the contact form.
//!
//! Every submission re-renders the form with a status message; delivery
//! failures are reported to the visitor, never raised as errors.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use pita_core::contact::{ContactForm, ContactStatus};
use pita_mail::{MailError, OutgoingEmail};

use crate::error::AppResult;
use crate::handlers::site::{render, SiteContext};
use crate::state::AppState;
use crate::templates;

/// Map a delivery failure to the status shown to the visitor.
pub fn status_for(err: &MailError) -> ContactStatus {
    match err {
        MailError::Api { .. } => ContactStatus::ApiError,
        MailError::InvalidAddress(_) => ContactStatus::InvalidAddress,
        MailError::Request(_) | MailError::Transport(_) | MailError::Build(_) => {
            ContactStatus::Error
        }
    }
}

/// GET /contact/
pub async fn show(State(state): State<AppState>) -> AppResult<Html<String>> {
    let site = SiteContext::load(&state).await?;
    Ok(render(templates::contact(
        &site.layout(&state),
        &ContactForm::default(),
        None,
    )))
}

/// POST /contact/
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> AppResult<Html<String>> {
    let site = SiteContext::load(&state).await?;

    let status = match form.compose(&site.settings) {
        None => ContactStatus::Invalid,
        Some(message) => {
            let email = OutgoingEmail {
                from_name: message.sender_name,
                from_address: message.sender_address,
                to: message.recipient,
                subject: message.subject,
                text: message.body,
            };
            match state.mailer.send(&email).await {
                Ok(()) => ContactStatus::Success,
                Err(e) => {
                    tracing::warn!(error = %e, mailer = state.mailer.name(), "Contact email failed");
                    status_for(&e)
                }
            }
        }
    };
    tracing::info!(?status, "Contact form submitted");

    Ok(render(templates::contact(
        &site.layout(&state),
        &form,
        Some(status),
    )))
}
