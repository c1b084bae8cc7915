//! Waitlist form submission.
//!
//! `POST /waitlist` takes the landing page form, runs it through the signup
//! handler, and either redirects to the confirmation page or redraws the
//! landing page with an inline notice and a usable form.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;

use unstra_core::{Outcome, SignupError, Submission};

use crate::routes::landing::{self, FormView};
use crate::state::AppState;

/// Query string that tells the confirmation page the visitor was already on the list.
pub const ALREADY_JOINED_QUERY: &str = "status=already";

/// Build the form submission router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/waitlist", post(submit_form))
}

/// Fields posted by the landing page form.
#[derive(Debug, Deserialize)]
struct SignupForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    form_id: Option<String>,
    #[serde(default)]
    page: Option<String>,
}

/// Read a header as a UTF-8 string.
pub(crate) fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Key for the in-flight gate: the form instance, or the address when the
/// client did not send one.
pub(crate) fn gate_key(form_id: Option<&str>, email: &str) -> String {
    form_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map_or_else(|| format!("email:{}", email.trim().to_lowercase()), |id| format!("form:{id}"))
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Response {
    let key = gate_key(form.form_id.as_deref(), &form.email);
    let page = form
        .page
        .filter(|p| !p.is_empty())
        .or_else(|| header_str(&headers, header::REFERER));

    let submission = Submission {
        email: form.email.clone(),
        page_url: page.clone(),
        user_agent: header_str(&headers, header::USER_AGENT),
    };

    let Some(outcome) = state.waitlist.submit(&key, submission).await else {
        // The first submission will answer the browser; stay put.
        return StatusCode::NO_CONTENT.into_response();
    };

    match outcome {
        Outcome::Joined => Redirect::to(unstra_core::CONFIRMATION_PATH).into_response(),
        Outcome::AlreadyJoined => Redirect::to(&format!(
            "{}?{ALREADY_JOINED_QUERY}",
            unstra_core::CONFIRMATION_PATH
        ))
        .into_response(),
        Outcome::Failed(ref err) => {
            let status = match err {
                SignupError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SignupError::Conflict { .. } | SignupError::Transient(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            let notice = outcome.notice().unwrap_or_default();
            let count = state.display_count().await;
            let page = page.as_deref().map_or("/", landing_page_path);
            let html = landing::render(
                &state,
                count,
                &FormView {
                    email: form.email.trim(),
                    page,
                    notice: Some(&notice),
                },
            );
            (status, Html(html)).into_response()
        }
    }
}

/// Keep only a same-site path for the redrawn form's `page` field.
fn landing_page_path(page: &str) -> &str {
    if page.starts_with('/') && !page.starts_with("//") {
        return page;
    }
    // Absolute URL from the Referer header: drop scheme and host.
    page.split_once("://")
        .and_then(|(_, rest)| rest.find('/').map(|i| &rest[i..]))
        .unwrap_or("/")
}
