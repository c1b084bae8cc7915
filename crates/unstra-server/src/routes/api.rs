//! JSON waitlist API.
//!
//! Same signup flow as the HTML form, for clients that submit with
//! `fetch` and navigate themselves.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use unstra_core::{Outcome, Submission};

use crate::error::AppError;
use crate::routes::waitlist::{gate_key, header_str};
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/waitlist", post(join))
        .route("/api/waitlist/stats", get(stats))
}

#[derive(Debug, Deserialize)]
struct JoinRequest {
    email: String,
    #[serde(default)]
    page_url: Option<String>,
    #[serde(default)]
    form_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    outcome: &'static str,
    redirect: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

async fn join(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<Json<JoinResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let key = gate_key(body.form_id.as_deref(), &body.email);
    let submission = Submission {
        email: body.email,
        page_url: body
            .page_url
            .or_else(|| header_str(&headers, header::REFERER)),
        user_agent: header_str(&headers, header::USER_AGENT),
    };

    let outcome = state
        .waitlist
        .submit(&key, submission)
        .await
        .ok_or(AppError::InFlight)?;

    match outcome {
        Outcome::Failed(err) => Err(err.into()),
        settled => Ok(Json(JoinResponse {
            outcome: settled.as_str(),
            redirect: settled.redirect().unwrap_or(unstra_core::CONFIRMATION_PATH),
            notice: settled.notice(),
        })),
    }
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    count: u64,
    progress_percent: u32,
    cohort_limit: u32,
}

async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, AppError> {
    let count = state.waitlist.count().await?;
    Ok(Json(StatsResponse {
        count,
        progress_percent: state.meter.display_percent(count),
        cohort_limit: state.meter.cohort_limit(),
    }))
}
