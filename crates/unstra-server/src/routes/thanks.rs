//! Confirmation page shown after joining the waitlist.

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;

use crate::routes::escape_html;
use crate::state::AppState;

/// Build the confirmation page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(unstra_core::CONFIRMATION_PATH, get(thanks_page))
}

#[derive(Debug, Deserialize)]
struct ThanksParams {
    status: Option<String>,
}

async fn thanks_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ThanksParams>,
) -> Html<String> {
    let already = params.status.as_deref() == Some("already");
    let notice = if already {
        r#"<div class="notice">You're already on the list! We'll be in touch soon.</div>"#
    } else {
        ""
    };

    Html(
        THANKS_PAGE
            .replace("{{NOTICE}}", notice)
            .replace(
                "{{SHARE_URL}}",
                &escape_html(&state.site.linkedin_share_url()),
            ),
    )
}

const THANKS_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>You're on the list | Unstra</title>
<meta name="robots" content="noindex"/>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{min-height:100vh;display:flex;align-items:center;justify-content:center;padding:24px;background:#fff;color:#0F172A;font-family:'Geist',-apple-system,'Segoe UI',sans-serif;-webkit-font-smoothing:antialiased}
.card{max-width:448px;width:100%;text-align:center}
.emoji{font-size:48px;margin-bottom:24px}
h1{font-size:30px;font-weight:900;margin-bottom:16px}
p{color:#64748B;margin-bottom:32px;line-height:1.6}
.notice{margin-bottom:24px;padding:12px 16px;border-radius:12px;background:#EEF2FF;border:1px solid #E0E7FF;color:#4338CA;font-size:14px;font-weight:600}
.share{display:block;width:100%;padding:16px;background:#4F46E5;color:#fff;border-radius:16px;font-weight:700;text-decoration:none;box-shadow:0 10px 24px rgba(79,70,229,.15)}
.share:hover{background:#4338CA}
.back{display:inline-block;margin-top:32px;font-size:14px;font-weight:700;color:#4F46E5;text-decoration:none}
.back:hover{text-decoration:underline}
</style></head>
<body>
<div class="card">
  <div class="emoji">&#127881;</div>
  {{NOTICE}}
  <h1>You're on the list!</h1>
  <p>Thanks for joining Unstra. We'll email you as soon as early access opens. Want to move up the line? Share us on LinkedIn!</p>
  <a class="share" href="{{SHARE_URL}}" target="_blank" rel="noopener">Share on LinkedIn</a>
  <a class="back" href="/">&larr; Back to Home</a>
</div>
</body></html>
"##;
