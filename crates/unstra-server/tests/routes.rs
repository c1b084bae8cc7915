//! Integration tests for the Unstra HTTP routes.
//!
//! Each test builds the full router over an in-process store and drives it
//! with `tower::ServiceExt::oneshot`. No socket is bound.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tokio::sync::Semaphore;
use tower::ServiceExt;

use unstra_core::{CohortMeter, Waitlist};
use unstra_server::app::build_router;
use unstra_server::config::SiteConfig;
use unstra_server::state::AppState;
use unstra_storage::{MemoryStore, NewEntry, StorageError, StoredEntry, WaitlistStore};

// ── Helpers ──────────────────────────────────────────────────────────

fn state_with(store: Arc<dyn WaitlistStore>) -> Arc<AppState> {
    Arc::new(AppState {
        waitlist: Waitlist::new(store),
        meter: CohortMeter::default(),
        site: SiteConfig::default(),
    })
}

fn app_with(store: Arc<dyn WaitlistStore>) -> Router {
    build_router(state_with(store))
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn form_post(body: &str) -> Request<Body> {
    Request::post("/waitlist")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::USER_AGENT, "test-agent/1.0")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn json_post(body: &serde_json::Value) -> Request<Body> {
    Request::post("/api/waitlist")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

/// Store whose every call fails.
struct BrokenStore;

#[async_trait::async_trait]
impl WaitlistStore for BrokenStore {
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError> {
        Err(StorageError::Write {
            email: entry.email.clone(),
            reason: "connection refused".to_owned(),
        })
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Err(StorageError::Read {
            what: "waitlist".to_owned(),
            reason: "connection refused".to_owned(),
        })
    }

    async fn find(&self, _email: &str) -> Result<Option<StoredEntry>, StorageError> {
        Ok(None)
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

/// Store that parks inserts until the test adds permits.
struct ParkedStore {
    release: Semaphore,
    inner: MemoryStore,
}

#[async_trait::async_trait]
impl WaitlistStore for ParkedStore {
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError> {
        self.release.acquire().await.unwrap().forget();
        self.inner.insert(entry).await
    }

    async fn count(&self) -> Result<u64, StorageError> {
        self.inner.count().await
    }

    async fn find(&self, email: &str) -> Result<Option<StoredEntry>, StorageError> {
        self.inner.find(email).await
    }

    fn backend_name(&self) -> &'static str {
        "parked"
    }
}

// ── Landing page ─────────────────────────────────────────────────────

#[tokio::test]
async fn landing_page_renders_form_and_meter() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;

    assert!(html.contains("Get Early Access"));
    assert!(html.contains("88% Capacity"));
    assert!(html.contains("Limited to first 500 members"));
    assert!(html.contains(r#"name="form_id""#));
    assert!(html.contains(r#"action="/waitlist""#));
    assert!(html.contains("mailto:hello@unstra.com"));
}

#[tokio::test]
async fn landing_page_carries_referral_query_into_form() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let html = body_text(send(&app, get("/?ref=linkedin")).await).await;

    assert!(html.contains(r#"name="page" value="/?ref=linkedin""#));
}

#[tokio::test]
async fn landing_page_meter_tracks_signups() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..100 {
        store
            .insert(&NewEntry {
                email: format!("user{i}@example.com"),
                source: "direct".to_owned(),
                user_agent: "Server".to_owned(),
            })
            .await
            .unwrap();
    }
    let app = app_with(store);

    let html = body_text(send(&app, get("/")).await).await;

    assert!(html.contains("90% Capacity"));
}

#[tokio::test]
async fn landing_page_survives_broken_store() {
    let app = app_with(Arc::new(BrokenStore));

    let resp = send(&app, get("/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("88% Capacity"));
}

// ── Form submission ──────────────────────────────────────────────────

#[tokio::test]
async fn form_signup_redirects_to_thanks() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(
        &app,
        form_post("email=Ada%40Example.com&form_id=f1&page=%2F%3Fref%3Dlinkedin"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/thanks");

    let entry = store.find("ada@example.com").await.unwrap().unwrap();
    assert_eq!(entry.source, "linkedin");
    assert_eq!(entry.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn form_signup_without_ref_is_direct() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(&app, form_post("email=ada%40example.com&form_id=f1&page=%2F")).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let entry = store.find("ada@example.com").await.unwrap().unwrap();
    assert_eq!(entry.source, "direct");
}

#[tokio::test]
async fn form_signup_falls_back_to_referer() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let req = Request::post("/waitlist")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::REFERER, "https://unstra.com/?ref=linkedin")
        .body(Body::from("email=ada%40example.com"))
        .unwrap();
    let resp = send(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let entry = store.find("ada@example.com").await.unwrap().unwrap();
    assert_eq!(entry.source, "linkedin");
    assert_eq!(entry.user_agent, "Server");
}

#[tokio::test]
async fn form_signup_ref_marker_is_case_sensitive() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(
        &app,
        form_post("email=ada%40example.com&form_id=f1&page=%2F%3Fref%3DLinkedIn"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let entry = store.find("ada@example.com").await.unwrap().unwrap();
    assert_eq!(entry.source, "direct");
}

#[tokio::test]
async fn repeat_signup_redirects_with_already_status() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    send(&app, form_post("email=ada%40example.com&form_id=f1")).await;
    let resp = send(&app, form_post("email=ADA%40example.com&form_id=f2")).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/thanks?status=already");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_email_redraws_form_with_notice() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(&app, form_post("email=%3Cb%3Enope&form_id=f1&page=%2F")).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(resp).await;
    assert!(html.contains("form-notice"));
    assert!(html.contains("Something went wrong"));
    assert!(html.contains(r#"value="&lt;b&gt;nope""#));
    assert!(!html.contains("<b>nope"));
    assert!(html.contains("Get Early Access"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn store_failure_redraws_form_with_retry_notice() {
    let app = app_with(Arc::new(BrokenStore));

    let resp = send(&app, form_post("email=ada%40example.com&form_id=f1")).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(resp).await;
    assert!(html.contains("Please try again later."));
    assert!(!html.contains("connection refused"));
    assert!(html.contains(r#"value="ada@example.com""#));
}

#[tokio::test]
async fn failed_form_can_be_resubmitted() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let first = send(&app, form_post("email=nope&form_id=f1")).await;
    assert_eq!(first.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let second = send(&app, form_post("email=ada%40example.com&form_id=f1")).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&second), "/thanks");
}

#[tokio::test]
async fn duplicate_submission_while_in_flight_is_ignored() {
    let store = Arc::new(ParkedStore {
        release: Semaphore::new(0),
        inner: MemoryStore::new(),
    });
    let state = state_with(store.clone());
    let app = build_router(Arc::clone(&state));

    let first = tokio::spawn({
        let app = app.clone();
        async move {
            app.oneshot(form_post("email=ada%40example.com&form_id=f1"))
                .await
                .unwrap()
        }
    });
    while !state.waitlist.is_in_flight("form:f1") {
        tokio::task::yield_now().await;
    }

    let second = send(&app, form_post("email=ada%40example.com&form_id=f1")).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    store.release.add_permits(1);
    let first = first.await.unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/thanks");
    assert!(!state.waitlist.is_in_flight("form:f1"));
    assert_eq!(store.count().await.unwrap(), 1);
}

// ── Confirmation page ────────────────────────────────────────────────

#[tokio::test]
async fn thanks_page_offers_linkedin_share() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/thanks")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;

    assert!(html.contains("on the list!"));
    assert!(html.contains("linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Funstra.com"));
    assert!(html.contains(r#"content="noindex""#));
    assert!(!html.contains(r#"class="notice""#));
}

#[tokio::test]
async fn thanks_page_shows_already_notice() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let html = body_text(send(&app, get("/thanks?status=already")).await).await;

    assert!(html.contains(r#"class="notice""#));
}

// ── Sitemap ──────────────────────────────────────────────────────────

#[tokio::test]
async fn sitemap_lists_site_root() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/sitemap.xml")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml; charset=utf-8"
    );
    let xml = body_text(resp).await;

    assert!(xml.contains("<loc>https://unstra.com</loc>"));
    assert!(xml.contains("<changefreq>monthly</changefreq>"));
    assert!(xml.contains("<priority>1</priority>"));
}

// ── JSON API ─────────────────────────────────────────────────────────

#[tokio::test]
async fn api_join_then_repeat() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(
        &app,
        json_post(&serde_json::json!({
            "email": "ada@example.com",
            "page_url": "https://unstra.com/?ref=linkedin",
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["outcome"], "joined");
    assert_eq!(body["redirect"], "/thanks");
    assert!(body.get("notice").is_none());

    let resp = send(&app, json_post(&serde_json::json!({ "email": "ada@example.com" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["outcome"], "already_joined");
    assert_eq!(body["redirect"], "/thanks");
    assert!(body["notice"].as_str().unwrap().contains("already on the list"));

    let entry = store.find("ada@example.com").await.unwrap().unwrap();
    assert_eq!(entry.source, "linkedin");
}

#[tokio::test]
async fn api_rejects_invalid_email() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, json_post(&serde_json::json!({ "email": "nope" }))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

#[tokio::test]
async fn api_rejects_malformed_body() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let resp = send(&app, json_post(&serde_json::json!({ "mail": "ada@example.com" }))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("email"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn api_rejects_non_json_body() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let req = Request::post("/api/waitlist")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("ada@example.com"))
        .unwrap();
    let resp = send(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

#[tokio::test]
async fn api_reports_unavailable_store() {
    let app = app_with(Arc::new(BrokenStore));

    let resp = send(&app, json_post(&serde_json::json!({ "email": "ada@example.com" }))).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "unavailable");
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn api_rejects_concurrent_submission_for_same_form() {
    let store = Arc::new(ParkedStore {
        release: Semaphore::new(0),
        inner: MemoryStore::new(),
    });
    let state = state_with(store.clone());
    let app = build_router(Arc::clone(&state));
    let body = serde_json::json!({ "email": "ada@example.com", "form_id": "api-1" });

    let first = tokio::spawn({
        let app = app.clone();
        let body = body.clone();
        async move { app.oneshot(json_post(&body)).await.unwrap() }
    });
    while !state.waitlist.is_in_flight("form:api-1") {
        tokio::task::yield_now().await;
    }

    let second = send(&app, json_post(&body)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["error"], "in_flight");

    store.release.add_permits(1);
    assert_eq!(first.await.unwrap().status(), StatusCode::OK);
}

#[tokio::test]
async fn api_stats_reports_progress() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());
    send(&app, json_post(&serde_json::json!({ "email": "ada@example.com" }))).await;

    let resp = send(&app, get("/api/waitlist/stats")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;

    assert_eq!(body["count"], 1);
    assert_eq!(body["progress_percent"], 88);
    assert_eq!(body["cohort_limit"], 500);
}

#[tokio::test]
async fn api_stats_unavailable_when_store_fails() {
    let app = app_with(Arc::new(BrokenStore));

    let resp = send(&app, get("/api/waitlist/stats")).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ── System ───────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_backend() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/")).await;
    let headers = resp.headers();

    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(
        headers.get(header::REFERRER_POLICY).unwrap(),
        "strict-origin-when-cross-origin"
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app_with(Arc::new(MemoryStore::new()));

    let resp = send(&app, get("/admin")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
