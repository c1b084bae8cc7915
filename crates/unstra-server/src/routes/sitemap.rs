//! `sitemap.xml` for search engines.
//!
//! Lists the landing page only; the confirmation page is `noindex`.

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

use crate::routes::escape_html;
use crate::state::AppState;

/// Build the sitemap router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sitemap.xml", get(sitemap))
}

async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render(&state.site.site_url, Utc::now()),
    )
}

/// Render the sitemap document with `last_modified` as every entry's `lastmod`.
pub fn render(site_url: &str, last_modified: DateTime<Utc>) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');
    xml.push_str("<url>\n<loc>");
    xml.push_str(&escape_html(site_url));
    xml.push_str("</loc>\n<lastmod>");
    xml.push_str(&last_modified.to_rfc3339_opts(SecondsFormat::Millis, true));
    xml.push_str("</lastmod>\n<changefreq>monthly</changefreq>\n<priority>1</priority>\n</url>\n");
    xml.push_str("</urlset>\n");
    xml
}
