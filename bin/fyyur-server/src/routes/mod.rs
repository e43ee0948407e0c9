//! Axum router construction.
//!
//! [`build`] assembles the complete application router: middleware layers
//! (CORS, per-request tracing), the page routes for venues, artists and
//! shows, the health endpoint, and the rendered 404 fallback.

mod artists;
mod health;
mod home;
mod shows;
mod venues;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use chrono::{DateTime, Utc};
use tower::ServiceBuilder;

use crate::middleware::{cors, trace};
use crate::render;
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(home::router())
        .merge(venues::router())
        .merge(artists::router())
        .merge(shows::router())
        .fallback(not_found)
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

async fn not_found() -> Response {
    render::error_page(StatusCode::NOT_FOUND)
}

/// One display format for every timestamp the pages show.
pub(crate) fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format("%m/%d/%Y, %H:%M").to_string()
}

// ── Test helpers ───────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::header::CONTENT_TYPE;
    use axum::response::Response;
    use http_body_util::BodyExt as _;

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    pub fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// The flash payloads set on `response`, decoded for assertions.
    pub fn flashed_categories(response: &Response) -> Vec<String> {
        use base64::Engine as _;
        response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|cookie| cookie.strip_prefix("fyyur_flash="))
            .filter_map(|rest| rest.split(';').next())
            .filter_map(|payload| {
                base64::engine::general_purpose::URL_SAFE_NO_PAD
                    .decode(payload)
                    .ok()
            })
            .filter_map(|bytes| serde_json::from_slice::<serde_json::Value>(&bytes).ok())
            .flat_map(|value| {
                value
                    .as_array()
                    .into_iter()
                    .flatten()
                    .filter_map(|m| m["category"].as_str().map(str::to_owned))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
